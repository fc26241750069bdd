use clap::{Args, Subcommand};
use odp_core::enums::LlmBackendKind;

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Collect papers, generate an ODP per paper, evaluate, and write the run.
    Run(RunArgs),
    /// Collect papers into dataset.jsonl without generating anything.
    Collect(CollectArgs),
    /// Summarize metrics across run_* directories.
    Summarize(SummarizeArgs),
    /// Print a JSON Schema, or list the available schemas.
    Schema(SchemaArgs),
}

/// Arguments for `t2o run`.
#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Paper search query
    #[arg(long)]
    pub query: String,

    /// Maximum number of papers (defaults to search.default_limit)
    #[arg(long)]
    pub limit: Option<u32>,

    /// LLM backend: ollama, local
    #[arg(long)]
    pub backend: Option<LlmBackendKind>,

    /// Model tag for the Ollama backend
    #[arg(long)]
    pub model: Option<String>,

    /// Run output directory (defaults to run.output_dir)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Abort the run on the first paper that fails
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for `t2o collect`.
#[derive(Clone, Debug, Args)]
pub struct CollectArgs {
    /// Paper search query
    #[arg(long)]
    pub query: String,

    /// Maximum number of papers (defaults to search.default_limit)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output directory for dataset.jsonl (defaults to run.output_dir)
    #[arg(long)]
    pub output_dir: Option<String>,
}

/// Arguments for `t2o summarize`.
#[derive(Clone, Debug, Args)]
pub struct SummarizeArgs {
    /// Directory containing run_*/evaluation.csv (defaults to run.output_dir)
    #[arg(long)]
    pub results_root: Option<String>,
}

/// Arguments for `t2o schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `scenario` or `artifact_record`. Lists names when omitted.
    pub name: Option<String>,
}
