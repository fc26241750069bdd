//! Run driver configuration.

use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    String::from("outputs")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// Directory receiving `dataset.jsonl`, `artifacts.json`, and the
    /// evaluation files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Abort the whole run on the first paper that fails to generate.
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            fail_fast: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = RunConfig::default();
        assert_eq!(config.output_dir, "outputs");
        assert!(!config.fail_fast);
    }
}
