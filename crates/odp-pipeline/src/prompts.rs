//! Stage prompts.
//!
//! Pure renderers: the same inputs always produce the same prompt. Each
//! prompt names the JSON keys its stage must return and ends with
//! `Output JSON only.`

use odp_core::entities::Triple;

/// Stage 1: derive a scenario and competency questions from a paper.
#[must_use]
pub fn scenario_prompt(title: &str, abstract_text: &str) -> String {
    format!(
        "You are an ontology engineer.\n\
         Given this paper title and abstract, produce JSON with keys:\n\
         - scenario (string)\n\
         - competency_questions (array of at least 5 questions)\n\
         \n\
         TITLE: {title}\n\
         ABSTRACT: {abstract_text}\n\
         \n\
         Output JSON only."
    )
}

/// Stage 2: extract a concept-relation graph from the scenario.
#[must_use]
pub fn graph_prompt(scenario: &str, competency_questions: &[String]) -> String {
    let questions = bullet_lines(competency_questions.iter().map(|cq| cq.as_str()));
    format!(
        "Extract a concept-relation graph in JSON from this domain scenario and competency questions.\n\
         Return keys:\n\
         - concepts (array of normalized concept labels)\n\
         - relations (array of normalized relation labels)\n\
         - triples (array of [subject, relation, object])\n\
         \n\
         SCENARIO:\n\
         {scenario}\n\
         \n\
         COMPETENCY QUESTIONS:\n\
         {questions}\n\
         \n\
         Output JSON only."
    )
}

/// Stage 3: synthesize an ODP from the scenario and the graph's triples.
#[must_use]
pub fn odp_prompt(scenario: &str, triples: &[Triple]) -> String {
    let triples = bullet_lines(
        triples
            .iter()
            .map(|t| format!("({}, {}, {})", t.subject(), t.relation(), t.object())),
    );
    format!(
        "You are designing a reusable Ontology Design Pattern (ODP).\n\
         Use the scenario and triples below and return JSON with keys:\n\
         - pattern_name\n\
         - intent\n\
         - classes (array)\n\
         - object_properties (array)\n\
         - axioms_manchester (array)\n\
         - ttl_fragment (string containing Turtle snippet)\n\
         \n\
         SCENARIO:\n\
         {scenario}\n\
         \n\
         TRIPLES:\n\
         {triples}\n\
         \n\
         Output JSON only."
    )
}

/// `- item` per line, without a trailing newline.
fn bullet_lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: std::fmt::Display,
{
    items
        .into_iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
