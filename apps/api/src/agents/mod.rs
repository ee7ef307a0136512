// The six agents. Each one builds a prompt from user input and hands it to the
// structured invoker; none of them talks to the model backend directly.

pub mod code;
pub mod document_qa;
pub mod email;
pub mod extract;
pub mod handlers;
pub mod meeting;
pub mod news;
pub mod prompts;
pub mod resume;

use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};

/// Renders an agent template and appends the shared JSON-only instruction.
fn build_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    format!("{}\n\n{}", render(template, vars), JSON_ONLY_INSTRUCTION)
}
