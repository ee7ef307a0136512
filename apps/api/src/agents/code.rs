//! Code inspector: bugs, security issues, optimizations and complexity for a snippet.

use crate::agents::build_prompt;
use crate::agents::prompts::CODE_PROMPT_TEMPLATE;
use crate::llm_client::{Invocation, StructuredInvoker};
use crate::models::CodeAnalysis;

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Supported source extensions and the language name used in prompts.
const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("java", "Java"),
    ("cpp", "C++"),
    ("c", "C"),
];

pub fn language_for_extension(ext: &str) -> &'static str {
    EXTENSION_LANGUAGES
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|(_, lang)| *lang)
        .unwrap_or(UNKNOWN_LANGUAGE)
}

/// Language for an uploaded file name, judged by the text after the last dot.
pub fn language_for_file_name(file_name: &str) -> &'static str {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| language_for_extension(ext))
        .unwrap_or(UNKNOWN_LANGUAGE)
}

pub fn build_code_prompt(code: &str, language: &str) -> String {
    build_prompt(CODE_PROMPT_TEMPLATE, &[("language", language), ("code", code)])
}

pub async fn analyze_code(
    llm: &StructuredInvoker,
    code: &str,
    language: &str,
) -> Invocation<CodeAnalysis> {
    llm.invoke(&build_code_prompt(code, language)).await
}
