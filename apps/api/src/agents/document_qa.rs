//! Document Q&A: answers a question from an uploaded document's text only.

use crate::agents::build_prompt;
use crate::agents::prompts::DOCUMENT_QA_PROMPT_TEMPLATE;
use crate::llm_client::{Invocation, StructuredInvoker};
use crate::models::QAResponse;

pub fn build_document_prompt(text: &str, question: &str) -> String {
    build_prompt(
        DOCUMENT_QA_PROMPT_TEMPLATE,
        &[("question", question), ("document", text)],
    )
}

pub async fn analyze_document(
    llm: &StructuredInvoker,
    text: &str,
    question: &str,
) -> Invocation<QAResponse> {
    llm.invoke(&build_document_prompt(text, question)).await
}
