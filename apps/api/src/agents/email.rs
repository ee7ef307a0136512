//! Email generator.

use serde::Deserialize;

use crate::agents::build_prompt;
use crate::agents::prompts::EMAIL_PROMPT_TEMPLATE;
use crate::llm_client::{Invocation, StructuredInvoker};
use crate::models::EmailContent;

#[derive(Debug, Clone, Deserialize)]
pub struct EmailBrief {
    /// e.g. Formal, Casual, Persuasive, Friendly
    pub tone: String,
    pub key_points: String,
    pub purpose: String,
    /// e.g. English, Spanish, French, German
    pub language: String,
}

pub fn build_email_prompt(brief: &EmailBrief) -> String {
    build_prompt(
        EMAIL_PROMPT_TEMPLATE,
        &[
            ("tone", brief.tone.as_str()),
            ("language", brief.language.as_str()),
            ("purpose", brief.purpose.as_str()),
            ("key_points", brief.key_points.as_str()),
        ],
    )
}

pub async fn generate_email(
    llm: &StructuredInvoker,
    brief: &EmailBrief,
) -> Invocation<EmailContent> {
    llm.invoke(&build_email_prompt(brief)).await
}
