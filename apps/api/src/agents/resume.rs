//! Resume analyzer: scores a résumé against a job description.

use serde::Serialize;

use crate::agents::build_prompt;
use crate::agents::prompts::RESUME_PROMPT_TEMPLATE;
use crate::llm_client::{Invocation, StructuredInvoker};
use crate::models::ResumeAnalysis;

/// Scores at or above this count as a good fit.
pub const GOOD_FIT_THRESHOLD: u32 = 60;

/// One analyzed upload.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeReport {
    pub file_name: String,
    pub analysis: ResumeAnalysis,
}

pub fn build_resume_prompt(job_description: &str, resume_text: &str) -> String {
    let threshold = GOOD_FIT_THRESHOLD.to_string();
    build_prompt(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("resume_text", resume_text),
            ("good_fit_threshold", threshold.as_str()),
        ],
    )
}

pub async fn analyze_resume(
    llm: &StructuredInvoker,
    job_description: &str,
    resume_text: &str,
) -> Invocation<ResumeAnalysis> {
    llm.invoke(&build_resume_prompt(job_description, resume_text))
        .await
}
