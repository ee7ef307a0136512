use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::llm_client::StructuredResponse;

/// Answer shown when the model could not produce one.
pub const UNABLE_TO_ANSWER: &str = "Unable to generate response";

/// Answer to a question about an uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QAResponse {
    pub answer: String,
    /// 0 – 100
    pub confidence: i64,
    /// Excerpts from the document backing the answer.
    pub sources: Vec<String>,
    pub related_questions: Vec<String>,
}

impl StructuredResponse for QAResponse {
    const NAME: &'static str = "QAResponse";

    fn safe_default() -> Self {
        Self {
            answer: UNABLE_TO_ANSWER.to_string(),
            confidence: 0,
            sources: vec![],
            related_questions: vec![],
        }
    }
}
