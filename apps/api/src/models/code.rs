use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::llm_client::StructuredResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CodeBug {
    pub description: String,
    /// low / medium / high
    pub severity: String,
    /// Required key, `null` when the bug has no single line.
    #[serde(deserialize_with = "Option::deserialize")]
    #[schemars(schema_with = "nullable_integer")]
    pub line_number: Option<i64>,
    pub fix_suggestion: String,
}

fn nullable_integer(_: &mut SchemaGenerator) -> Schema {
    json_schema!({ "type": ["integer", "null"] })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CodeAnalysis {
    pub overall_score: i64,
    pub bugs: Vec<CodeBug>,
    pub optimizations: Vec<String>,
    pub security_issues: Vec<String>,
    /// Free-form metrics, passed through untouched.
    pub complexity_analysis: Map<String, Value>,
}

impl StructuredResponse for CodeAnalysis {
    const NAME: &'static str = "CodeAnalysis";

    fn safe_default() -> Self {
        Self {
            overall_score: 0,
            bugs: vec![],
            optimizations: vec![],
            security_issues: vec![],
            complexity_analysis: Map::new(),
        }
    }
}
