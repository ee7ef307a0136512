//! Structured calls with safe fallback.
//!
//! `StructuredInvoker::invoke` makes exactly one backend call constrained to the
//! response type's JSON Schema. Whatever happens, the caller gets a fully populated
//! value back: either the validated reply or the type's own `safe_default()`.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::{strip_json_fences, LlmError, ModelBackend};

/// A response schema the model can be asked to fill.
///
/// Each schema knows its own safe default; there is no central table to extend
/// when a new schema is added.
pub trait StructuredResponse: DeserializeOwned + JsonSchema + Send + Sized {
    /// Name used in logs.
    const NAME: &'static str;

    /// The schema-conformant placeholder returned when a call cannot be fulfilled.
    fn safe_default() -> Self;

    /// JSON Schema sent as the backend's `format` constraint.
    fn response_format() -> Value {
        schemars::schema_for!(Self).into()
    }
}

/// Why a structured call fell back to the safe default.
#[derive(Debug, Error)]
pub enum InvocationFailure {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("backend call failed: {0}")]
    Backend(#[from] LlmError),

    #[error("reply is not valid JSON: {0}")]
    Malformed(serde_json::Error),

    #[error("reply does not match schema: {0}")]
    SchemaMismatch(serde_json::Error),
}

/// Outcome of one structured call. Both states are terminal and both carry a value.
#[derive(Debug)]
pub enum Invocation<T> {
    Succeeded(T),
    FailedSafely { value: T, failure: InvocationFailure },
}

impl<T> Invocation<T> {
    pub fn value(&self) -> &T {
        match self {
            Invocation::Succeeded(value) | Invocation::FailedSafely { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Invocation::Succeeded(value) | Invocation::FailedSafely { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Invocation::FailedSafely { .. })
    }

    pub fn failure(&self) -> Option<&InvocationFailure> {
        match self {
            Invocation::Succeeded(_) => None,
            Invocation::FailedSafely { failure, .. } => Some(failure),
        }
    }
}

/// The single structured-call entry point used by every agent.
/// Holds no cross-call state; clones share the backend.
#[derive(Clone)]
pub struct StructuredInvoker {
    backend: Arc<dyn ModelBackend>,
    model: String,
}

impl StructuredInvoker {
    pub fn new(backend: Arc<dyn ModelBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn invoke<T: StructuredResponse>(&self, prompt: &str) -> Invocation<T> {
        match self.try_invoke::<T>(prompt).await {
            Ok(value) => Invocation::Succeeded(value),
            Err(failure) => {
                warn!(
                    schema = T::NAME,
                    model = %self.model,
                    error = %failure,
                    "structured call failed, falling back to defaults"
                );
                Invocation::FailedSafely {
                    value: T::safe_default(),
                    failure,
                }
            }
        }
    }

    async fn try_invoke<T: StructuredResponse>(
        &self,
        prompt: &str,
    ) -> Result<T, InvocationFailure> {
        if prompt.trim().is_empty() {
            return Err(InvocationFailure::EmptyPrompt);
        }
        let format = T::response_format();
        let raw = self.backend.chat(&self.model, prompt, &format).await?;
        parse_reply(&raw)
    }
}

/// Deserializes a raw model reply, classifying syntax errors apart from shape errors.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, InvocationFailure> {
    serde_json::from_str(strip_json_fences(raw)).map_err(|e| {
        if e.is_data() {
            InvocationFailure::SchemaMismatch(e)
        } else {
            InvocationFailure::Malformed(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::{invoker, ScriptedBackend};
    use crate::models::{
        CodeAnalysis, EmailContent, MeetingProposal, NewsAnalysis, QAResponse, ResumeAnalysis,
    };

    /// Sample replies that satisfy each schema.
    fn resume_reply() -> Value {
        json!({
            "name": "Ada Lovelace",
            "contact_info": "ada@example.com",
            "experience_summary": "8 years of numerical computing",
            "match_score": 82,
            "is_good_fit": true,
            "strengths": ["mathematics", "documentation"],
            "weaknesses": ["no cloud experience"],
            "missing_keywords": ["Kubernetes"],
            "score_breakdown": {"skills": 8.5, "experience": 7.0},
            "detailed_report": "Strong analytical background."
        })
    }

    fn news_reply() -> Value {
        json!({
            "is_fake": true,
            "confidence": 91,
            "reasons": ["No outlet reports the match"],
            "related_entities": ["Mumbai Indians"],
            "source_credibility": 35,
            "supporting_evidence": ["https://www.espncricinfo.com/"]
        })
    }

    fn code_reply() -> Value {
        json!({
            "overall_score": 64,
            "bugs": [
                {"description": "off by one", "severity": "high", "line_number": 12, "fix_suggestion": "use <"},
                {"description": "unused import", "severity": "low", "line_number": null, "fix_suggestion": "remove it"}
            ],
            "optimizations": ["cache the lookup"],
            "security_issues": [],
            "complexity_analysis": {"cyclomatic": 7, "time": "O(n^2)"}
        })
    }

    fn qa_reply() -> Value {
        json!({
            "answer": "The contract renews annually.",
            "confidence": 88,
            "sources": ["renews every twelve months"],
            "related_questions": ["What is the notice period?"]
        })
    }

    fn email_reply() -> Value {
        json!({
            "subject": "Quarterly review",
            "body": "Hi team,\n\nLet's meet on Friday.",
            "tone_score": 8,
            "clarity_score": 9
        })
    }

    fn meeting_reply() -> Value {
        json!({
            "suggested_time": "10:00 UTC",
            "agenda_items": ["intro"],
            "duration_optimization": "none",
            "follow_up_actions": "send notes"
        })
    }

    async fn round_trip<T>(reply: Value) -> Value
    where
        T: StructuredResponse + serde::Serialize,
    {
        let backend = ScriptedBackend::replying(reply.to_string());
        let outcome = invoker(backend.clone()).invoke::<T>("analyze").await;
        assert!(!outcome.is_fallback(), "{} fell back: {:?}", T::NAME, outcome.failure());
        assert_eq!(backend.calls(), 1);
        serde_json::to_value(outcome.into_value()).unwrap()
    }

    async fn fallback<T>(backend: std::sync::Arc<ScriptedBackend>) -> Invocation<T>
    where
        T: StructuredResponse,
    {
        let outcome = invoker(backend.clone()).invoke::<T>("analyze").await;
        assert!(outcome.is_fallback());
        assert_eq!(backend.calls(), 1);
        outcome
    }

    async fn assert_default<T>(backend: Arc<ScriptedBackend>)
    where
        T: StructuredResponse + PartialEq + std::fmt::Debug,
    {
        assert_eq!(fallback::<T>(backend).await.into_value(), T::safe_default());
    }

    #[tokio::test]
    async fn test_valid_replies_are_returned_unchanged() {
        for (reply, got) in [
            (resume_reply(), round_trip::<ResumeAnalysis>(resume_reply()).await),
            (news_reply(), round_trip::<NewsAnalysis>(news_reply()).await),
            (code_reply(), round_trip::<CodeAnalysis>(code_reply()).await),
            (qa_reply(), round_trip::<QAResponse>(qa_reply()).await),
            (email_reply(), round_trip::<EmailContent>(email_reply()).await),
            (meeting_reply(), round_trip::<MeetingProposal>(meeting_reply()).await),
        ] {
            assert_eq!(got, reply);
        }
    }

    #[tokio::test]
    async fn test_meeting_proposal_reply_is_returned_unchanged() {
        let raw = concat!(
            r#"{"suggested_time":"10:00 UTC","agenda_items":["intro"],"#,
            r#""duration_optimization":"none","follow_up_actions":"send notes"}"#
        );
        let backend = ScriptedBackend::replying(raw);
        let proposal = invoker(backend)
            .invoke::<MeetingProposal>("schedule")
            .await
            .into_value();
        assert_eq!(
            proposal,
            MeetingProposal {
                suggested_time: "10:00 UTC".to_string(),
                agenda_items: vec!["intro".to_string()],
                duration_optimization: "none".to_string(),
                follow_up_actions: "send notes".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_backend_failure_yields_defaults_for_every_schema() {
        let b = || ScriptedBackend::failing(500);
        assert_default::<ResumeAnalysis>(b()).await;
        assert_default::<NewsAnalysis>(b()).await;
        assert_default::<CodeAnalysis>(b()).await;
        assert_default::<QAResponse>(b()).await;
        assert_default::<EmailContent>(b()).await;
        assert_default::<MeetingProposal>(b()).await;
    }

    #[tokio::test]
    async fn test_malformed_json_yields_defaults_for_every_schema() {
        let b = || ScriptedBackend::replying("Sure! Here is your analysis: {");
        let outcome = fallback::<ResumeAnalysis>(b()).await;
        assert!(matches!(outcome.failure(), Some(InvocationFailure::Malformed(_))));
        assert_eq!(outcome.into_value(), ResumeAnalysis::safe_default());
        assert_default::<NewsAnalysis>(b()).await;
        assert_default::<CodeAnalysis>(b()).await;
        assert_default::<QAResponse>(b()).await;
        assert_default::<EmailContent>(b()).await;
        assert_default::<MeetingProposal>(b()).await;
    }

    #[tokio::test]
    async fn test_missing_required_fields_yield_defaults_for_every_schema() {
        let partial = |v: Value, field: &str| {
            let mut v = v;
            v.as_object_mut().unwrap().remove(field);
            ScriptedBackend::replying(v.to_string())
        };

        let outcome = fallback::<ResumeAnalysis>(partial(resume_reply(), "match_score")).await;
        assert!(matches!(outcome.failure(), Some(InvocationFailure::SchemaMismatch(_))));
        assert_eq!(outcome.into_value(), ResumeAnalysis::safe_default());

        assert_default::<NewsAnalysis>(partial(news_reply(), "is_fake")).await;
        assert_default::<CodeAnalysis>(partial(code_reply(), "bugs")).await;
        assert_default::<QAResponse>(partial(qa_reply(), "answer")).await;
        assert_default::<EmailContent>(partial(email_reply(), "subject")).await;
        assert_default::<MeetingProposal>(partial(meeting_reply(), "agenda_items")).await;
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_schema_mismatch() {
        let mut reply = email_reply();
        reply["tone_score"] = json!("high");
        let outcome = fallback::<EmailContent>(ScriptedBackend::replying(reply.to_string())).await;
        assert!(matches!(outcome.failure(), Some(InvocationFailure::SchemaMismatch(_))));
    }

    #[tokio::test]
    async fn test_code_analysis_default_on_backend_failure() {
        let outcome = fallback::<CodeAnalysis>(ScriptedBackend::failing(503)).await;
        assert!(matches!(outcome.failure(), Some(InvocationFailure::Backend(_))));
        assert_eq!(
            serde_json::to_value(outcome.into_value()).unwrap(),
            json!({
                "overall_score": 0,
                "bugs": [],
                "optimizations": [],
                "security_issues": [],
                "complexity_analysis": {}
            })
        );
    }

    #[tokio::test]
    async fn test_qa_default_on_backend_failure() {
        let outcome = fallback::<QAResponse>(ScriptedBackend::failing(503)).await;
        assert_eq!(
            serde_json::to_value(outcome.into_value()).unwrap(),
            json!({
                "answer": "Unable to generate response",
                "confidence": 0,
                "sources": [],
                "related_questions": []
            })
        );
    }

    #[tokio::test]
    async fn test_defaults_are_idempotent() {
        let first = fallback::<NewsAnalysis>(ScriptedBackend::failing(500)).await.into_value();
        let second = fallback::<NewsAnalysis>(ScriptedBackend::failing(500)).await.into_value();
        assert_eq!(first, second);

        let backend = ScriptedBackend::replying("not json");
        let llm = invoker(backend.clone());
        let a = llm.invoke::<QAResponse>("q").await.into_value();
        let b = llm.invoke::<QAResponse>("q").await.into_value();
        assert_eq!(a, b);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_prompt_never_reaches_backend() {
        let backend = ScriptedBackend::replying(meeting_reply().to_string());
        let outcome = invoker(backend.clone()).invoke::<MeetingProposal>("  \n ").await;
        assert!(matches!(outcome.failure(), Some(InvocationFailure::EmptyPrompt)));
        assert_eq!(outcome.into_value(), MeetingProposal::safe_default());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_fenced_reply_is_accepted() {
        let raw = format!("```json\n{}\n```", email_reply());
        let backend = ScriptedBackend::replying(raw);
        let outcome = invoker(backend).invoke::<EmailContent>("write").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.value().subject, "Quarterly review");
    }

    #[tokio::test]
    async fn test_schema_is_sent_as_format() {
        let backend = ScriptedBackend::replying(qa_reply().to_string());
        invoker(backend.clone()).invoke::<QAResponse>("question").await;
        let format = backend.last_format().unwrap();
        assert_eq!(format["type"], "object");
        let required = format["required"].as_array().unwrap();
        assert!(required.contains(&json!("answer")));
        assert!(required.contains(&json!("related_questions")));
        assert_eq!(backend.last_prompt().as_deref(), Some("question"));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut reply = qa_reply();
        reply["reasoning"] = json!("chain of thought");
        let parsed: QAResponse = parse_reply(&reply.to_string()).unwrap();
        assert_eq!(parsed.confidence, 88);
    }
}
