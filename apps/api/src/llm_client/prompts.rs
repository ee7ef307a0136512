// Shared prompt fragments and prompt-building utilities.
// Each agent's own templates live in agents/prompts.rs.

/// Appended to every agent prompt. The backend's `format` constraint does the real
/// enforcement; this keeps smaller local models from wrapping the object in prose.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with a single JSON object that matches the requested fields. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Fills `{name}` placeholders in one pass.
///
/// Substituted values are never rescanned, so user text containing `{...}` is left
/// as-is. A chain of `str::replace` calls would rewrite a `{resume_text}` that
/// appears inside an earlier value such as the job description. Unknown
/// placeholders and stray braces are kept literally.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
