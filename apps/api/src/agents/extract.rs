//! Text extraction for uploaded documents (PDF and plain text).

use crate::errors::AppError;

/// Document Q&A only sends this many characters of the document to the model.
pub const QA_MAX_CHARS: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Picks the kind from the upload's content type, falling back to the file extension
    /// when the client sent none or a generic one.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        match content_type.map(|ct| ct.split(';').next().unwrap_or(ct).trim()) {
            Some("application/pdf") => return Some(DocumentKind::Pdf),
            Some("text/plain") => return Some(DocumentKind::PlainText),
            Some(ct) if ct != "application/octet-stream" => return None,
            _ => {}
        }
        let (_, ext) = file_name?.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// Raw text of an upload, line breaks preserved.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, AppError> {
    match kind {
        DocumentKind::PlainText => Ok(decode_text(bytes)),
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::UnprocessableEntity(format!("Error parsing document: {e}"))),
    }
}

/// Text prepared for the Q&A prompt: whitespace collapsed, capped at `QA_MAX_CHARS`.
pub fn extract_for_qa(kind: DocumentKind, bytes: &[u8]) -> Result<String, AppError> {
    let text = normalize_whitespace(&extract_text(kind, bytes)?);
    Ok(truncate_chars(&text, QA_MAX_CHARS).to_string())
}

/// UTF-8, or Latin-1 when the bytes are not valid UTF-8.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts at a char boundary, never inside a multi-byte character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(
            DocumentKind::detect(Some("application/pdf"), Some("cv.txt")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect(Some("text/plain; charset=utf-8"), None),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::detect(
                Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
                Some("cv.docx")
            ),
            None
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(DocumentKind::detect(None, Some("CV.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), Some("notes.txt")),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::detect(None, Some("notes")), None);
        assert_eq!(DocumentKind::detect(None, None), None);
    }

    #[test]
    fn test_plain_text_utf8_and_latin1() {
        assert_eq!(
            extract_text(DocumentKind::PlainText, "café\nbar".as_bytes()).unwrap(),
            "café\nbar"
        );
        // 0xE9 alone is invalid UTF-8 but is 'é' in Latin-1
        assert_eq!(
            extract_text(DocumentKind::PlainText, &[b'c', b'a', b'f', 0xE9]).unwrap(),
            "café"
        );
    }

    #[test]
    fn test_qa_text_is_normalized_and_truncated() {
        let text = "line one\n\n  line\ttwo ".to_string() + &"x".repeat(6000);
        let out = extract_for_qa(DocumentKind::PlainText, text.as_bytes()).unwrap();
        assert!(out.starts_with("line one line two x"));
        assert_eq!(out.chars().count(), QA_MAX_CHARS);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("ééé", 2), "éé");
        assert_eq!(truncate_chars("ab", 5), "ab");
    }

    #[test]
    fn test_garbage_pdf_is_unprocessable() {
        let err = extract_text(DocumentKind::Pdf, b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
