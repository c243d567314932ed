//! Text extraction for uploaded documents (PDF, DOCX, plain text).
//!
//! Extraction is best-effort: a malformed file degrades to a `Partial` or
//! `Failed` extraction with warnings, it never aborts the request. Only an
//! unrecognized extension is an error, and it is raised before any remote
//! call is attempted.

use std::path::Path;

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

/// How much of the document made it into the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Full,
    Partial,
    Failed,
}

/// Plain text pulled out of one uploaded document, plus how trustworthy it is.
/// Callers decide how to degrade: a `Failed` resume still creates a session,
/// the warnings are surfaced in the response.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub text: String,
    pub status: ExtractionStatus,
    pub warnings: Vec<String>,
}

impl Extraction {
    fn full(text: String) -> Self {
        Self {
            text,
            status: ExtractionStatus::Full,
            warnings: Vec::new(),
        }
    }

    fn partial(text: String, warning: impl Into<String>) -> Self {
        Self {
            text,
            status: ExtractionStatus::Partial,
            warnings: vec![warning.into()],
        }
    }

    fn failed(warning: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            status: ExtractionStatus::Failed,
            warnings: vec![warning.into()],
        }
    }
}

/// Extracts plain text from a file, dispatching on its extension
/// (case-insensitive). `.pdf`, `.docx`, and `.txt` are supported; anything
/// else fails with `UnsupportedFormat`.
pub fn extract(path: &Path) -> Result<Extraction, AppError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let extraction = match ext.as_deref() {
        Some("pdf") => extract_pdf(path),
        Some("docx") => extract_docx(path),
        Some("txt") => extract_txt(path),
        other => {
            return Err(AppError::UnsupportedFormat(format!(
                "unsupported file extension '{}'; expected .pdf, .docx, or .txt",
                other.unwrap_or("")
            )))
        }
    };

    Ok(finalize(extraction))
}

/// A successful extraction that produced no usable text is downgraded to
/// `Partial` so callers can tell "empty document" from "clean extraction".
fn finalize(mut extraction: Extraction) -> Extraction {
    if extraction.status == ExtractionStatus::Full && extraction.text.trim().is_empty() {
        extraction.status = ExtractionStatus::Partial;
        extraction
            .warnings
            .push("extraction produced no text".to_string());
    }
    for warning in &extraction.warnings {
        warn!("extraction: {warning}");
    }
    extraction
}

/// Page texts are concatenated in document order by the library.
fn extract_pdf(path: &Path) -> Extraction {
    match pdf_extract::extract_text(path) {
        Ok(text) => Extraction::full(text),
        Err(e) => Extraction::failed(format!("PDF extraction failed: {e}")),
    }
}

/// Walks Document → Paragraph → Run → Text, joining the runs of each
/// paragraph and appending a line break per paragraph, in document order.
fn extract_docx(path: &Path) -> Extraction {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return Extraction::failed(format!("cannot read DOCX file: {e}")),
    };

    let docx = match read_docx(&bytes) {
        Ok(docx) => docx,
        Err(e) => return Extraction::failed(format!("DOCX parse failed: {e:?}")),
    };

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            text.push_str(&paragraph_text(para));
            text.push('\n');
        }
    }

    Extraction::full(text)
}

/// Runs within a paragraph are parts of the same sentence, so they are
/// concatenated with no separator.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    parts.push_str(&t.text);
                }
            }
        }
    }
    parts
}

/// Valid UTF-8 is returned verbatim; anything else degrades to a lossy
/// decode rather than failing.
fn extract_txt(path: &Path) -> Extraction {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return Extraction::failed(format!("cannot read text file: {e}")),
    };

    match String::from_utf8(bytes) {
        Ok(text) => Extraction::full(text),
        Err(e) => Extraction::partial(
            String::from_utf8_lossy(e.as_bytes()).into_owned(),
            "file was not valid UTF-8; decoded lossily",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Write;

    fn temp_file_with(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_unknown_extension_is_unsupported_format() {
        let file = temp_file_with(".rtf", b"{\\rtf1 hello}");
        let err = extract(file.path()).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_extension_is_unsupported_format() {
        let err = extract(Path::new("/tmp/resume")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_txt_is_read_verbatim() {
        let file = temp_file_with(".txt", "John Doe, Software Engineer\n".as_bytes());
        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.status, ExtractionStatus::Full);
        assert_eq!(extraction.text, "John Doe, Software Engineer\n");
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_txt_extension_matching_is_case_insensitive() {
        let file = temp_file_with(".TXT", b"shouting filename");
        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.status, ExtractionStatus::Full);
        assert_eq!(extraction.text, "shouting filename");
    }

    #[test]
    fn test_invalid_utf8_txt_degrades_to_lossy_partial() {
        let file = temp_file_with(".txt", &[b'o', b'k', 0xff, 0xfe, b'!']);
        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.status, ExtractionStatus::Partial);
        assert!(extraction.text.starts_with("ok"));
        assert!(extraction.text.ends_with('!'));
        assert_eq!(extraction.warnings.len(), 1);
    }

    #[test]
    fn test_empty_txt_is_partial_with_warning() {
        let file = temp_file_with(".txt", b"");
        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.status, ExtractionStatus::Partial);
        assert!(extraction.text.is_empty());
        assert_eq!(extraction.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_pdf_never_errors() {
        let file = temp_file_with(".pdf", b"this is not a pdf at all");
        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.status, ExtractionStatus::Failed);
        assert!(extraction.text.is_empty());
        assert!(!extraction.warnings.is_empty());
    }

    #[test]
    fn test_malformed_docx_never_errors() {
        let file = temp_file_with(".docx", b"not a zip archive");
        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.status, ExtractionStatus::Failed);
        assert!(extraction.text.is_empty());
    }

    #[test]
    fn test_docx_paragraphs_join_with_line_breaks() {
        let file = tempfile::Builder::new()
            .suffix(".docx")
            .tempfile()
            .unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("John Doe")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Software Engineer")))
            .build()
            .pack(file.as_file())
            .unwrap();

        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.status, ExtractionStatus::Full);
        assert_eq!(extraction.text, "John Doe\nSoftware Engineer\n");
    }

    #[test]
    fn test_docx_runs_concatenate_within_a_paragraph() {
        let file = tempfile::Builder::new()
            .suffix(".docx")
            .tempfile()
            .unwrap();
        Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Senior "))
                    .add_run(Run::new().add_text("Engineer")),
            )
            .build()
            .pack(file.as_file())
            .unwrap();

        let extraction = extract(file.path()).unwrap();
        assert_eq!(extraction.text, "Senior Engineer\n");
    }
}
