pub mod csv;
pub mod html;
pub mod json;

use chrono::Utc;
use serde_json::Value;

use crate::error::ExportError;
use crate::models::{ExportArtifact, ExportFormat, ExportOptions, ParsedSubmission};

/// Strings above this size are treated as binary blobs in flat exports.
pub(crate) const LARGE_FIELD_BYTES: usize = 10 * 1024;

/// Render a parsed submission as a downloadable artifact in the requested
/// format. Delivering the bytes (object URL, anchor click, HTTP response)
/// is the caller's concern.
pub fn render(
    submission: &ParsedSubmission,
    options: &ExportOptions,
) -> Result<ExportArtifact, ExportError> {
    let body = match options.format {
        ExportFormat::Json => json::render(submission, options)?,
        ExportFormat::Csv => csv::render(submission, options),
        ExportFormat::HtmlReport => html::render(submission, options),
    };

    Ok(ExportArtifact {
        filename: filename(submission, options)?,
        content_type: options.format.content_type(),
        bytes: body.into_bytes(),
    })
}

/// `submission_<id>_<date>.<ext>` unless the caller supplied a name; a
/// supplied name gets the format extension appended when missing.
fn filename(
    submission: &ParsedSubmission,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let ext = options.format.extension();

    match options.filename.as_deref().map(str::trim) {
        Some("") => Err(ExportError::InvalidOptions(
            "filename must not be empty".to_string(),
        )),
        Some(name) if name.ends_with(&format!(".{ext}")) => Ok(name.to_string()),
        Some(name) => Ok(format!("{name}.{ext}")),
        None => Ok(format!(
            "submission_{}_{}.{ext}",
            sanitize(&submission.id),
            Utc::now().format("%Y-%m-%d"),
        )),
    }
}

/// Keep source ids filesystem-safe in generated filenames.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// True for values kept out of flat exports: data URIs and oversized
/// strings.
pub(crate) fn is_binary_like(value: &Value) -> bool {
    match value.as_str() {
        Some(s) => s.starts_with("data:") || s.len() > LARGE_FIELD_BYTES,
        None => false,
    }
}
