use serde_json::Value;

use crate::models::{ExportOptions, ParsedSubmission};

use super::is_binary_like;

/// Single-record CSV export: one header row and exactly one data row.
///
/// The parsed fields come first, then every non-binary form-data field,
/// flattened into the same row.
pub fn render(submission: &ParsedSubmission, options: &ExportOptions) -> String {
    let mut columns: Vec<(String, String)> = vec![
        ("id".to_string(), submission.id.clone()),
        ("form_name".to_string(), submission.form_name.clone()),
        ("project_name".to_string(), submission.project_name.clone()),
        ("submitted_at".to_string(), submission.submitted_at.clone()),
        ("submitted_by".to_string(), submission.submitted_by.clone()),
        ("location".to_string(), submission.location.clone()),
        ("country".to_string(), submission.country.clone()),
        ("region".to_string(), submission.region.clone()),
        ("city".to_string(), submission.city.clone()),
        (
            "coordinates".to_string(),
            submission.coordinates.clone().unwrap_or_default(),
        ),
        ("gps_source".to_string(), submission.gps_source.to_string()),
        ("attachments".to_string(), submission.attachments.to_string()),
        (
            "attachment_types".to_string(),
            submission.attachment_types.join("; "),
        ),
        (
            "attachment_size".to_string(),
            submission.attachment_size.clone(),
        ),
    ];

    if options.include_metadata {
        columns.push(("ip_address".to_string(), submission.ip_address.clone()));
        columns.push(("platform".to_string(), submission.device.platform.clone()));
        columns.push(("browser".to_string(), submission.device.browser.clone()));
        columns.push(("os".to_string(), submission.device.os.clone()));
        columns.push((
            "is_mobile".to_string(),
            submission.device.is_mobile.to_string(),
        ));
        columns.push((
            "is_tablet".to_string(),
            submission.device.is_tablet.to_string(),
        ));
    }

    for (key, value) in &submission.form_data {
        if is_binary_like(value) || columns.iter().any(|(name, _)| name == key) {
            continue;
        }
        columns.push((key.clone(), cell(value)));
    }

    let header: Vec<String> = columns.iter().map(|(name, _)| csv_escape(name)).collect();
    let row: Vec<String> = columns.iter().map(|(_, value)| csv_escape(value)).collect();

    format!("{}\n{}\n", header.join(","), row.join(","))
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
