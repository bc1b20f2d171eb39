use serde_json::{json, Map, Value};

use crate::error::ExportError;
use crate::models::{ExportOptions, ParsedSubmission};

use super::LARGE_FIELD_BYTES;

/// Pretty-printed JSON export of the curated field set.
pub fn render(
    submission: &ParsedSubmission,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let mut doc = json!({
        "id": submission.id,
        "formName": submission.form_name,
        "projectName": submission.project_name,
        "submittedAt": submission.submitted_at,
        "submittedBy": submission.submitted_by,
        "location": {
            "display": submission.location,
            "country": submission.country,
            "region": submission.region,
            "city": submission.city,
            "coordinates": submission.coordinates,
        },
        "attachments": {
            "count": submission.attachments,
            "types": submission.attachment_types,
            "totalSize": submission.attachment_size,
        },
        "formData": form_data(&submission.form_data, options.include_photos),
    });

    if options.include_metadata {
        doc["metadata"] = json!({
            "ipAddress": submission.ip_address,
            "gpsSource": submission.gps_source,
            "gpsAccuracy": submission.gps_accuracy,
            "device": submission.device,
        });
    }

    Ok(serde_json::to_string_pretty(&doc)?)
}

/// With photos excluded, large string fields are replaced by a sized
/// placeholder rather than omitted, so the schema shape survives.
fn form_data(data: &Map<String, Value>, include_photos: bool) -> Value {
    if include_photos {
        return Value::Object(data.clone());
    }

    let mut out = Map::new();
    for (key, value) in data {
        let replaced = match value.as_str() {
            Some(s) if s.starts_with("data:") || s.len() > LARGE_FIELD_BYTES => {
                Value::String(placeholder(s))
            }
            _ => value.clone(),
        };
        out.insert(key.clone(), replaced);
    }
    Value::Object(out)
}

fn placeholder(s: &str) -> String {
    let kb = s.len().div_ceil(1024);
    if s.starts_with("data:image") {
        format!("[Photo removed - {kb} KB]")
    } else {
        format!("[Data removed - {kb} KB]")
    }
}
