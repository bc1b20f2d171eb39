use serde_json::{Map, Value};

/// What the attachments of one submission amount to.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentSummary {
    pub count: usize,
    pub types: Vec<String>,
    pub total_size: String,
}

impl Default for AttachmentSummary {
    fn default() -> Self {
        Self {
            count: 0,
            types: Vec::new(),
            total_size: "0 KB".to_string(),
        }
    }
}

/// Form-data fields that carry a single file each. A populated field
/// contributes exactly one attachment regardless of size.
const FILE_FIELDS: &[&str] = &["photo", "document", "file", "attachment", "image"];

/// Count attachments across the dedicated `attachments` column (array or
/// object) and the well-known file fields in the form data, and collect a
/// deduplicated list of their types.
pub fn summarize(attachments: Option<&Value>, data: Option<&Map<String, Value>>) -> AttachmentSummary {
    let mut count = 0usize;
    let mut types: Vec<String> = Vec::new();
    let mut bytes = 0u64;

    match attachments {
        Some(Value::Array(entries)) => {
            count += entries.len();
            for entry in entries {
                collect_entry(entry, &mut types, &mut bytes);
            }
        }
        Some(Value::Object(map)) => {
            count += map.len();
            for entry in map.values() {
                collect_entry(entry, &mut types, &mut bytes);
            }
        }
        _ => {}
    }

    if let Some(data) = data {
        for field in FILE_FIELDS {
            if let Some(value) = data.get(*field) {
                if is_populated(value) {
                    count += 1;
                    push_unique(&mut types, field_type(field, value));
                }
            }
        }
    }

    AttachmentSummary {
        count,
        types,
        total_size: humanize(bytes),
    }
}

fn collect_entry(entry: &Value, types: &mut Vec<String>, bytes: &mut u64) {
    if let Some(t) = entry_type(entry) {
        push_unique(types, t);
    }
    *bytes += entry_size(entry);
}

/// Best-effort type for an attachment entry: explicit mime keys first,
/// then the filename extension, then data-URI sniffing for bare strings.
fn entry_type(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => data_uri_mime(s)
            .or_else(|| extension_mime(s))
            .or_else(|| Some("file".to_string())),
        Value::Object(obj) => {
            for key in ["type", "mime_type", "mimeType"] {
                if let Some(t) = obj.get(key).and_then(Value::as_str) {
                    if !t.trim().is_empty() {
                        return Some(t.trim().to_string());
                    }
                }
            }
            for key in ["filename", "file_name", "name", "url"] {
                if let Some(name) = obj.get(key).and_then(Value::as_str) {
                    if let Some(t) = extension_mime(name) {
                        return Some(t);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// Type for a well-known file field: sniff the value, else fall back to
/// what the field name says it holds.
fn field_type(field: &str, value: &Value) -> String {
    if let Some(mime) = value.as_str().and_then(data_uri_mime) {
        return mime;
    }
    if let Some(mime) = value.as_str().and_then(extension_mime) {
        return mime;
    }
    match field {
        "photo" | "image" => "image".to_string(),
        "document" => "document".to_string(),
        _ => "file".to_string(),
    }
}

/// `data:image/png;base64,...` → `image/png`.
fn data_uri_mime(s: &str) -> Option<String> {
    let rest = s.strip_prefix("data:")?;
    let end = rest.find([';', ','])?;
    let mime = rest[..end].trim();
    (!mime.is_empty()).then(|| mime.to_string())
}

fn extension_mime(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "doc" | "docx" => "application/msword",
        _ => return None,
    };
    Some(mime.to_string())
}

fn entry_size(entry: &Value) -> u64 {
    let size = entry.as_object().and_then(|obj| obj.get("size"));
    match size {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(entries) => !entries.is_empty(),
        Value::Object(obj) => !obj.is_empty(),
        _ => false,
    }
}

fn push_unique(types: &mut Vec<String>, t: String) {
    if !types.contains(&t) {
        types.push(t);
    }
}

/// Humanize a byte total the way the dashboard shows it.
fn humanize(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes == 0 {
        "0 KB".to_string()
    } else if bytes < MB {
        format!("{} KB", bytes.div_ceil(KB))
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
