pub mod attachments;
pub mod categorize;
pub mod datetime;
pub mod device;
pub mod gps;
pub mod location;

use serde_json::Value;

use crate::models::{GpsSource, ParsedSubmission, RawSubmission, UNKNOWN};

use location::{BoundingBoxResolver, LocationResolver};

/// Normalizes raw submissions into the display-ready projection.
///
/// Parsing is pure and total: any shape of input produces a fully
/// populated [`ParsedSubmission`]. Missing or malformed pieces degrade to
/// their defaults instead of failing, so `parse` never returns an error
/// and never panics.
pub struct SubmissionParser {
    resolver: Box<dyn LocationResolver>,
}

impl SubmissionParser {
    pub fn new() -> Self {
        Self {
            resolver: Box::new(BoundingBoxResolver::default()),
        }
    }

    /// Use a custom place lookup instead of the built-in bounding boxes.
    pub fn with_resolver(resolver: Box<dyn LocationResolver>) -> Self {
        Self { resolver }
    }

    /// Convenience entry point for callers holding undecoded JSON.
    pub fn parse_value(&self, raw: &Value) -> ParsedSubmission {
        self.parse(&RawSubmission::from_value(raw.clone()))
    }

    pub fn parse(&self, raw: &RawSubmission) -> ParsedSubmission {
        let data = raw.data_object();
        let metadata = raw.metadata_object();

        let fix = gps::extract(raw);
        let place = location::infer(fix.as_ref(), metadata, data, self.resolver.as_ref());
        let device = device::extract(raw.device_info_object(), metadata);
        let files = attachments::summarize(raw.attachments.as_ref(), data);

        ParsedSubmission {
            id: display_string(raw.id.as_ref()).unwrap_or_else(|| UNKNOWN.to_string()),
            form_name: display_string(raw.form_name.as_ref())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            project_name: display_string(raw.project_name.as_ref())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            submitted_at: datetime::format_timestamp(raw.submitted_at.as_ref()),
            submitted_by: display_string(raw.user_email.as_ref())
                .or_else(|| display_string(raw.submitted_by.as_ref()))
                .unwrap_or_else(|| "Anonymous".to_string()),
            ip_address: ip_address(metadata),
            location: place.location,
            country: place.country,
            region: place.region,
            city: place.city,
            coordinates: fix.as_ref().map(gps::GpsFix::coordinates),
            gps_accuracy: fix.as_ref().and_then(|f| f.accuracy),
            gps_source: fix.as_ref().map(|f| f.source).unwrap_or(GpsSource::None),
            device,
            attachments: files.count,
            attachment_types: files.types,
            attachment_size: files.total_size,
            form_data: data.cloned().unwrap_or_default(),
        }
    }
}

impl Default for SubmissionParser {
    fn default() -> Self {
        Self::new()
    }
}

fn ip_address(metadata: Option<&serde_json::Map<String, Value>>) -> String {
    metadata
        .and_then(|m| {
            ["ip", "ip_address", "client_ip"]
                .iter()
                .filter_map(|key| m.get(*key).and_then(Value::as_str))
                .map(str::trim)
                .find(|s| !s.is_empty())
        })
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Render a loose JSON scalar for display; empty strings count as absent.
fn display_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
