use serde::Deserialize;
use serde_json::{Map, Value};

/// One form submission as stored by the ingestion endpoint.
///
/// Nothing about the shape is guaranteed: every field is optional, field
/// values may arrive as strings or numbers depending on the source, and the
/// inner bags (`data`, `metadata`, `device_info`, `attachments`) are
/// free-form JSON. The parser treats absence as "Unknown".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSubmission {
    pub id: Option<Value>,
    pub form_name: Option<Value>,
    pub project_name: Option<Value>,
    pub submitted_by: Option<Value>,
    pub user_email: Option<Value>,
    pub submitted_at: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub data: Option<Value>,
    pub metadata: Option<Value>,
    pub device_info: Option<Value>,
    pub attachments: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawSubmission {
    /// Build a record from an arbitrary JSON value. Never fails: anything
    /// that is not an object becomes the all-empty default record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub(crate) fn data_object(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref().and_then(Value::as_object)
    }

    pub(crate) fn metadata_object(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref().and_then(Value::as_object)
    }

    pub(crate) fn device_info_object(&self) -> Option<&Map<String, Value>> {
        self.device_info.as_ref().and_then(Value::as_object)
    }
}
