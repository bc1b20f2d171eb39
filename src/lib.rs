pub mod error;
pub mod export;
pub mod models;
pub mod submission;

pub use error::ExportError;
pub use models::{
    DeviceInfo, ExportArtifact, ExportFormat, ExportOptions, GpsSource, ParsedSubmission,
    RawSubmission,
};
pub use submission::categorize::{categorize_form_data, FormCategories};
pub use submission::location::{BoundingBoxResolver, LocationResolver, ResolvedPlace};
pub use submission::SubmissionParser;
