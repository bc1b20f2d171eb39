mod export;
mod parsed;
mod submission;

pub use export::{ExportArtifact, ExportFormat, ExportOptions};
pub use parsed::{DeviceInfo, GpsSource, ParsedSubmission, UNKNOWN};
pub use submission::RawSubmission;
