pub mod check;
pub mod delta;
pub mod delta_tracker;
pub mod export;
pub mod journal;
pub mod log;
pub mod show;
pub mod sync;
pub mod upload;

pub use delta_tracker::DeltaTracker;
pub use upload::{FailurePolicy, UploadReport, UploadSession};
