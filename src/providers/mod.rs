pub mod metadata;
pub mod schedule;

pub use metadata::{HttpMetadataProvider, MetadataProvider, RetrievedMovie};
pub use schedule::{HttpScheduleProvider, ScheduleProvider};
