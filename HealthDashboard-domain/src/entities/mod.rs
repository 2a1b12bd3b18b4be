// Domain entities and value objects
pub mod reading;
pub mod status;
pub mod report;
pub mod conversions;

// Re-export common types for easier imports
pub use reading::{Reading, SubmitReadingRequest, ReadingHistoryEntry};
pub use status::{WeightStatus, BloodPressureStatus, HeartRateStatus, CholesterolStatus, SugarStatus};
pub use report::{HealthReport, StatusLines, StatusSummary, SaveOutcome, SaveStatus};
