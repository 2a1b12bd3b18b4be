// Domain services
// Pure classification and scoring, plus the report service that ties them to storage.

pub mod classification;
pub mod suggestions;
pub mod scores;
pub mod chart;
pub mod report;
pub mod report_service;

pub use chart::{ChartDataset, ChartJsRenderer, ChartRenderer};
pub use report::build_report;
pub use report_service::{
    create_default_report_service, ReportService, ReportServiceError, ReportServiceTrait, SharedSaveEndpoint,
};
