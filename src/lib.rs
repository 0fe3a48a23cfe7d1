pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::pipelines::SalesReportPipeline;
pub use config::StyleConfig;
pub use core::engine::{ReportEngine, RunOutcome};
pub use domain::model::{Analysis, CategoryCount, RecordTable, SalesRecord};
pub use report::style::{ReportStyle, TableStyle};
pub use utils::error::{AnalysisError, AnalysisErrorKind, ReportError, Result};
