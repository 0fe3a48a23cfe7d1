pub mod analyzer;
pub mod engine;

pub use crate::domain::model::{Analysis, RecordTable};
pub use crate::domain::ports::{ConfigProvider, ReportPipeline, Storage};
pub use crate::utils::error::Result;
