use crate::domain::model::Analysis;
use crate::utils::error::{AnalysisError, Result};

/// Whole-file byte access. Reads and writes complete in one call.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn preview_rows(&self) -> usize;
}

pub trait ReportPipeline {
    fn analyze(&self) -> std::result::Result<Analysis, AnalysisError>;
    /// Writes the report and returns the path it was written to.
    fn render(&self, analysis: &Analysis) -> Result<String>;
    fn preview_rows(&self) -> usize;
}
