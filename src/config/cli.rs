use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use clap::Parser;

pub const DEFAULT_INPUT: &str = "sales_data.csv";
pub const DEFAULT_OUTPUT: &str = "sales_report.pdf";
pub const MAX_PREVIEW_ROWS: usize = 100;

#[derive(Debug, Clone, Parser)]
#[command(name = "sales-report")]
#[command(about = "Summarize a sales CSV into a PDF report")]
pub struct CliConfig {
    /// Sales table with Product, Quantity and Price columns
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: String,

    /// Where to write the PDF report
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Optional TOML file overriding the report style
    #[arg(long)]
    pub style: Option<String>,

    /// Rows shown in the console preview after loading
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log process CPU and memory after each phase")]
    pub monitor: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            style: None,
            preview_rows: 5,
            verbose: false,
            json_logs: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn preview_rows(&self) -> usize {
        self.preview_rows
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        if let Some(style) = &self.style {
            validate_path("style", style)?;
        }
        validate_range("preview_rows", self.preview_rows, 1, MAX_PREVIEW_ROWS)?;
        Ok(())
    }
}
