use crate::core::analyzer::{analyze, load_table};
use crate::core::{Analysis, ConfigProvider, ReportPipeline, Storage};
use crate::report::style::ReportStyle;
use crate::report::{build_document, pdf::render_pdf};
use crate::utils::error::{AnalysisError, ReportError, Result};

/// CSV in, PDF out, through a [`Storage`] backend.
pub struct SalesReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    style: ReportStyle,
}

impl<S: Storage, C: ConfigProvider> SalesReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_style(storage, config, ReportStyle::default())
    }

    pub fn with_style(storage: S, config: C, style: ReportStyle) -> Self {
        Self {
            storage,
            config,
            style,
        }
    }

    fn read_input(&self) -> std::result::Result<Vec<u8>, AnalysisError> {
        let path = self.config.input_path();
        self.storage.read_file(path).map_err(|e| match e {
            ReportError::IoError(source) if source.kind() == std::io::ErrorKind::NotFound => {
                AnalysisError::FileNotFound {
                    path: path.to_string(),
                }
            }
            ReportError::IoError(source) => AnalysisError::Unreadable {
                path: path.to_string(),
                source,
            },
            other => AnalysisError::Unreadable {
                path: path.to_string(),
                source: std::io::Error::other(other.to_string()),
            },
        })
    }
}

impl<S: Storage, C: ConfigProvider> ReportPipeline for SalesReportPipeline<S, C> {
    fn analyze(&self) -> std::result::Result<Analysis, AnalysisError> {
        let data = self.read_input()?;
        tracing::debug!(
            "Read {} bytes from {}",
            data.len(),
            self.config.input_path()
        );
        let table = load_table(&data)?;
        analyze(table)
    }

    fn render(&self, analysis: &Analysis) -> Result<String> {
        let document = build_document(analysis, &self.style);
        let bytes = render_pdf(&document, &self.style.title)?;

        let output_path = self.config.output_path();
        self.storage.write_file(output_path, &bytes)?;
        Ok(output_path.to_string())
    }

    fn preview_rows(&self) -> usize {
        self.config.preview_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AnalysisErrorKind;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                ReportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "in.csv"
        }

        fn output_path(&self) -> &str {
            "out.pdf"
        }

        fn preview_rows(&self) -> usize {
            3
        }
    }

    #[test]
    fn test_analyze_reads_through_storage() {
        let storage = MockStorage::with_file("in.csv", "Product,Quantity,Price\nWidget,2,9.99\n");
        let pipeline = SalesReportPipeline::new(storage, MockConfig);

        let analysis = pipeline.analyze().unwrap();
        assert_eq!(analysis.total_quantity, 2);
        assert_eq!(pipeline.preview_rows(), 3);
    }

    #[test]
    fn test_missing_input_is_file_not_found() {
        let pipeline = SalesReportPipeline::new(MockStorage::default(), MockConfig);
        let err = pipeline.analyze().unwrap_err();
        assert_eq!(err.kind(), AnalysisErrorKind::FileNotFound);
        assert_eq!(err.to_string(), "File not found: in.csv");
    }

    #[test]
    fn test_render_writes_pdf_to_output_path() {
        let storage = MockStorage::with_file("in.csv", "Product,Quantity,Price\nWidget,2,9.99\n");
        let pipeline = SalesReportPipeline::new(storage, MockConfig);

        let analysis = pipeline.analyze().unwrap();
        let path = pipeline.render(&analysis).unwrap();

        assert_eq!(path, "out.pdf");
        let files = pipeline.storage.files.borrow();
        assert!(files["out.pdf"].starts_with(b"%PDF"));
    }
}
