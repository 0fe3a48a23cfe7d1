use crate::core::ReportPipeline;
use crate::utils::error::{AnalysisError, Result};
use crate::utils::monitor::RunMonitor;

/// How a run ended when rendering did not fail.
#[derive(Debug)]
pub enum RunOutcome {
    /// The report was written to this path.
    Generated(String),
    /// Analysis failed; nothing was rendered or written.
    AnalysisFailed(AnalysisError),
}

pub struct ReportEngine<P: ReportPipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: ReportPipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    /// Analyzes, then renders. Analysis failures are reported in the outcome;
    /// rendering failures are returned as errors.
    pub fn run(&mut self) -> Result<RunOutcome> {
        tracing::info!("Starting sales report run");

        let analysis = match self.pipeline.analyze() {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::error!(kind = ?e.kind(), "Analysis failed: {}", e);
                println!("Error reading data: {}", e);
                self.monitor.log_final();
                return Ok(RunOutcome::AnalysisFailed(e));
            }
        };

        println!("Data loaded successfully.");
        println!("{}", analysis.table.preview(self.pipeline.preview_rows()));
        tracing::info!(
            rows = analysis.table.len(),
            categories = analysis.category_counts.len(),
            "Analysis complete"
        );
        self.monitor.log_phase("analysis");

        let output_path = self.pipeline.render(&analysis)?;
        self.monitor.log_phase("render");

        println!("PDF report generated: {}", output_path);
        tracing::info!("Report written to {}", output_path);
        self.monitor.log_final();

        Ok(RunOutcome::Generated(output_path))
    }
}
