use crate::core::{DiagramSet, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct DiagramEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> DiagramEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract → transform → load once and returns the written figure locations.
    pub fn run(&mut self) -> Result<Vec<String>> {
        let diagrams = self.render()?;
        self.publish(diagrams)
    }

    /// Extract and transform only; nothing is written.
    pub fn render(&mut self) -> Result<DiagramSet> {
        let input = self.extract()?;
        self.transform(input)
    }

    /// Loads the pipeline's inputs without deriving anything from them.
    pub fn extract(&mut self) -> Result<P::Input> {
        tracing::info!("Starting {} pipeline...", self.pipeline.name());

        tracing::info!("Loading inputs...");
        let input = self.pipeline.extract()?;
        self.monitor.log_phase("Extract");

        Ok(input)
    }

    pub fn transform(&mut self, input: P::Input) -> Result<DiagramSet> {
        tracing::info!("Assembling {} series and rendering figures...", self.pipeline.name());
        let diagrams = self.pipeline.transform(input)?;
        tracing::info!("Rendered {} figures", diagrams.len());
        self.monitor.log_phase("Transform");

        Ok(diagrams)
    }

    /// Writes diagrams previously produced by [`DiagramEngine::render`].
    pub fn publish(&mut self, diagrams: DiagramSet) -> Result<Vec<String>> {
        tracing::info!("Writing {} figures...", self.pipeline.name());
        let outputs = self.pipeline.load(diagrams)?;
        for output in &outputs {
            tracing::info!("Figure saved to: {}", output);
        }
        self.monitor.log_phase("Load");
        self.monitor.log_final_stats();

        Ok(outputs)
    }
}
