use crate::app::pipelines::write_figures;
use crate::config::girders::central_girder;
use crate::core::assembler::{assemble_girder_profile, continuity_gaps};
use crate::core::dataset::ResultDataset;
use crate::core::render::{index_axis, render_2d, AxisLabels};
use crate::core::{ConfigProvider, DiagramSet, NamedFigure, Pipeline, Storage};
use crate::domain::model::{Girder, GirderProfile, Quantity};
use crate::utils::error::Result;

const CONTINUITY_TOLERANCE: f64 = 1e-6;

/// 2D bending moment and shear force diagrams along a single girder.
pub struct ProfilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    girder: Girder,
}

impl<S: Storage, C: ConfigProvider> ProfilePipeline<S, C> {
    /// Plots the central girder.
    pub fn new(storage: S, config: C) -> Self {
        Self::with_girder(storage, config, central_girder())
    }

    pub fn with_girder(storage: S, config: C, girder: Girder) -> Self {
        Self {
            storage,
            config,
            girder,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

pub fn profile_title(quantity: Quantity) -> String {
    format!("{} Diagram (Central Girder)", quantity.name())
}

pub fn profile_file_name(quantity: Quantity) -> String {
    format!("{}_central_girder.html", quantity.diagram_abbreviation().to_lowercase())
}

fn profile_labels(quantity: Quantity) -> AxisLabels {
    AxisLabels {
        x: "Node Index along Girder".to_string(),
        y: format!("{} ({})", quantity.name(), quantity.unit()),
        series: format!("{} ({})", quantity.name(), quantity.symbol()),
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ProfilePipeline<S, C> {
    type Input = ResultDataset;

    fn name(&self) -> &str {
        "profile"
    }

    fn extract(&self) -> Result<ResultDataset> {
        ResultDataset::open(self.config.dataset_path())
    }

    fn transform(&self, dataset: ResultDataset) -> Result<DiagramSet> {
        let profile = assemble_girder_profile(&self.girder, &dataset)?;

        let mut figures = Vec::with_capacity(Quantity::ALL.len());
        for quantity in Quantity::ALL {
            let samples = profile.series(quantity);
            let figure = render_2d(
                &index_axis(samples.len()),
                samples,
                &profile_title(quantity),
                &profile_labels(quantity),
            )?;
            figures.push(NamedFigure {
                file_name: profile_file_name(quantity),
                figure,
            });
        }

        Ok(DiagramSet {
            figures,
            profiles: vec![profile],
        })
    }

    fn load(&self, diagrams: DiagramSet) -> Result<Vec<String>> {
        for profile in &diagrams.profiles {
            report_profile(profile);
        }
        write_figures(&self.storage, diagrams)
    }
}

/// Logs the sampled series and any end-to-end discontinuities along them.
fn report_profile(profile: &GirderProfile) {
    for quantity in Quantity::ALL {
        let samples = profile.series(quantity);
        tracing::info!(
            "{} ({}) along {}: {:?}",
            quantity.name(),
            quantity.symbol(),
            profile.girder,
            samples
        );

        let gaps = continuity_gaps(samples, CONTINUITY_TOLERANCE);
        if gaps.is_empty() {
            continue;
        }
        tracing::debug!(
            "{} has {} j/i end discontinuities along {}",
            quantity.symbol(),
            gaps.len(),
            profile.girder
        );
        for gap in &gaps {
            tracing::debug!(
                "  after position {}: j-end {} -> next i-end {} (jump {})",
                gap.position,
                gap.j_end,
                gap.next_i_end,
                gap.jump()
            );
        }
    }
}
