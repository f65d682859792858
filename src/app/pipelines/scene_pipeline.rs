use crate::app::pipelines::write_figures;
use crate::config::girders::bridge_girders;
use crate::core::assembler::assemble_segments;
use crate::core::dataset::ResultDataset;
use crate::core::render::{render_3d, SceneLabels};
use crate::core::topology::Topology;
use crate::core::{ConfigProvider, DiagramSet, NamedFigure, Pipeline, Storage};
use crate::domain::model::{Girder, Quantity};
use crate::utils::error::{DiagramError, Result};

/// Topology and results needed to extrude the deck diagrams.
#[derive(Debug, Clone)]
pub struct SceneInputs {
    pub topology: Topology,
    pub dataset: ResultDataset,
}

/// 3D diagrams across every girder, with force values extruded along y.
pub struct ScenePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    girders: Vec<Girder>,
}

impl<S: Storage, C: ConfigProvider> ScenePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_girders(storage, config, bridge_girders())
    }

    pub fn with_girders(storage: S, config: C, girders: Vec<Girder>) -> Self {
        Self {
            storage,
            config,
            girders,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

pub fn scene_title(quantity: Quantity) -> String {
    format!("3D {} Diagram ({})", quantity.name(), quantity.diagram_abbreviation())
}

pub fn scene_file_name(quantity: Quantity) -> String {
    format!("{}_3d.html", quantity.diagram_abbreviation().to_lowercase())
}

fn scene_labels(quantity: Quantity) -> SceneLabels {
    SceneLabels {
        x: "Bridge Length (X)".to_string(),
        y: format!("{} ({})", quantity.name(), quantity.symbol()),
        z: "Bridge Width (Z)".to_string(),
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ScenePipeline<S, C> {
    type Input = SceneInputs;

    fn name(&self) -> &str {
        "scene"
    }

    /// Topology is loaded before the dataset is touched.
    fn extract(&self) -> Result<SceneInputs> {
        let nodes = self
            .config
            .nodes_path()
            .ok_or_else(|| DiagramError::MissingConfigError {
                field: "nodes".to_string(),
            })?;
        let elements = self
            .config
            .elements_path()
            .ok_or_else(|| DiagramError::MissingConfigError {
                field: "elements".to_string(),
            })?;

        let topology = Topology::load(nodes, elements)?;
        let dataset = ResultDataset::open(self.config.dataset_path())?;

        Ok(SceneInputs { topology, dataset })
    }

    fn transform(&self, input: SceneInputs) -> Result<DiagramSet> {
        let mut figures = Vec::with_capacity(Quantity::ALL.len());

        for quantity in Quantity::ALL {
            let segments =
                assemble_segments(&self.girders, &input.topology, &input.dataset, quantity)?;
            tracing::info!(
                "Assembled {} {} segments across {} girders",
                segments.len(),
                quantity.symbol(),
                self.girders.len()
            );

            figures.push(NamedFigure {
                file_name: scene_file_name(quantity),
                figure: render_3d(&segments, &scene_title(quantity), &scene_labels(quantity)),
            });
        }

        Ok(DiagramSet {
            figures,
            ..DiagramSet::default()
        })
    }

    fn load(&self, diagrams: DiagramSet) -> Result<Vec<String>> {
        write_figures(&self.storage, diagrams)
    }
}
