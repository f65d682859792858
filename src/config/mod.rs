pub mod cli;
pub mod girders;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DATASET_EXTENSIONS: [&str; 2] = ["json", "csv"];
pub const TOPOLOGY_EXTENSIONS: [&str; 1] = ["json"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiagramSelection {
    /// 2D BMD/SFD of the central girder
    Profile,
    /// 3D BMD/SFD across all girders
    Scene,
    All,
}

#[cfg(feature = "cli")]
impl DiagramSelection {
    pub fn includes_profile(&self) -> bool {
        matches!(self, DiagramSelection::Profile | DiagramSelection::All)
    }

    pub fn includes_scene(&self) -> bool {
        matches!(self, DiagramSelection::Scene | DiagramSelection::All)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "girder-diagrams")]
#[command(about = "Bending moment and shear force diagrams for bridge girders")]
pub struct CliConfig {
    /// Result dataset (.json xarray dict or long .csv table)
    #[arg(long, default_value = "screening_task.json")]
    pub dataset: String,

    /// Node coordinates (JSON object of id -> [x, y, z])
    #[arg(long)]
    pub nodes: Option<String>,

    /// Element connectivity (JSON object of id -> [start, end])
    #[arg(long)]
    pub elements: Option<String>,

    #[arg(long, default_value = "./figures")]
    pub output_path: String,

    #[arg(long, value_enum, default_value_t = DiagramSelection::All)]
    pub diagram: DiagramSelection,

    #[arg(long, help = "Open written figures in the default viewer")]
    pub open: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase CPU/memory statistics")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn dataset_path(&self) -> &str {
        &self.dataset
    }

    fn nodes_path(&self) -> Option<&str> {
        self.nodes.as_deref()
    }

    fn elements_path(&self) -> Option<&str> {
        self.elements.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn open_figures(&self) -> bool {
        self.open
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_file_extension("dataset", &self.dataset, &DATASET_EXTENSIONS)?;
        validation::validate_path("output_path", &self.output_path)?;

        if self.diagram.includes_scene() {
            let nodes = validation::validate_required_field("nodes", &self.nodes)?;
            let elements = validation::validate_required_field("elements", &self.elements)?;
            validation::validate_file_extension("nodes", nodes, &TOPOLOGY_EXTENSIONS)?;
            validation::validate_file_extension("elements", elements, &TOPOLOGY_EXTENSIONS)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::error::DiagramError;

    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "girder-diagrams",
            "--dataset",
            "data/screening_task.csv",
            "--nodes",
            "data/nodes.json",
            "--elements",
            "data/elements.json",
            "--diagram",
            "scene",
        ]);

        assert_eq!(config.dataset_path(), "data/screening_task.csv");
        assert_eq!(config.output_path(), "./figures");
        assert!(config.diagram.includes_scene());
        assert!(!config.diagram.includes_profile());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scene_requires_topology() {
        let config = CliConfig::parse_from(["girder-diagrams", "--diagram", "all"]);
        assert!(matches!(
            config.validate(),
            Err(DiagramError::MissingConfigError { .. })
        ));

        let profile_only = CliConfig::parse_from(["girder-diagrams", "--diagram", "profile"]);
        assert!(profile_only.validate().is_ok());
    }
}
