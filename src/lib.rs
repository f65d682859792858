pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, DiagramSelection};

pub use app::pipelines::{profile_pipeline::ProfilePipeline, scene_pipeline::ScenePipeline};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::engine::DiagramEngine;
pub use utils::error::{DiagramError, Result};
