pub mod assembler;
pub mod dataset;
pub mod engine;
pub mod render;
pub mod selector;
pub mod topology;
pub mod viewer;

pub use crate::domain::model::{DiagramSet, NamedFigure};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
