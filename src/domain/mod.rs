// Domain layer: models and ports (interfaces). `NamedFigure` wraps the rendered
// figure type from `core::render`; everything else is plain std/serde data.

pub mod model;
pub mod ports;
