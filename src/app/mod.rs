pub mod pipelines;

use crate::config::cli::LocalStorage;
use crate::config::girders::{bridge_girders, central_girder};
use crate::core::engine::DiagramEngine;
use crate::core::viewer::open_in_viewer;
use crate::core::ConfigProvider;
use crate::domain::model::Quantity;
use crate::utils::error::Result;
use pipelines::profile_pipeline::{profile_file_name, ProfilePipeline};
use pipelines::scene_pipeline::{scene_file_name, ScenePipeline};

/// Renders the requested diagram families, writes them, then optionally opens them.
///
/// Phases run across all selected families in lockstep: every input is loaded
/// (topology ahead of the result dataset) before anything is derived, and every
/// figure is rendered before the first file is written.
pub fn run_diagrams<C: ConfigProvider + Clone>(
    config: &C,
    profile: bool,
    scene: bool,
    monitor_enabled: bool,
) -> Result<Vec<String>> {
    run_diagrams_with_viewer(config, profile, scene, monitor_enabled, open_in_viewer)
}

/// [`run_diagrams`] with the viewer supplied by the caller.
pub fn run_diagrams_with_viewer<C, V>(
    config: &C,
    profile: bool,
    scene: bool,
    monitor_enabled: bool,
    viewer: V,
) -> Result<Vec<String>>
where
    C: ConfigProvider + Clone,
    V: FnMut(&str) -> Result<()>,
{
    let storage = LocalStorage::new(config.output_path().to_string());

    let mut profile_engine = profile.then(|| {
        DiagramEngine::new_with_monitoring(
            ProfilePipeline::new(storage.clone(), config.clone()),
            monitor_enabled,
        )
    });
    let mut scene_engine = scene.then(|| {
        DiagramEngine::new_with_monitoring(
            ScenePipeline::new(storage.clone(), config.clone()),
            monitor_enabled,
        )
    });

    let scene_input = match scene_engine.as_mut() {
        Some(engine) => Some(engine.extract()?),
        None => None,
    };
    let profile_input = match profile_engine.as_mut() {
        Some(engine) => Some(engine.extract()?),
        None => None,
    };

    let profile_diagrams = match (profile_engine.as_mut(), profile_input) {
        (Some(engine), Some(input)) => Some(engine.transform(input)?),
        _ => None,
    };
    let scene_diagrams = match (scene_engine.as_mut(), scene_input) {
        (Some(engine), Some(input)) => Some(engine.transform(input)?),
        _ => None,
    };

    let mut outputs = Vec::new();
    if let (Some(engine), Some(diagrams)) = (profile_engine.as_mut(), profile_diagrams) {
        outputs.extend(engine.publish(diagrams)?);
    }
    if let (Some(engine), Some(diagrams)) = (scene_engine.as_mut(), scene_diagrams) {
        outputs.extend(engine.publish(diagrams)?);
    }

    if config.open_figures() {
        open_figures(&outputs, viewer);
    }

    Ok(outputs)
}

/// Hands each written figure to `viewer`; failures are logged, not returned.
///
/// Returns how many figures were opened.
pub fn open_figures<V: FnMut(&str) -> Result<()>>(locations: &[String], mut viewer: V) -> usize {
    let mut opened = 0;
    for location in locations {
        match viewer(location) {
            Ok(()) => opened += 1,
            Err(e) => tracing::warn!("⚠️ Could not open {} in a viewer: {}", location, e),
        }
    }
    opened
}

/// What a run would plot and write, built from configuration alone.
///
/// No input file is opened, so nothing in the report is derived from data.
pub fn dry_run_report<C: ConfigProvider>(config: &C, profile: bool, scene: bool) -> String {
    let mut lines = vec!["🔍 Dry Run Analysis:".to_string()];

    if profile {
        let girder = central_girder();
        lines.push(String::new());
        lines.push(format!("📈 2D diagrams ({}):", girder.name));
        lines.push(format!("  Dataset: {}", config.dataset_path()));
        lines.push(format!("  Elements: {:?}", girder.elements));
        lines.push(format!("  Samples per diagram: {}", girder.len() * 2));
        lines.push(format!("  Files: {}", file_names(profile_file_name)));
    }

    if scene {
        let girders = bridge_girders();
        let segments: usize = girders.iter().map(|g| g.len()).sum();
        lines.push(String::new());
        lines.push(format!("🧊 3D diagrams ({} girders):", girders.len()));
        lines.push(format!("  Nodes: {}", config.nodes_path().unwrap_or("-")));
        lines.push(format!("  Elements: {}", config.elements_path().unwrap_or("-")));
        for girder in &girders {
            lines.push(format!("  {}: {:?}", girder.name, girder.elements));
        }
        lines.push(format!("  Segments per diagram: {}", segments));
        lines.push(format!("  Files: {}", file_names(scene_file_name)));
    }

    lines.push(String::new());
    lines.push(format!("  Output: {}", config.output_path()));
    lines.push("✅ Dry run analysis complete.".to_string());
    lines.join("\n")
}

fn file_names(name: fn(Quantity) -> String) -> String {
    Quantity::ALL
        .iter()
        .map(|quantity| name(*quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DiagramError;

    #[test]
    fn test_viewer_failures_are_not_fatal() {
        let locations = vec!["a.html".to_string(), "b.html".to_string()];
        let mut attempted = Vec::new();

        let opened = open_figures(&locations, |location| {
            attempted.push(location.to_string());
            if location == "a.html" {
                Err(DiagramError::render("no viewer available"))
            } else {
                Ok(())
            }
        });

        assert_eq!(opened, 1);
        assert_eq!(attempted, locations);
    }
}
