//! Figures in the plotly.js schema, rendered to standalone HTML pages.

use crate::domain::model::Segment;
use crate::utils::error::{DiagramError, Result};
use serde::Serialize;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const SEGMENT_LINE_WIDTH: f64 = 6.0;
const SCENE_HEIGHT: u32 = 700;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(Scatter),
    Scatter3d(Scatter3d),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter3d {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: String,
    pub line: LineStyle,
    pub name: String,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
}

fn axis(text: &str) -> Axis {
    Axis {
        title: Title {
            text: text.to_string(),
        },
    }
}

/// Labels for a 2D diagram; `series` names the single trace.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub series: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLabels {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// `0, 1, 2, ...` positions for a sample sequence.
pub fn index_axis(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

/// A single lines+markers trace through the samples, in input order.
pub fn render_2d(x: &[f64], y: &[f64], title: &str, labels: &AxisLabels) -> Result<Figure> {
    if x.len() != y.len() {
        return Err(DiagramError::render(format!(
            "x has {} samples but y has {}",
            x.len(),
            y.len()
        )));
    }

    Ok(Figure {
        data: vec![Trace::Scatter(Scatter {
            x: x.to_vec(),
            y: y.to_vec(),
            mode: "lines+markers".to_string(),
            name: labels.series.clone(),
        })],
        layout: Layout {
            title: Title {
                text: title.to_string(),
            },
            xaxis: Some(axis(&labels.x)),
            yaxis: Some(axis(&labels.y)),
            scene: None,
            height: None,
        },
    })
}

/// One legend-less 3D line per segment.
pub fn render_3d(segments: &[Segment], title: &str, labels: &SceneLabels) -> Figure {
    let data = segments
        .iter()
        .map(|segment| {
            Trace::Scatter3d(Scatter3d {
                x: vec![segment.start[0], segment.end[0]],
                y: vec![segment.start[1], segment.end[1]],
                z: vec![segment.start[2], segment.end[2]],
                mode: "lines".to_string(),
                line: LineStyle {
                    width: SEGMENT_LINE_WIDTH,
                },
                name: segment.label.clone(),
                showlegend: false,
            })
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Title {
                text: title.to_string(),
            },
            xaxis: None,
            yaxis: None,
            scene: Some(Scene {
                xaxis: axis(&labels.x),
                yaxis: axis(&labels.y),
                zaxis: axis(&labels.z),
            }),
            height: Some(SCENE_HEIGHT),
        },
    }
}

impl Figure {
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// A self-contained page that draws the figure with plotly.js.
    pub fn to_html(&self) -> Result<String> {
        // Keep `</script>` inside string values from closing the tag early.
        let json = self.to_json()?.replace("</", "<\\/");
        let title = html_escape(&self.layout.title.text);
        let generated = chrono::Utc::now().to_rfc3339();

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="generator" content="girder-diagrams {version}">
<meta name="created" content="{generated}">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="figure" style="width:100%;"></div>
<script>
const figure = {json};
Plotly.newPlot("figure", figure.data, figure.layout);
</script>
</body>
</html>
"#,
            version = env!("CARGO_PKG_VERSION"),
            generated = generated,
            title = title,
            cdn = PLOTLY_CDN,
            json = json,
        ))
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
