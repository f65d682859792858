#![allow(dead_code)]

use girder_diagrams::config::girders::bridge_girders;
use girder_diagrams::TomlConfig;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Nodes, elements and a CSV dataset covering all five bridge girders.
    ///
    /// Girder `g` element `k` spans nodes `g*100 + k` to `g*100 + k + 1`, laid
    /// out along x at `z = 2g`. Its moments are `Mz_i = 10g + k` and
    /// `Mz_j = -(10g + k)`; its shears are `Vy_i = k` and `Vy_j = k + 0.5`.
    pub fn bridge() -> Self {
        let dir = TempDir::new().unwrap();

        let mut nodes = serde_json::Map::new();
        let mut elements = serde_json::Map::new();
        let mut csv = String::from("Element,Component,forces\n");

        for (g, girder) in bridge_girders().iter().enumerate() {
            for (k, element) in girder.elements.iter().enumerate() {
                let start = (g * 100 + k) as u32;
                let end = start + 1;
                for (id, x) in [(start, k as f64 * 5.0), (end, (k + 1) as f64 * 5.0)] {
                    nodes.insert(id.to_string(), serde_json::json!([x, 0.0, g as f64 * 2.0]));
                }
                elements.insert(element.to_string(), serde_json::json!([start, end]));

                let base = (10 * g + k) as f64;
                writeln!(csv, "{},Mz_i,{}", element, base).unwrap();
                writeln!(csv, "{},Mz_j,{}", element, -base).unwrap();
                writeln!(csv, "{},Vy_i,{}", element, k as f64).unwrap();
                writeln!(csv, "{},Vy_j,{}", element, k as f64 + 0.5).unwrap();
            }
        }

        let fixture = Self { dir };
        fixture.write("nodes.json", &serde_json::Value::Object(nodes).to_string());
        fixture.write("elements.json", &serde_json::Value::Object(elements).to_string());
        fixture.write("screening_task.csv", &csv);
        fixture
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path(name), content).unwrap();
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path("figures")
    }

    /// A TOML config pointing at this fixture's files.
    pub fn config(&self, dataset: &str, profile: bool, scene: bool) -> TomlConfig {
        let toml_content = format!(
            r#"
[project]
name = "fixture"

[inputs]
dataset = "{dataset}"
nodes = "{nodes}"
elements = "{elements}"

[output]
path = "{output}"

[diagrams]
profile = {profile}
scene = {scene}
"#,
            dataset = toml_path(&self.path(dataset)),
            nodes = toml_path(&self.path("nodes.json")),
            elements = toml_path(&self.path("elements.json")),
            output = toml_path(&self.output_dir()),
            profile = profile,
            scene = scene,
        );
        TomlConfig::from_toml_str(&toml_content).unwrap()
    }

    pub fn written_figures(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.output_dir()) {
            Ok(entries) => entries
                .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Pulls the embedded figure JSON back out of a written HTML page.
pub fn figure_json(html: &str) -> serde_json::Value {
    let start = html.find("const figure = ").unwrap() + "const figure = ".len();
    let end = start + html[start..].find(";\n").unwrap();
    serde_json::from_str(&html[start..end].replace("<\\/", "</")).unwrap()
}
