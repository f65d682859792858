//! Read-only access to the labeled `forces` table of a result dataset.
//!
//! Two on-disk layouts are understood, chosen by file extension:
//!
//! * `.json` - the layout written by xarray's `Dataset.to_dict()`, with
//!   `Element` and `Component` coordinates and a `forces` data variable.
//! * `.csv` - the long table from `ds["forces"].to_dataframe().reset_index()`,
//!   one row per `(Element, Component)` cell.
//!
//! `null`, bare `NaN` and empty CSV values all mark an absent cell.

use crate::domain::model::ElementId;
use crate::utils::error::{DiagramError, Result};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const FORCES_VARIABLE: &str = "forces";
pub const ELEMENT_DIM: &str = "Element";
pub const COMPONENT_DIM: &str = "Component";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultDataset {
    elements: Vec<ElementId>,
    element_index: HashMap<ElementId, usize>,
    components: Vec<String>,
    component_index: HashMap<String, usize>,
    /// Row-major `elements × components`; `None` marks an absent cell.
    cells: Vec<Option<f64>>,
}

impl ResultDataset {
    /// Builds a dataset from its two indexes and a row-major grid of cells.
    pub fn from_grid(
        elements: Vec<ElementId>,
        components: Vec<String>,
        cells: Vec<Option<f64>>,
    ) -> std::result::Result<Self, String> {
        if cells.len() != elements.len() * components.len() {
            return Err(format!(
                "'{}' holds {} cells but the {} x {} index needs {}",
                FORCES_VARIABLE,
                cells.len(),
                elements.len(),
                components.len(),
                elements.len() * components.len()
            ));
        }

        let mut element_index = HashMap::with_capacity(elements.len());
        for (position, id) in elements.iter().enumerate() {
            if element_index.insert(*id, position).is_some() {
                return Err(format!("duplicate {} label {}", ELEMENT_DIM, id));
            }
        }

        let mut component_index = HashMap::with_capacity(components.len());
        for (position, label) in components.iter().enumerate() {
            if component_index.insert(label.clone(), position).is_some() {
                return Err(format!("duplicate {} label '{}'", COMPONENT_DIM, label));
            }
        }

        Ok(Self {
            elements,
            element_index,
            components,
            component_index,
            cells,
        })
    }

    /// Builds a dataset from sparse `(element, component, value)` cells.
    /// Index order follows first appearance; unlisted cells are absent.
    pub fn from_cells<I, S>(cells: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = (ElementId, S, f64)>,
        S: Into<String>,
    {
        let mut elements: Vec<ElementId> = Vec::new();
        let mut element_index: HashMap<ElementId, usize> = HashMap::new();
        let mut components: Vec<String> = Vec::new();
        let mut component_index: HashMap<String, usize> = HashMap::new();
        let mut sparse: HashMap<(usize, usize), f64> = HashMap::new();

        for (element, component, value) in cells {
            let component = component.into();
            let row = *element_index.entry(element).or_insert_with(|| {
                elements.push(element);
                elements.len() - 1
            });
            let col = match component_index.get(&component) {
                Some(col) => *col,
                None => {
                    components.push(component.clone());
                    component_index.insert(component.clone(), components.len() - 1);
                    components.len() - 1
                }
            };
            if sparse.insert((row, col), value).is_some() {
                return Err(format!(
                    "duplicate cell for {}={}, {}='{}'",
                    ELEMENT_DIM, element, COMPONENT_DIM, component
                ));
            }
        }

        let width = components.len();
        let mut grid = vec![None; elements.len() * width];
        for ((row, col), value) in sparse {
            grid[row * width + col] = Some(value);
        }

        Self::from_grid(elements, components, grid)
    }

    /// Opens a dataset file, picking the reader from its extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(DiagramError::dataset_open(&display, "file not found"));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let dataset = match extension.as_deref() {
            Some("json") => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| DiagramError::dataset_open(&display, e.to_string()))?;
                Self::from_xarray_json(&content)
            }
            Some("csv") => {
                let reader = csv::Reader::from_path(path)
                    .map_err(|e| DiagramError::dataset_open(&display, e.to_string()))?;
                Self::from_long_csv(reader)
            }
            Some("nc") | Some("nc4") => Err(
                "netCDF files are not read directly; export with Dataset.to_dict() to JSON or to a long CSV table"
                    .to_string(),
            ),
            other => Err(format!(
                "unsupported dataset format {:?}; expected .json or .csv",
                other.unwrap_or("")
            )),
        }
        .map_err(|message| DiagramError::dataset_open(&display, message))?;

        tracing::info!(
            "Result dataset loaded successfully: {} ({} elements x {} components: {})",
            path.display(),
            dataset.element_count(),
            dataset.component_count(),
            dataset.components.join(", ")
        );

        Ok(dataset)
    }

    /// Parses xarray's `Dataset.to_dict()` JSON output.
    pub fn from_xarray_json(content: &str) -> std::result::Result<Self, String> {
        let content = null_bare_nan(content);
        let doc: XarrayDict =
            serde_json::from_str(&content).map_err(|e| format!("not an xarray dict: {}", e))?;

        let forces = doc
            .data_vars
            .get(FORCES_VARIABLE)
            .ok_or_else(|| format!("missing data variable '{}'", FORCES_VARIABLE))?;

        let elements: Vec<ElementId> = coordinate_data(&doc, ELEMENT_DIM)?;
        let components: Vec<String> = coordinate_data(&doc, COMPONENT_DIM)?;

        let element_first = match forces.dims.as_slice() {
            [a, b] if a == ELEMENT_DIM && b == COMPONENT_DIM => true,
            [a, b] if a == COMPONENT_DIM && b == ELEMENT_DIM => false,
            dims => {
                return Err(format!(
                    "'{}' must have dims [{}, {}], found {:?}",
                    FORCES_VARIABLE, ELEMENT_DIM, COMPONENT_DIM, dims
                ))
            }
        };

        let rows: Vec<Vec<Option<f64>>> = serde_json::from_value(forces.data.clone())
            .map_err(|e| format!("'{}' data is not a 2D numeric array: {}", FORCES_VARIABLE, e))?;

        let (outer, inner) = if element_first {
            (elements.len(), components.len())
        } else {
            (components.len(), elements.len())
        };
        if rows.len() != outer || rows.iter().any(|row| row.len() != inner) {
            return Err(format!(
                "'{}' data shape does not match coordinates ({} x {})",
                FORCES_VARIABLE, outer, inner
            ));
        }

        let cells = if element_first {
            rows.into_iter().flatten().collect()
        } else {
            let mut cells = vec![None; elements.len() * components.len()];
            for (col, row) in rows.into_iter().enumerate() {
                for (element_row, value) in row.into_iter().enumerate() {
                    cells[element_row * components.len() + col] = value;
                }
            }
            cells
        };

        Self::from_grid(elements, components, cells)
    }

    /// Parses the long `Element,Component,forces` table.
    pub fn from_long_csv<R: std::io::Read>(
        mut reader: csv::Reader<R>,
    ) -> std::result::Result<Self, String> {
        let mut cells = Vec::new();
        let mut seen: HashSet<(ElementId, String)> = HashSet::new();
        for (line, row) in reader.deserialize::<LongRow>().enumerate() {
            let row = row.map_err(|e| format!("row {}: {}", line + 1, e))?;
            if !seen.insert((row.element, row.component.clone())) {
                return Err(format!(
                    "row {}: duplicate cell for {}={}, {}='{}'",
                    line + 1,
                    ELEMENT_DIM,
                    row.element,
                    COMPONENT_DIM,
                    row.component
                ));
            }
            match row.forces {
                Some(value) => cells.push((row.element, row.component, value)),
                None => tracing::debug!(
                    "Skipping empty cell for element {} component {}",
                    row.element,
                    row.component
                ),
            }
        }
        if cells.is_empty() {
            return Err(format!("no '{}' rows found", FORCES_VARIABLE));
        }
        Self::from_cells(cells)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn element_position(&self, element: ElementId) -> Option<usize> {
        self.element_index.get(&element).copied()
    }

    pub fn component_position(&self, component: &str) -> Option<usize> {
        self.component_index.get(component).copied()
    }

    /// The cell at `(row, col)` of the grid, if present.
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.components.len() {
            return None;
        }
        self.cells
            .get(row * self.components.len() + col)
            .copied()
            .flatten()
    }
}

#[derive(Debug, Deserialize)]
struct XarrayDict {
    #[serde(default)]
    coords: HashMap<String, XarrayVariable>,
    #[serde(default)]
    data_vars: HashMap<String, XarrayVariable>,
}

#[derive(Debug, Deserialize)]
struct XarrayVariable {
    #[serde(default)]
    dims: Vec<String>,
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct LongRow {
    #[serde(rename = "Element")]
    element: ElementId,
    #[serde(rename = "Component")]
    component: String,
    #[serde(rename = "forces")]
    forces: Option<f64>,
}

/// Python's `json.dump` writes missing floats as a bare `NaN`, which is not
/// JSON. Those tokens become `null` so they read as absent cells; text inside
/// string literals is left alone.
fn null_bare_nan(content: &str) -> Cow<'_, str> {
    if !content.contains("NaN") {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = content;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if rest.starts_with("NaN") {
            out.push_str("null");
            rest = &rest[3..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(out)
}

fn coordinate_data<T: serde::de::DeserializeOwned>(
    doc: &XarrayDict,
    dim: &str,
) -> std::result::Result<Vec<T>, String> {
    let coord = doc
        .coords
        .get(dim)
        .ok_or_else(|| format!("missing coordinate '{}'", dim))?;
    serde_json::from_value(coord.data.clone())
        .map_err(|e| format!("coordinate '{}' has unexpected labels: {}", dim, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ELEMENT_FIRST: &str = r#"{
        "attrs": {},
        "dims": {"Element": 2, "Component": 4},
        "coords": {
            "Element": {"dims": ["Element"], "attrs": {}, "data": [15, 24]},
            "Component": {"dims": ["Component"], "attrs": {}, "data": ["Mz_i", "Mz_j", "Vy_i", "Vy_j"]}
        },
        "data_vars": {
            "forces": {
                "dims": ["Element", "Component"],
                "attrs": {},
                "data": [[10.0, -5.0, 3.0, 3.5], [8.0, -2.0, null, 1.0]]
            }
        }
    }"#;

    const COMPONENT_FIRST: &str = r#"{
        "coords": {
            "Element": {"dims": ["Element"], "data": [15, 24]},
            "Component": {"dims": ["Component"], "data": ["Mz_i", "Mz_j"]}
        },
        "data_vars": {
            "forces": {"dims": ["Component", "Element"], "data": [[10.0, 8.0], [-5.0, -2.0]]}
        }
    }"#;

    fn cell(dataset: &ResultDataset, element: ElementId, component: &str) -> Option<f64> {
        dataset.value_at(
            dataset.element_position(element)?,
            dataset.component_position(component)?,
        )
    }

    #[test]
    fn test_parse_xarray_dict() {
        let dataset = ResultDataset::from_xarray_json(ELEMENT_FIRST).unwrap();
        assert_eq!(dataset.element_count(), 2);
        assert_eq!(dataset.component_count(), 4);
        assert_eq!(cell(&dataset, 15, "Mz_i"), Some(10.0));
        assert_eq!(cell(&dataset, 24, "Mz_j"), Some(-2.0));
        assert_eq!(cell(&dataset, 24, "Vy_i"), None);
    }

    #[test]
    fn test_transposed_dims_select_same_cells() {
        let dataset = ResultDataset::from_xarray_json(COMPONENT_FIRST).unwrap();
        assert_eq!(cell(&dataset, 15, "Mz_i"), Some(10.0));
        assert_eq!(cell(&dataset, 15, "Mz_j"), Some(-5.0));
        assert_eq!(cell(&dataset, 24, "Mz_i"), Some(8.0));
        assert_eq!(cell(&dataset, 24, "Mz_j"), Some(-2.0));
    }

    #[test]
    fn test_missing_forces_variable_is_rejected() {
        let content = r#"{"coords": {}, "data_vars": {"stress": {"dims": [], "data": 1.0}}}"#;
        let err = ResultDataset::from_xarray_json(content).unwrap_err();
        assert!(err.contains("forces"));
    }

    #[test]
    fn test_unexpected_dims_are_rejected() {
        let content = ELEMENT_FIRST.replace(r#"["Element", "Component"]"#, r#"["Element", "LoadCase"]"#);
        assert!(ResultDataset::from_xarray_json(&content).is_err());
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let content = ELEMENT_FIRST.replace("[8.0, -2.0, null, 1.0]", "[8.0, -2.0]");
        assert!(ResultDataset::from_xarray_json(&content).is_err());
    }

    #[test]
    fn test_parse_long_csv() {
        let data = "Element,Component,forces\n15,Mz_i,10\n15,Mz_j,-5\n24,Mz_i,8\n24,Mz_j,-2\n24,Vy_i,\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        let dataset = ResultDataset::from_long_csv(reader).unwrap();
        assert_eq!(dataset.elements(), &[15, 24]);
        assert_eq!(cell(&dataset, 24, "Mz_j"), Some(-2.0));
        assert_eq!(cell(&dataset, 24, "Vy_i"), None);
    }

    #[test]
    fn test_duplicate_csv_cell_is_rejected() {
        let data = "Element,Component,forces\n15,Mz_i,10\n15,Mz_i,11\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        let err = ResultDataset::from_long_csv(reader).unwrap_err();
        assert!(err.contains("duplicate"));

        // An empty repeat still names the same cell twice.
        let data = "Element,Component,forces\n15,Mz_i,10\n15,Mz_i,\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        let err = ResultDataset::from_long_csv(reader).unwrap_err();
        assert!(err.contains("duplicate"));
        assert!(err.contains("row 2"));
    }

    #[test]
    fn test_bare_nan_cells_are_absent() {
        let content = ELEMENT_FIRST.replace("null", "NaN");
        let dataset = ResultDataset::from_xarray_json(&content).unwrap();
        assert_eq!(cell(&dataset, 24, "Vy_i"), None);
        assert_eq!(cell(&dataset, 24, "Vy_j"), Some(1.0));
    }

    #[test]
    fn test_nan_inside_labels_is_kept() {
        let content = r#"{"a": "NaN \" NaN", "b": [NaN, 1.0]}"#;
        assert_eq!(
            null_bare_nan(content),
            r#"{"a": "NaN \" NaN", "b": [null, 1.0]}"#
        );
    }

    #[test]
    fn test_open_missing_file() {
        let err = ResultDataset::open("/no/such/screening_task.json").unwrap_err();
        assert!(matches!(err, DiagramError::DatasetOpenError { .. }));
    }

    #[test]
    fn test_open_netcdf_is_rejected_with_guidance() {
        let file = tempfile::Builder::new().suffix(".nc").tempfile().unwrap();
        let err = ResultDataset::open(file.path()).unwrap_err();
        assert!(matches!(err, DiagramError::DatasetOpenError { .. }));
        assert!(err.to_string().contains("to_dict"));
    }
}
