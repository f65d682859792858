use serde::{Deserialize, Serialize};
use std::fmt;

pub type NodeId = u32;
pub type ElementId = u32;

/// Spatial position of a node, `[x, y, z]`.
pub type Coordinate = [f64; 3];

/// Internal-force component labels as they appear on the dataset's `Component` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    #[serde(rename = "Mz_i")]
    MzI,
    #[serde(rename = "Mz_j")]
    MzJ,
    #[serde(rename = "Vy_i")]
    VyI,
    #[serde(rename = "Vy_j")]
    VyJ,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::MzI => "Mz_i",
            Component::MzJ => "Mz_j",
            Component::VyI => "Vy_i",
            Component::VyJ => "Vy_j",
        }
    }
}

impl AsRef<str> for Component {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical quantity sampled at both ends of every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    BendingMoment,
    ShearForce,
}

impl Quantity {
    pub const ALL: [Quantity; 2] = [Quantity::BendingMoment, Quantity::ShearForce];

    /// The (i-end, j-end) component pair, always in that order.
    pub fn components(&self) -> (Component, Component) {
        match self {
            Quantity::BendingMoment => (Component::MzI, Component::MzJ),
            Quantity::ShearForce => (Component::VyI, Component::VyJ),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::BendingMoment => "Mz",
            Quantity::ShearForce => "Vy",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::BendingMoment => "Bending Moment",
            Quantity::ShearForce => "Shear Force",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::BendingMoment => "kNm",
            Quantity::ShearForce => "kN",
        }
    }

    /// "BMD" or "SFD".
    pub fn diagram_abbreviation(&self) -> &'static str {
        match self {
            Quantity::BendingMoment => "BMD",
            Quantity::ShearForce => "SFD",
        }
    }
}

/// One longitudinal beam line: a named, ordered chain of elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Girder {
    pub name: String,
    pub elements: Vec<ElementId>,
}

impl Girder {
    pub fn new(name: impl Into<String>, elements: Vec<ElementId>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Moment and shear samples for one girder, `2 × |elements|` values each.
#[derive(Debug, Clone, PartialEq)]
pub struct GirderProfile {
    pub girder: String,
    pub moment: Vec<f64>,
    pub shear: Vec<f64>,
}

impl GirderProfile {
    pub fn series(&self, quantity: Quantity) -> &[f64] {
        match quantity {
            Quantity::BendingMoment => &self.moment,
            Quantity::ShearForce => &self.shear,
        }
    }
}

/// A 3D line segment between two points, labelled with its girder and element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
    pub label: String,
}

/// Where the j-end of one element disagrees with the i-end of the next.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuityGap {
    /// Traversal position of the first element of the pair.
    pub position: usize,
    pub j_end: f64,
    pub next_i_end: f64,
}

impl ContinuityGap {
    pub fn jump(&self) -> f64 {
        self.next_i_end - self.j_end
    }
}

/// A rendered figure paired with the file name it is written under.
#[derive(Debug, Clone)]
pub struct NamedFigure {
    pub file_name: String,
    pub figure: crate::core::render::Figure,
}

/// Everything `transform` produces; nothing is written until all of it exists.
///
/// `profiles` holds the sampled series behind 2D figures. They are reported
/// when the set is published, never while rendering.
#[derive(Debug, Clone, Default)]
pub struct DiagramSet {
    pub figures: Vec<NamedFigure>,
    pub profiles: Vec<GirderProfile>,
}

impl DiagramSet {
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_labels_match_dataset_index() {
        assert_eq!(Component::MzI.as_str(), "Mz_i");
        assert_eq!(Component::VyJ.to_string(), "Vy_j");
        let parsed: Component = serde_json::from_str("\"Vy_i\"").unwrap();
        assert_eq!(parsed, Component::VyI);
    }

    #[test]
    fn test_quantity_pairs_are_i_then_j() {
        assert_eq!(
            Quantity::BendingMoment.components(),
            (Component::MzI, Component::MzJ)
        );
        assert_eq!(
            Quantity::ShearForce.components(),
            (Component::VyI, Component::VyJ)
        );
    }

    #[test]
    fn test_continuity_gap_jump() {
        let gap = ContinuityGap {
            position: 0,
            j_end: -5.0,
            next_i_end: 8.0,
        };
        assert_eq!(gap.jump(), 13.0);
    }
}
