//! Girder layout of the screened bridge deck, fixed at build time.

use crate::domain::model::{ElementId, Girder};

const GIRDER_LAYOUT: [(&str, [ElementId; 9]); 5] = [
    ("Girder 1", [13, 22, 31, 40, 49, 58, 67, 76, 81]),
    ("Girder 2", [14, 23, 32, 41, 50, 59, 68, 77, 82]),
    ("Girder 3", [15, 24, 33, 42, 51, 60, 69, 78, 83]),
    ("Girder 4", [16, 25, 34, 43, 52, 61, 70, 79, 84]),
    ("Girder 5", [17, 26, 35, 44, 53, 62, 71, 80, 85]),
];

const CENTRAL_GIRDER: usize = 2;

/// All five longitudinal girders, in deck order.
pub fn bridge_girders() -> Vec<Girder> {
    GIRDER_LAYOUT
        .iter()
        .map(|(name, elements)| Girder::new(*name, elements.to_vec()))
        .collect()
}

/// The middle girder, used for the 2D diagrams.
pub fn central_girder() -> Girder {
    let (name, elements) = GIRDER_LAYOUT[CENTRAL_GIRDER];
    Girder::new(name, elements.to_vec())
}
