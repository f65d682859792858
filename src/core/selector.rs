use crate::core::dataset::ResultDataset;
use crate::domain::model::ElementId;
use crate::utils::error::{DiagramError, Result};

/// Selects the single `forces` value at `(element, component)`.
///
/// Unknown labels and absent cells are errors; there is no default value.
pub fn select(dataset: &ResultDataset, element: ElementId, component: impl AsRef<str>) -> Result<f64> {
    let component = component.as_ref();

    let row = dataset.element_position(element).ok_or_else(|| {
        DiagramError::lookup(format!("element {} is not in the result dataset", element))
    })?;
    let col = dataset.component_position(component).ok_or_else(|| {
        DiagramError::lookup(format!(
            "component '{}' is not in the result dataset",
            component
        ))
    })?;

    dataset.value_at(row, col).ok_or_else(|| {
        DiagramError::lookup(format!(
            "no value for element {} component '{}'",
            element, component
        ))
    })
}
