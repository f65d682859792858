//! Turns girders plus the result dataset into ordered plottable series.
//!
//! Every element contributes its i-end sample followed by its j-end sample, in
//! girder traversal order. Values are passed through untouched.

use crate::core::dataset::ResultDataset;
use crate::core::selector::select;
use crate::core::topology::Topology;
use crate::domain::model::{ContinuityGap, Girder, GirderProfile, Quantity, Segment};
use crate::utils::error::Result;

/// Flat `[i0, j0, i1, j1, ...]` samples of one quantity along a girder.
pub fn assemble_profile(girder: &Girder, dataset: &ResultDataset, quantity: Quantity) -> Result<Vec<f64>> {
    let (component_i, component_j) = quantity.components();
    let mut samples = Vec::with_capacity(girder.len() * 2);

    for &element in &girder.elements {
        samples.push(select(dataset, element, component_i)?);
        samples.push(select(dataset, element, component_j)?);
    }

    Ok(samples)
}

/// Moment and shear samples for one girder.
pub fn assemble_girder_profile(girder: &Girder, dataset: &ResultDataset) -> Result<GirderProfile> {
    Ok(GirderProfile {
        girder: girder.name.clone(),
        moment: assemble_profile(girder, dataset, Quantity::BendingMoment)?,
        shear: assemble_profile(girder, dataset, Quantity::ShearForce)?,
    })
}

/// One extruded segment per element across all girders.
///
/// The segment keeps the element's x and z from the topology and replaces y
/// with the selected i-end / j-end values. Girder membership survives only in
/// the label.
pub fn assemble_segments(
    girders: &[Girder],
    topology: &Topology,
    dataset: &ResultDataset,
    quantity: Quantity,
) -> Result<Vec<Segment>> {
    let (component_i, component_j) = quantity.components();
    let total: usize = girders.iter().map(Girder::len).sum();
    let mut segments = Vec::with_capacity(total);

    for girder in girders {
        for &element in &girder.elements {
            let ([x1, _, z1], [x2, _, z2]) = topology.element_endpoints(element)?;
            let value_i = select(dataset, element, component_i)?;
            let value_j = select(dataset, element, component_j)?;

            segments.push(Segment {
                start: [x1, value_i, z1],
                end: [x2, value_j, z2],
                label: format!("{} - E{}", girder.name, element),
            });
        }
    }

    Ok(segments)
}

/// Positions where the j-end of element k and the i-end of element k+1 differ
/// by more than `tolerance`.
pub fn continuity_gaps(samples: &[f64], tolerance: f64) -> Vec<ContinuityGap> {
    samples
        .chunks_exact(2)
        .zip(samples.chunks_exact(2).skip(1))
        .enumerate()
        .filter_map(|(position, (current, next))| {
            let (j_end, next_i_end) = (current[1], next[0]);
            if (next_i_end - j_end).abs() > tolerance {
                Some(ContinuityGap {
                    position,
                    j_end,
                    next_i_end,
                })
            } else {
                None
            }
        })
        .collect()
}
