//! Pointwise envelopes of the two chart series and the fill plan built on them

use alloc::vec::Vec;

/// Pointwise maximum over the common length
pub fn union(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x.max(*y)).collect()
}

/// Pointwise minimum over the common length
pub fn overlap(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x.min(*y)).collect()
}

/// How the area under the curves is shaded
#[derive(Debug, Clone, PartialEq)]
pub enum FillPlan {
    /// Too little generation data to chart
    Placeholder,
    /// Generation only
    Single,
    /// Light union area with the darker overlap area on top
    Overlap { union: Vec<f64>, overlap: Vec<f64> },
}

impl FillPlan {
    /// Choose the fill for index-aligned series of equal length.
    ///
    /// Fewer than two generation points means there is nothing to chart.
    /// Consumption needs two points as well, otherwise only generation is
    /// filled.
    pub fn for_series(generation: &[f64], consumption: &[f64]) -> Self {
        if generation.len() < 2 {
            Self::Placeholder
        } else if consumption.len() < 2 {
            Self::Single
        } else {
            Self::Overlap {
                union: union(generation, consumption),
                overlap: overlap(generation, consumption),
            }
        }
    }
}
