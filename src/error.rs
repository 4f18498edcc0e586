use thiserror::Error;

/// Errors reported by the layout functions.
///
/// Both kinds are deterministic: calling again with the same arguments fails
/// the same way. Sparse data (zero weights, empty subtrees) is not an error
/// and collapses to zero-area rectangles instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A weight list that cannot be laid out or normalized.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A target rectangle with a non-positive (or non-finite) side.
    #[error("invalid geometry: width {dx} x height {dy}")]
    InvalidGeometry { dx: f64, dy: f64 },
}

impl LayoutError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        LayoutError::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Reject rectangles that have no area to fill.
pub(crate) fn check_geometry(dx: f64, dy: f64) -> Result<()> {
    if !(dx.is_finite() && dy.is_finite()) || dx <= 0.0 || dy <= 0.0 {
        return Err(LayoutError::InvalidGeometry { dx, dy });
    }
    Ok(())
}

/// Reject negative and non-finite weights, pointing at the first offender.
pub(crate) fn check_weights(values: &[f64]) -> Result<()> {
    if let Some((i, v)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(LayoutError::input(format!(
            "weight #{i} is {v}; weights must be finite and non-negative"
        )));
    }
    Ok(())
}
