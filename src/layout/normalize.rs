use crate::error::{check_weights, LayoutError, Result};

/// Scale `values` so they sum to `dx * dy`, keeping their order.
///
/// Fails on negative or non-finite values, and when the values sum to zero
/// (there is no scale factor to apply).
pub fn normalize_sizes(values: &[f64], dx: f64, dy: f64) -> Result<Vec<f64>> {
    check_weights(values)?;
    let total_size: f64 = values.iter().sum();
    if total_size <= 0.0 {
        return Err(LayoutError::input(
            "cannot normalize weights that sum to zero",
        ));
    }
    let total_area = dx * dy;
    Ok(values
        .iter()
        .map(|&v| v * total_area / total_size)
        .collect())
}
