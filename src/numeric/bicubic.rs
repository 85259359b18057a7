use crate::numeric::ConstructionError;
use log::warn;

/// Coordinates are clamped to `[0, dim - EDGE_MARGIN]` when they fall
/// outside the interpolation domain.
const EDGE_MARGIN: f64 = 1.01;

/// Bicubic interpolation over a rectangular grid of samples.
///
/// The grid is validated at construction and immutable afterwards.
/// Interpolation applies the Catmull-Rom cubic convolution kernel in two
/// separable passes over an edge-clamped 4x4 neighborhood; the tensor-product
/// kernel makes horizontal-then-vertical exact, not an approximation.
#[derive(Debug, Clone, PartialEq)]
pub struct BicubicInterpolator {
    values: Vec<Vec<f64>>,
    rows: usize,
    cols: usize,
}

impl BicubicInterpolator {
    /// Builds an interpolator over `values[row][col]`.
    ///
    /// Fails if the matrix is empty or any row differs in length from the
    /// first one.
    pub fn new(values: Vec<Vec<f64>>) -> Result<Self, ConstructionError> {
        if values.is_empty() || values[0].is_empty() {
            return Err(ConstructionError::EmptyGrid);
        }

        let cols = values[0].len();
        for (row, samples) in values.iter().enumerate() {
            if samples.len() != cols {
                return Err(ConstructionError::RaggedGrid {
                    row,
                    expected: cols,
                    found: samples.len(),
                });
            }
        }

        let rows = values.len();
        Ok(Self { values, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Interpolates the grid at `(x, y)`, `x` along columns and `y` along
    /// rows.
    ///
    /// Coordinates outside `[0, cols-1) x [0, rows-1)` are not an error:
    /// each axis is clamped to the nearest admissible value and a warning is
    /// emitted. The neighborhood gather clamps indices to the grid edge, so
    /// boundary cells reuse their outermost samples instead of extrapolating.
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let (mut x, mut y) = (x, y);
        if !self.in_range(x, y) {
            warn!(
                "interpolation point ({x}, {y}) is outside the data range [0, {}] x [0, {}]",
                self.cols - 1,
                self.rows - 1
            );
            x = x.min(self.cols as f64 - EDGE_MARGIN).max(0.0);
            y = y.min(self.rows as f64 - EDGE_MARGIN).max(0.0);
        }

        let x0 = x.floor();
        let y0 = y.floor();
        let dx = x - x0;
        let dy = y - y0;
        let x0 = x0 as i64;
        let y0 = y0 as i64;

        // Horizontal pass over each of the 4 gathered rows, then one
        // vertical pass over the intermediates.
        let mut column = [0.0; 4];
        for j in -1..=2i64 {
            let yi = bounded_index(y0 + j, self.rows);
            let mut row = [0.0; 4];
            for i in -1..=2i64 {
                let xi = bounded_index(x0 + i, self.cols);
                row[(i + 1) as usize] = self.values[yi][xi];
            }
            column[(j + 1) as usize] = cubic_interpolate(&row, dx);
        }

        cubic_interpolate(&column, dy)
    }

    fn in_range(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < (self.cols - 1) as f64 && y >= 0.0 && y < (self.rows - 1) as f64
    }
}

/// Catmull-Rom cubic convolution through `p[0]..p[3]` at `t` in `[0, 1)`.
/// Reduces to `p[1]` at `t = 0`.
fn cubic_interpolate(p: &[f64; 4], t: f64) -> f64 {
    p[1] + 0.5
        * t
        * (p[2] - p[0]
            + t * (2.0 * p[0] - 5.0 * p[1] + 4.0 * p[2] - p[3]
                + t * (3.0 * (p[1] - p[2]) + p[3] - p[0])))
}

/// Swaps rows and columns. Empty input stays empty.
pub fn transpose(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if matrix.is_empty() || matrix[0].is_empty() {
        return Vec::new();
    }

    let rows = matrix.len();
    let cols = matrix[0].len();
    let mut transposed = vec![vec![0.0; rows]; cols];

    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            transposed[j][i] = value;
        }
    }

    transposed
}

/// Surrounds the matrix with one border of zero samples on all four sides.
pub fn zero_pad(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if matrix.is_empty() {
        return Vec::new();
    }

    let cols = matrix[0].len();
    let mut padded = Vec::with_capacity(matrix.len() + 2);

    padded.push(vec![0.0; cols + 2]);
    for row in matrix {
        let mut padded_row = Vec::with_capacity(cols + 2);
        padded_row.push(0.0);
        padded_row.extend_from_slice(row);
        padded_row.push(0.0);
        padded.push(padded_row);
    }
    padded.push(vec![0.0; cols + 2]);

    padded
}

fn bounded_index(idx: i64, max: usize) -> usize {
    if idx < 0 {
        0
    } else if idx >= max as i64 {
        max - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0, 8.0],
            vec![9.0, 10.0, 11.0, 12.0],
            vec![13.0, 14.0, 15.0, 16.0],
        ]
    }

    #[test]
    fn test_construction_rejects_empty_grid() {
        assert_eq!(
            BicubicInterpolator::new(Vec::new()).unwrap_err(),
            ConstructionError::EmptyGrid
        );
        assert_eq!(
            BicubicInterpolator::new(vec![Vec::new()]).unwrap_err(),
            ConstructionError::EmptyGrid
        );
    }

    #[test]
    fn test_construction_rejects_ragged_grid() {
        let err =
            BicubicInterpolator::new(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_exact_at_interior_nodes() {
        let interp = BicubicInterpolator::new(sample_grid()).unwrap();
        assert_eq!(interp.interpolate(1.0, 1.0), 6.0);
        assert_eq!(interp.interpolate(2.0, 1.0), 7.0);
        assert_eq!(interp.interpolate(1.0, 2.0), 10.0);
    }

    #[test]
    fn test_cell_center_between_surrounding_samples() {
        let interp = BicubicInterpolator::new(sample_grid()).unwrap();
        let value = interp.interpolate(1.5, 1.5);
        assert!(value > 6.0 && value < 11.0);
        // The sample grid is affine in (x, y), which the kernel reproduces
        // exactly away from the clamped border.
        assert!((value - 8.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_clamps_and_stays_deterministic() {
        let interp = BicubicInterpolator::new(sample_grid()).unwrap();

        let below = interp.interpolate(-5.0, 2.0);
        assert_eq!(below, interp.interpolate(0.0, 2.0));

        // Any far-out point collapses onto the same clamped corner.
        let corner = interp.interpolate(10.0, 10.0);
        assert_eq!(corner, interp.interpolate(100.0, 50.0));

        // Evaluating twice with the same out-of-range input is idempotent.
        assert_eq!(interp.interpolate(-3.0, -7.0), interp.interpolate(-3.0, -7.0));
    }

    #[test]
    fn test_single_cell_grid_returns_its_sample() {
        let interp = BicubicInterpolator::new(vec![vec![4.5]]).unwrap();
        assert_eq!(interp.interpolate(0.0, 0.0), 4.5);
        assert_eq!(interp.interpolate(12.0, -3.0), 4.5);
    }

    #[test]
    fn test_constant_grid_interpolates_to_constant() {
        let interp = BicubicInterpolator::new(vec![vec![2.5; 5]; 5]).unwrap();
        for (x, y) in [(0.0, 0.0), (1.3, 2.7), (3.99, 0.01)] {
            assert!((interp.interpolate(x, y) - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_kernel_identity_at_zero() {
        assert_eq!(cubic_interpolate(&[7.0, 1.0, -3.0, 9.0], 0.0), 1.0);
    }

    #[test]
    fn test_transpose() {
        let matrix = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        assert_eq!(
            transpose(&matrix),
            vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
        );
        assert!(transpose(&[]).is_empty());
    }

    #[test]
    fn test_zero_pad() {
        let matrix = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(
            zero_pad(&matrix),
            vec![
                vec![0.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 2.0, 0.0],
                vec![0.0, 3.0, 4.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0],
            ]
        );
    }
}
