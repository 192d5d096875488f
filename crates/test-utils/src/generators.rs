//! Coordinate generators for synthetic swaths.
//!
//! These produce predictable lon/lat grids shaped like a satellite swath:
//! longitude varies along a scan line, latitude varies from scan line to
//! scan line.

/// Creates a longitude grid where every row runs from `start` to `stop`.
///
/// Each row is `linspace(start, stop, cols)`; all rows are identical. A
/// `start` greater than `stop` makes column 0 the eastern edge.
///
/// # Arguments
///
/// * `start` - Longitude of the first column (degrees)
/// * `stop` - Longitude of the last column (degrees)
/// * `shape` - `(rows, cols)`
///
/// # Returns
///
/// A `Vec<f64>` in row-major order (row 0 first, then row 1, etc.)
///
/// # Example
///
/// ```
/// use test_utils::create_test_longitude;
///
/// let lons = create_test_longitude(3.0, 12.0, (2, 4));
/// assert_eq!(lons, vec![3.0, 6.0, 9.0, 12.0, 3.0, 6.0, 9.0, 12.0]);
/// ```
pub fn create_test_longitude(start: f64, stop: f64, shape: (usize, usize)) -> Vec<f64> {
    let (rows, cols) = shape;
    let row = linspace(start, stop, cols);
    let mut data = Vec::with_capacity(rows * cols);
    for _ in 0..rows {
        data.extend_from_slice(&row);
    }
    data
}

/// Creates a latitude grid where every column runs from `start` to `stop`.
///
/// Row `r` holds `linspace(start, stop, rows)[r]` in every column. A
/// `start` greater than `stop` puts row 0 in the north.
///
/// # Example
///
/// ```
/// use test_utils::create_test_latitude;
///
/// let lats = create_test_latitude(75.0, 26.0, (50, 10));
/// assert_eq!(lats[0], 75.0);
/// assert_eq!(lats[10], 74.0);
/// assert_eq!(lats[499], 26.0);
/// ```
pub fn create_test_latitude(start: f64, stop: f64, shape: (usize, usize)) -> Vec<f64> {
    let (rows, cols) = shape;
    let mut data = Vec::with_capacity(rows * cols);
    for lat in linspace(start, stop, rows) {
        data.extend(std::iter::repeat(lat).take(cols));
    }
    data
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            values[num - 1] = stop;
            values
        }
    }
}
