//! Common test fixtures for swath geometry tests.
//!
//! This module provides pre-defined swath layouts, missing-data patterns
//! and array backends used across the test suites.

use std::sync::Arc;

use resample_common::{Array2, CoordArray, LabeledArray, LazyArray};

use crate::generators::{create_test_latitude, create_test_longitude};

/// Shape of the standard test swath: 50 scan lines of 10 samples.
pub const SWATH_SHAPE: (usize, usize) = (50, 10);

/// Longitudes of a small 2x4 swath.
pub const SMALL_LONS: [[f64; 4]; 2] = [[1.2, 1.3, 1.4, 1.5], [1.2, 1.3, 1.4, 1.5]];

/// Latitudes of a small 2x4 swath.
pub const SMALL_LATS: [[f64; 4]; 2] = [[65.9, 65.86, 65.82, 65.78], [65.9, 65.86, 65.82, 65.78]];

/// Orientation of a generated swath, named after the corner holding `[0, 0]`.
#[derive(Debug, Clone, Copy)]
pub struct CornerCase {
    pub name: &'static str,
    pub lon_start: f64,
    pub lon_stop: f64,
    pub lat_start: f64,
    pub lat_stop: f64,
    /// Whether the unforced perimeter winds clockwise.
    pub clockwise: bool,
}

impl CornerCase {
    /// Longitude and latitude grids for this orientation.
    pub fn lons_lats(&self, shape: (usize, usize)) -> (Vec<f64>, Vec<f64>) {
        (
            create_test_longitude(self.lon_start, self.lon_stop, shape),
            create_test_latitude(self.lat_start, self.lat_stop, shape),
        )
    }
}

pub const CORNER_CASES: [CornerCase; 4] = [
    CornerCase {
        name: "north-west",
        lon_start: 3.0,
        lon_stop: 12.0,
        lat_start: 75.0,
        lat_stop: 26.0,
        clockwise: true,
    },
    CornerCase {
        name: "north-east",
        lon_start: 12.0,
        lon_stop: 3.0,
        lat_start: 75.0,
        lat_stop: 26.0,
        clockwise: false,
    },
    CornerCase {
        name: "south-west",
        lon_start: 3.0,
        lon_stop: 12.0,
        lat_start: 26.0,
        lat_stop: 75.0,
        clockwise: false,
    },
    CornerCase {
        name: "south-east",
        lon_start: 12.0,
        lon_stop: 3.0,
        lat_start: 26.0,
        lat_stop: 75.0,
        clockwise: true,
    },
];

/// Missing longitude patterns applied to the last column of a swath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NanPattern {
    /// No missing data.
    None,
    /// Rows 20..30 missing (a few bad scans).
    Scan,
    /// First half of the rows missing.
    Half,
    /// The whole column missing.
    Whole,
}

impl NanPattern {
    pub const ALL: [NanPattern; 4] = [
        NanPattern::None,
        NanPattern::Scan,
        NanPattern::Half,
        NanPattern::Whole,
    ];

    /// Write NaNs into the last column of a row-major grid.
    pub fn apply(&self, data: &mut [f64], shape: (usize, usize)) {
        let (rows, cols) = shape;
        let nan_rows = match self {
            NanPattern::None => 0..0,
            NanPattern::Scan => 20..30.min(rows),
            NanPattern::Half => 0..rows / 2,
            NanPattern::Whole => 0..rows,
        };
        for row in nan_rows {
            data[row * cols + cols - 1] = f64::NAN;
        }
    }
}

/// Container backends a coordinate grid can be wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Eager,
    Lazy,
    Labeled,
    LabeledLazy,
}

impl Backend {
    pub const ALL: [Backend; 4] = [
        Backend::Eager,
        Backend::Lazy,
        Backend::Labeled,
        Backend::LabeledLazy,
    ];

    /// Wrap `array` in this backend.
    pub fn wrap(&self, array: Array2) -> Arc<dyn CoordArray> {
        match self {
            Backend::Eager => Arc::new(array),
            Backend::Lazy => Arc::new(LazyArray::from_array(array)),
            Backend::Labeled => Arc::new(LabeledArray::new(array, ("y", "x"))),
            Backend::LabeledLazy => {
                Arc::new(LabeledArray::new(LazyArray::from_array(array), ("y", "x")))
            }
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Backend::Lazy | Backend::LabeledLazy)
    }
}

/// The standard 50x10 north-west swath as row-major grids.
pub fn swath_lons_lats() -> (Vec<f64>, Vec<f64>) {
    CORNER_CASES[0].lons_lats(SWATH_SHAPE)
}
