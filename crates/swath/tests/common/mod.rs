//! Common helpers for swath integration tests
//!
//! Provides:
//! - A trait abstracting over the legacy and future swath types
//! - Swath generators for every array backend

#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

use resample_common::{Array2, CoordArray};
use swath::{LegacySwathDefinition, Swath, SwathDefinition};
use test_utils::{swath_lons_lats, Backend, SMALL_LATS, SMALL_LONS, SWATH_SHAPE};

/// Construction hooks so every test runs against both swath types.
pub trait TestSwath: Swath + Hash + Eq + Sized {
    fn build(lons: Arc<dyn CoordArray>, lats: Arc<dyn CoordArray>) -> Self;
    fn subset(&self, rows: Range<usize>, cols: Range<usize>) -> Self;
    fn stack(&self, other: &Self) -> Self;
}

impl TestSwath for SwathDefinition {
    fn build(lons: Arc<dyn CoordArray>, lats: Arc<dyn CoordArray>) -> Self {
        SwathDefinition::from_arcs(lons, lats).expect("valid swath")
    }

    fn subset(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        self.slice(rows, cols).expect("valid window")
    }

    fn stack(&self, other: &Self) -> Self {
        self.concatenate(other).expect("matching widths")
    }
}

impl TestSwath for LegacySwathDefinition {
    fn build(lons: Arc<dyn CoordArray>, lats: Arc<dyn CoordArray>) -> Self {
        LegacySwathDefinition::from_arcs(lons, lats).expect("valid swath")
    }

    fn subset(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        self.slice(rows, cols).expect("valid window")
    }

    fn stack(&self, other: &Self) -> Self {
        self.concatenate(other).expect("matching widths")
    }
}

pub fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Build a swath from row-major grids wrapped in `backend`.
pub fn swath_from_grids<S: TestSwath>(
    backend: Backend,
    lons: Vec<f64>,
    lats: Vec<f64>,
    shape: (usize, usize),
) -> S {
    let lons = Array2::new(lons, shape).expect("lons match shape");
    let lats = Array2::new(lats, shape).expect("lats match shape");
    S::build(backend.wrap(lons), backend.wrap(lats))
}

/// The standard 50x10 swath on `backend`.
pub fn standard_swath<S: TestSwath>(backend: Backend) -> S {
    let (lons, lats) = swath_lons_lats();
    swath_from_grids(backend, lons, lats, SWATH_SHAPE)
}

pub fn eager_swath<S: TestSwath>() -> S {
    standard_swath(Backend::Eager)
}

pub fn lazy_swath<S: TestSwath>() -> S {
    standard_swath(Backend::Lazy)
}

pub fn labeled_swath<S: TestSwath>() -> S {
    standard_swath(Backend::Labeled)
}

pub fn labeled_lazy_swath<S: TestSwath>() -> S {
    standard_swath(Backend::LabeledLazy)
}

/// The small 2x4 swath.
pub fn small_swath<S: TestSwath>() -> S {
    let lons = Array2::from_rows(&SMALL_LONS).expect("rectangular rows");
    let lats = Array2::from_rows(&SMALL_LATS).expect("rectangular rows");
    S::build(Arc::new(lons), Arc::new(lats))
}

/// The left 2x2 window of the small swath, a non-contiguous view.
pub fn small_noncontiguous_swath<S: TestSwath>() -> S {
    small_swath::<S>().subset(0..2, 0..2)
}

/// Every generator with a name for failure messages.
pub fn generators<S: TestSwath>() -> Vec<(&'static str, fn() -> S)> {
    vec![
        ("eager", eager_swath::<S> as fn() -> S),
        ("lazy", lazy_swath::<S> as fn() -> S),
        ("labeled", labeled_swath::<S> as fn() -> S),
        ("labeled-lazy", labeled_lazy_swath::<S> as fn() -> S),
        ("small-noncontiguous", small_noncontiguous_swath::<S> as fn() -> S),
    ]
}
