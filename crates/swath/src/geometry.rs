//! The interface shared by the legacy and future swath types.

use std::fmt;
use std::sync::Arc;

use geo::Polygon;
use resample_common::{Array2, CoordArray, GeometryConfig, Result};

use crate::bbox::BboxSides;
use crate::definition::SwathDefinition;
use crate::legacy::LegacySwathDefinition;

/// Operations every swath implementation provides.
///
/// Implementors only expose their underlying [`SwathDefinition`]; all
/// geometry is computed there.
pub trait Swath: fmt::Debug + Send + Sync {
    fn definition(&self) -> &SwathDefinition;

    fn shape(&self) -> (usize, usize) {
        self.definition().shape()
    }

    fn size(&self) -> usize {
        self.definition().size()
    }

    fn get_lonlats(&self) -> Result<(Array2, Array2)> {
        self.definition().get_lonlats()
    }

    fn get_bbox_lonlats(
        &self,
        frequency: Option<usize>,
        force_clockwise: bool,
    ) -> Result<BboxSides> {
        self.definition().get_bbox_lonlats(frequency, force_clockwise)
    }

    /// Bbox sides using the frequency and winding defaults of `config`.
    fn get_bbox_lonlats_with(&self, config: &GeometryConfig) -> Result<BboxSides> {
        config.validate()?;
        self.get_bbox_lonlats(config.bbox_frequency, config.force_clockwise)
    }

    fn get_edge_lonlats(
        &self,
        frequency: Option<usize>,
        force_clockwise: bool,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        self.definition().get_edge_lonlats(frequency, force_clockwise)
    }

    fn boundary_polygon(&self, frequency: Option<usize>) -> Result<Polygon<f64>> {
        self.definition().boundary_polygon(frequency)
    }
}

impl Swath for SwathDefinition {
    fn definition(&self) -> &SwathDefinition {
        self
    }
}

impl Swath for LegacySwathDefinition {
    fn definition(&self) -> &SwathDefinition {
        self.as_future()
    }
}

/// Build the swath type selected by `config.future_geometries`.
pub fn swath_from_config(
    config: &GeometryConfig,
    lons: Arc<dyn CoordArray>,
    lats: Arc<dyn CoordArray>,
) -> Result<Box<dyn Swath>> {
    config.validate()?;
    let definition = SwathDefinition::from_arcs(lons, lats)?;
    if config.future_geometries {
        Ok(Box::new(definition))
    } else {
        tracing::debug!("building legacy swath definition");
        Ok(Box::new(LegacySwathDefinition::from(definition)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrays() -> (Arc<dyn CoordArray>, Arc<dyn CoordArray>) {
        let lons = Array2::from_shape_fn((4, 3), |_, col| 3.0 + col as f64);
        let lats = Array2::from_shape_fn((4, 3), |row, _| 75.0 - row as f64);
        (Arc::new(lons), Arc::new(lats))
    }

    #[test]
    fn test_factory_respects_config() {
        let (lons, lats) = arrays();
        let config = GeometryConfig {
            future_geometries: false,
            ..Default::default()
        };
        let swath = swath_from_config(&config, lons, lats).unwrap();
        assert_eq!(swath.shape(), (4, 3));
        assert!(format!("{swath:?}").starts_with("LegacySwathDefinition"));

        let (lons, lats) = arrays();
        let swath = swath_from_config(&GeometryConfig::default(), lons, lats).unwrap();
        assert!(format!("{swath:?}").starts_with("SwathDefinition"));
    }

    #[test]
    fn test_bbox_with_config() {
        let (lons, lats) = arrays();
        let config = GeometryConfig {
            bbox_frequency: Some(2),
            force_clockwise: true,
            ..Default::default()
        };
        let swath = swath_from_config(&GeometryConfig::default(), lons, lats).unwrap();
        let bbox = swath.get_bbox_lonlats_with(&config).unwrap();
        assert_eq!(bbox.side_lengths(), [2, 2, 2, 2]);
        assert!(bbox.is_clockwise());
    }

    #[test]
    fn test_factory_rejects_invalid_config() {
        let (lons, lats) = arrays();
        let config = GeometryConfig {
            bbox_frequency: Some(0),
            ..Default::default()
        };
        assert!(swath_from_config(&config, lons, lats).is_err());
    }
}
