use linea_core::Error;
use serde::{Deserialize, Serialize};

/// Which vertex sequence of a traced contour ends up in the layer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointOnEdge {
    /// Lattice corners with collinear runs collapsed.
    #[default]
    Corner,
    /// Midpoint of every unit edge.
    Center,
}

/// Slicing and filtering parameters for a whole stack.
///
/// Lengths are in millimetres of the fabricated model. Deserializes from
/// kebab-case keys; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct StackConfig {
    pub layer_count: usize,
    pub max_edge: f32,
    pub min_dimension: f32,
    pub point_on_edge: PointOnEdge,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            layer_count: 10,
            max_edge: 200.0,
            min_dimension: 2.0,
            point_on_edge: PointOnEdge::Corner,
        }
    }
}

impl StackConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.layer_count == 0 {
            return Err(Error::InvalidConfig("layer-count must be at least 1".into()));
        }
        if !(self.max_edge.is_finite() && self.max_edge > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max-edge must be positive, got {}",
                self.max_edge
            )));
        }
        if !(self.min_dimension.is_finite() && self.min_dimension > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min-dimension must be positive, got {}",
                self.min_dimension
            )));
        }
        Ok(())
    }

    /// Model millimetres covered by one raster sample.
    pub fn mm_per_pixel(&self, width: usize, height: usize) -> f32 {
        self.max_edge / width.max(height).max(1) as f32
    }

    /// Minimum contour extent, in raster samples, for a raster of
    /// `width x height` samples.
    pub fn filter_pixels(&self, width: usize, height: usize) -> f32 {
        self.min_dimension / self.mm_per_pixel(width, height)
    }
}

#[cfg(test)]
mod tests {
    use linea_core::Error;

    use super::{PointOnEdge, StackConfig};

    #[test]
    fn defaults_fill_missing_keys() {
        let cfg: StackConfig =
            serde_json::from_str(r#"{ "layer-count": 4, "point-on-edge": "center" }"#)
                .expect("valid json");

        assert_eq!(cfg.layer_count, 4);
        assert_eq!(cfg.point_on_edge, PointOnEdge::Center);
        assert_eq!(cfg.max_edge, 200.0);
        assert_eq!(cfg.min_dimension, 2.0);
    }

    #[test]
    fn serializes_with_kebab_case_keys() {
        let json = serde_json::to_value(StackConfig::default()).expect("serialize");
        assert_eq!(json["layer-count"], 10);
        assert_eq!(json["point-on-edge"], "corner");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<StackConfig, _> = serde_json::from_str(r#"{ "layers": 4 }"#);
        assert!(res.is_err());
    }

    #[test]
    fn filter_scales_with_longer_edge() {
        let cfg = StackConfig::default();
        assert_eq!(cfg.filter_pixels(1000, 400), 10.0);
        assert_eq!(cfg.filter_pixels(400, 1000), 10.0);
        assert_eq!(cfg.mm_per_pixel(100, 50), 2.0);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        assert_eq!(StackConfig::default().validate(), Ok(()));

        let zero_layers = StackConfig {
            layer_count: 0,
            ..StackConfig::default()
        };
        assert!(matches!(zero_layers.validate(), Err(Error::InvalidConfig(_))));

        let no_edge = StackConfig {
            max_edge: 0.0,
            ..StackConfig::default()
        };
        assert!(matches!(no_edge.validate(), Err(Error::InvalidConfig(_))));
    }
}
