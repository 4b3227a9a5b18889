use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use crate::{
    algorithms::RetrievalMode,
    error::{Result, VectorizeError},
};

pub const DEFAULT_DPI: f64 = 1000.0;
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Named parameter sets for the two supported tracing policies
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Preset {
    /// Every boundary including holes, light simplification
    #[default]
    Detailed,
    /// Outer boundaries only, raw boundary pixels
    Outline,
}

impl Preset {
    pub fn options(self) -> ConversionOptions {
        match self {
            Self::Detailed => ConversionOptions {
                retrieval: RetrievalMode::All,
                simplify_factor: 0.001,
                ..ConversionOptions::base()
            },
            Self::Outline => ConversionOptions {
                retrieval: RetrievalMode::Outer,
                simplify_factor: 0.0,
                ..ConversionOptions::base()
            },
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Detailed => "All boundaries including holes, simplify factor 0.001",
            Self::Outline => "Outer boundaries only, no simplification",
        }
    }
}

/// Parameters of one bitmap-to-DXF conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConversionOptions {
    /// Pixels per inch of the source bitmap
    #[schemars(range(min = 0.0))]
    pub dpi: f64,
    /// Fraction of each contour's perimeter allowed as deviation; 0 disables
    #[schemars(range(min = 0.0))]
    pub simplify_factor: f64,
    /// Intensities at or below this value are foreground
    pub threshold: u8,
    pub retrieval: RetrievalMode,
    /// Minimum contour area in square pixels
    pub min_area: f64,
    /// Minimum closed contour length in pixels
    pub min_perimeter: f64,
    /// Close/open radius applied to the binary mask; 0 disables
    pub morphology_radius: u8,
}

impl ConversionOptions {
    fn base() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            simplify_factor: 0.0,
            threshold: DEFAULT_THRESHOLD,
            retrieval: RetrievalMode::All,
            min_area: 5.0,
            min_perimeter: 3.0,
            morphology_radius: 0,
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_simplify_factor(mut self, factor: f64) -> Self {
        self.simplify_factor = factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(VectorizeError::invalid(
                "dpi",
                format!("must be a positive number, got {}", self.dpi),
            ));
        }
        if !self.simplify_factor.is_finite() || self.simplify_factor < 0.0 {
            return Err(VectorizeError::invalid(
                "simplify_factor",
                format!("must be zero or positive, got {}", self.simplify_factor),
            ));
        }
        if !self.min_area.is_finite() || self.min_area < 0.0 {
            return Err(VectorizeError::invalid(
                "min_area",
                format!("must be zero or positive, got {}", self.min_area),
            ));
        }
        if !self.min_perimeter.is_finite() || self.min_perimeter < 0.0 {
            return Err(VectorizeError::invalid(
                "min_perimeter",
                format!("must be zero or positive, got {}", self.min_perimeter),
            ));
        }
        Ok(())
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Preset::default().options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_detailed_preset() {
        let options = ConversionOptions::default();
        assert_eq!(options.dpi, 1000.0);
        assert_eq!(options.simplify_factor, 0.001);
        assert_eq!(options.threshold, 127);
        assert_eq!(options.retrieval, RetrievalMode::All);
        assert_eq!(options.min_area, 5.0);
        assert_eq!(options.min_perimeter, 3.0);
    }

    #[test]
    fn test_outline_preset() {
        let options = Preset::Outline.options();
        assert_eq!(options.retrieval, RetrievalMode::Outer);
        assert_eq!(options.simplify_factor, 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_dpi() {
        for dpi in [0.0, -300.0, f64::NAN, f64::INFINITY] {
            let err = ConversionOptions::default().with_dpi(dpi).validate();
            assert!(matches!(err, Err(VectorizeError::InvalidParameter { name: "dpi", .. })));
        }
    }

    #[test]
    fn test_validate_rejects_negative_simplify() {
        let err = ConversionOptions::default().with_simplify_factor(-0.1).validate();
        assert!(matches!(
            err,
            Err(VectorizeError::InvalidParameter { name: "simplify_factor", .. })
        ));
        assert!(ConversionOptions::default().with_simplify_factor(0.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ConversionOptions =
            serde_json::from_str(r#"{ "dpi": 600.0, "retrieval": "outer" }"#).expect("parse");
        assert_eq!(options.dpi, 600.0);
        assert_eq!(options.retrieval, RetrievalMode::Outer);
        assert_eq!(options.simplify_factor, 0.001);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::VARIANTS, &["detailed", "outline"]);
        assert_eq!("outline".parse::<Preset>().ok(), Some(Preset::Outline));
    }
}
