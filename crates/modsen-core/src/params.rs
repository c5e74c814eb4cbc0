//! Typed transformation requests.
//!
//! An [`Operation`] is one fully parsed request: the operation name plus its
//! typed parameters. It serializes as an internally tagged object, e.g.
//! `{"op": "scale", "factor": 0.5}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, ColorError};
use crate::transform::ReflectAxis;

/// Error raised while turning user input into an [`Operation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Missing field '{field}' for {operation}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("Invalid value '{value}' for {field}: expected {expected}")]
    InvalidNumber {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("Parameter {field} out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error(transparent)]
    Color(#[from] ColorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    pub factor: f64,
}

/// Rotation in degrees, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotateParams {
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropParams {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomCropParams {
    pub width: u32,
    pub height: u32,
}

/// `axis: None` leaves the image unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReflectParams {
    #[serde(default)]
    pub axis: Option<ReflectAxis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessParams {
    pub factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastParams {
    pub level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextParams {
    pub content: String,
    pub x: i32,
    pub y: i32,
    pub font_size: u32,
    #[serde(default)]
    pub color: Color,
}

/// A single transformation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Scale(ScaleParams),
    Rotate(RotateParams),
    Crop(CropParams),
    RandomCrop(RandomCropParams),
    Reflect(ReflectParams),
    Brightness(BrightnessParams),
    Contrast(ContrastParams),
    AddNoise(NoiseParams),
    DrawText(TextParams),
}

impl Operation {
    /// Canonical snake_case name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Scale(_) => "scale",
            Operation::Rotate(_) => "rotate",
            Operation::Crop(_) => "crop",
            Operation::RandomCrop(_) => "random_crop",
            Operation::Reflect(_) => "reflect",
            Operation::Brightness(_) => "brightness",
            Operation::Contrast(_) => "contrast",
            Operation::AddNoise(_) => "add_noise",
            Operation::DrawText(_) => "draw_text",
        }
    }

    /// Check parameter domains before running anything.
    ///
    /// Bounds that depend on the image (crop rectangle) are checked by the
    /// operation itself.
    pub fn validate(&self) -> Result<(), ParamError> {
        match self {
            Operation::Scale(p) => {
                finite("factor", p.factor)?;
                if p.factor <= 0.0 {
                    return Err(out_of_range("factor", "must be greater than zero", p.factor));
                }
            }
            Operation::Rotate(p) => finite("angle", p.angle)?,
            Operation::Brightness(p) => non_negative("factor", p.factor)?,
            Operation::Contrast(p) => non_negative("level", p.level)?,
            Operation::AddNoise(p) => finite("intensity", p.intensity)?,
            Operation::DrawText(p) => {
                if p.font_size == 0 {
                    return Err(ParamError::OutOfRange {
                        field: "font_size",
                        reason: "must be greater than zero".to_string(),
                    });
                }
            }
            Operation::Crop(_) | Operation::RandomCrop(_) | Operation::Reflect(_) => {}
        }
        Ok(())
    }
}

fn out_of_range(field: &'static str, rule: &str, value: f64) -> ParamError {
    ParamError::OutOfRange {
        field,
        reason: format!("{rule}, got {value}"),
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(field, "must be finite", value))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ParamError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(out_of_range(field, "must not be negative", value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_scale() {
        assert!(Operation::Scale(ScaleParams { factor: 0.5 }).validate().is_ok());
        assert!(matches!(
            Operation::Scale(ScaleParams { factor: 0.0 }).validate(),
            Err(ParamError::OutOfRange { field: "factor", .. })
        ));
        assert!(Operation::Scale(ScaleParams { factor: -2.0 }).validate().is_err());
        assert!(Operation::Scale(ScaleParams { factor: f64::NAN }).validate().is_err());
    }

    #[test]
    fn test_validate_rotate_accepts_any_finite_angle() {
        for angle in [-720.0, -45.0, 0.0, 370.5] {
            assert!(Operation::Rotate(RotateParams { angle }).validate().is_ok());
        }
        assert!(Operation::Rotate(RotateParams { angle: f64::INFINITY }).validate().is_err());
    }

    #[test]
    fn test_validate_enhancements() {
        assert!(Operation::Brightness(BrightnessParams { factor: 0.0 }).validate().is_ok());
        assert!(Operation::Brightness(BrightnessParams { factor: -0.5 }).validate().is_err());
        assert!(Operation::Contrast(ContrastParams { level: 3.0 }).validate().is_ok());
        assert!(Operation::Contrast(ContrastParams { level: f64::NAN }).validate().is_err());
    }

    #[test]
    fn test_validate_noise_allows_out_of_domain_intensity() {
        assert!(Operation::AddNoise(NoiseParams { intensity: 2.5 }).validate().is_ok());
        assert!(Operation::AddNoise(NoiseParams { intensity: f64::NAN }).validate().is_err());
    }

    #[test]
    fn test_validate_font_size() {
        let mut params = TextParams {
            content: "hi".to_string(),
            x: -3,
            y: 4,
            font_size: 12,
            color: Color::default(),
        };
        assert!(Operation::DrawText(params.clone()).validate().is_ok());
        params.font_size = 0;
        assert!(matches!(
            Operation::DrawText(params).validate(),
            Err(ParamError::OutOfRange { field: "font_size", .. })
        ));
    }

    #[test]
    fn test_serde_tagged_format() {
        let op: Operation = serde_json::from_str(r#"{"op":"scale","factor":0.5}"#).unwrap();
        assert_eq!(op, Operation::Scale(ScaleParams { factor: 0.5 }));

        let op: Operation =
            serde_json::from_str(r#"{"op":"draw_text","content":"hi","x":-4,"y":2,"font_size":18}"#)
                .unwrap();
        match op {
            Operation::DrawText(p) => {
                assert_eq!(p.x, -4);
                assert_eq!(p.color, Color::BLACK);
            }
            other => panic!("unexpected {other:?}"),
        }

        let op: Operation = serde_json::from_str(r#"{"op":"reflect"}"#).unwrap();
        assert_eq!(op, Operation::Reflect(ReflectParams { axis: None }));

        let noise = Operation::AddNoise(NoiseParams { intensity: 0.25 });
        let json = serde_json::to_string(&noise).unwrap();
        assert_eq!(json, r#"{"op":"add_noise","intensity":0.25}"#);
    }

    #[test]
    fn test_serde_rejects_unknown_op() {
        assert!(serde_json::from_str::<Operation>(r#"{"op":"sharpen"}"#).is_err());
    }

    #[test]
    fn test_names_are_unique() {
        let ops = [
            Operation::Scale(ScaleParams { factor: 1.0 }),
            Operation::Rotate(RotateParams { angle: 0.0 }),
            Operation::Crop(CropParams { x: 0, y: 0, width: 1, height: 1 }),
            Operation::RandomCrop(RandomCropParams { width: 1, height: 1 }),
            Operation::Reflect(ReflectParams::default()),
            Operation::Brightness(BrightnessParams { factor: 1.0 }),
            Operation::Contrast(ContrastParams { level: 1.0 }),
            Operation::AddNoise(NoiseParams { intensity: 0.0 }),
        ];
        let mut names: Vec<_> = ops.iter().map(Operation::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ops.len());
    }
}
