//! Form submissions: an operation name plus raw string fields, parsed once
//! into a typed [`Operation`].
//!
//! Nothing is coerced: a field that does not parse as the expected number is
//! an error, never a default.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::params::{
    BrightnessParams, ContrastParams, CropParams, NoiseParams, Operation, ParamError,
    RandomCropParams, ReflectParams, RotateParams, ScaleParams, TextParams,
};
use crate::transform::ReflectAxis;

/// Raw values from a dialog, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub operation: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl FormSubmission {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Parse and validate into an [`Operation`].
    pub fn parse(&self) -> Result<Operation, ParamError> {
        let name = self.operation.trim().to_ascii_lowercase();
        let fields = |operation: &'static str| Fields {
            operation,
            raw: &self.fields,
        };

        let op = match name.as_str() {
            "scale" => {
                let f = fields("scale");
                Operation::Scale(ScaleParams {
                    factor: f.number("factor")?,
                })
            }
            "rotate" => {
                let f = fields("rotate");
                Operation::Rotate(RotateParams {
                    angle: f.number("angle")?,
                })
            }
            "crop" => {
                let f = fields("crop");
                Operation::Crop(CropParams {
                    x: f.integer("x")?,
                    y: f.integer("y")?,
                    width: f.integer("width")?,
                    height: f.integer("height")?,
                })
            }
            "random_crop" => {
                let f = fields("random_crop");
                Operation::RandomCrop(RandomCropParams {
                    width: f.integer("width")?,
                    height: f.integer("height")?,
                })
            }
            "reflect" => {
                let f = fields("reflect");
                Operation::Reflect(ReflectParams {
                    axis: f.optional("axis").and_then(ReflectAxis::from_name),
                })
            }
            "brightness" => {
                let f = fields("brightness");
                Operation::Brightness(BrightnessParams {
                    factor: f.number("factor")?,
                })
            }
            "contrast" => {
                let f = fields("contrast");
                Operation::Contrast(ContrastParams {
                    level: f.number("level")?,
                })
            }
            "add_noise" | "noise" => {
                let f = fields("add_noise");
                Operation::AddNoise(NoiseParams {
                    intensity: f.number("intensity")?,
                })
            }
            "draw_text" | "text" => {
                let f = fields("draw_text");
                let color = match f.optional("color") {
                    Some(value) => Color::parse(value)?,
                    None => Color::default(),
                };
                Operation::DrawText(TextParams {
                    content: f.raw_value("content")?.to_string(),
                    x: f.integer("x")?,
                    y: f.integer("y")?,
                    font_size: f.integer("font_size")?,
                    color,
                })
            }
            _ => return Err(ParamError::UnknownOperation(self.operation.clone())),
        };

        op.validate()?;
        Ok(op)
    }
}

/// Field accessor that knows which operation it is reading for, so errors
/// can name it.
struct Fields<'a> {
    operation: &'static str,
    raw: &'a BTreeMap<String, String>,
}

impl<'a> Fields<'a> {
    /// Value exactly as submitted. Only absence is an error.
    fn raw_value(&self, field: &'static str) -> Result<&'a str, ParamError> {
        self.raw
            .get(field)
            .map(String::as_str)
            .ok_or(ParamError::MissingField {
                operation: self.operation,
                field,
            })
    }

    /// Trimmed value; blank counts as missing.
    fn required(&self, field: &'static str) -> Result<&'a str, ParamError> {
        self.optional(field).ok_or(ParamError::MissingField {
            operation: self.operation,
            field,
        })
    }

    fn optional(&self, field: &str) -> Option<&'a str> {
        self.raw
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn number(&self, field: &'static str) -> Result<f64, ParamError> {
        self.parsed(field, "a number")
    }

    fn integer<T: FromStr>(&self, field: &'static str) -> Result<T, ParamError> {
        self.parsed(field, "an integer")
    }

    fn parsed<T: FromStr>(
        &self,
        field: &'static str,
        expected: &'static str,
    ) -> Result<T, ParamError> {
        let value = self.required(field)?;
        value.parse().map_err(|_| ParamError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
            expected,
        })
    }
}
