//! Prediction request body and its validation

use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use serde::Serialize;
use serde_json::{Map, Value};

/// `POST /predict` body after validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrisInput {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

/// One validation failure, located by path into the request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn body(kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    pub fn field(field: &str, kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

impl IrisInput {
    /// Validate a decoded JSON body.
    ///
    /// Every field is checked so the caller sees all problems at once.
    /// Numeric strings are coerced; unknown keys are ignored.
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let Some(object) = body.as_object() else {
            return Err(vec![FieldError::body(
                "dict_type",
                "Input should be a valid dictionary or object to extract fields from",
            )]);
        };

        let mut values = [0.0; FEATURE_COUNT];
        let mut errors = Vec::new();

        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            match coerce_field(object, name) {
                Ok(value) => *slot = value,
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let [sepal_length, sepal_width, petal_length, petal_width] = values;
        Ok(Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        })
    }

    pub fn features(&self) -> FeatureVector {
        FeatureVector::new(
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        )
    }
}

fn coerce_field(object: &Map<String, Value>, name: &str) -> Result<f64, FieldError> {
    let value = match object.get(name) {
        Some(value) => value,
        None => return Err(FieldError::field(name, "missing", "Field required")),
    };

    let number = match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            FieldError::field(name, "float_type", "Input should be a valid number")
        })?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            FieldError::field(
                name,
                "float_parsing",
                "Input should be a valid number, unable to parse string as a number",
            )
        })?,
        _ => {
            return Err(FieldError::field(
                name,
                "float_type",
                "Input should be a valid number",
            ))
        }
    };

    if !number.is_finite() {
        return Err(FieldError::field(
            name,
            "finite_number",
            "Input should be a finite number",
        ));
    }

    Ok(number)
}
