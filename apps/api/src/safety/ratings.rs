use serde_json::Value;
use thiserror::Error;

use crate::errors::AppError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    #[error("rating must be a whole number between 1 and 5, got {0}")]
    OutOfRange(String),

    #[error("rating is required")]
    Missing,
}

impl From<RatingError> for AppError {
    fn from(e: RatingError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Accepts any JSON value so that fractions, strings and nulls get the
/// same validation error as out-of-range integers. `4.0` counts as 4.
pub fn validate_rating(raw: &Value) -> Result<i16, RatingError> {
    let whole = match raw {
        Value::Null => return Err(RatingError::Missing),
        Value::Number(n) => n
            .as_i64()
            .map(|v| v as f64)
            .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0)),
        _ => None,
    };
    match whole {
        Some(v) if (f64::from(MIN_RATING)..=f64::from(MAX_RATING)).contains(&v) => Ok(v as i16),
        _ => Err(RatingError::OutOfRange(raw.to_string())),
    }
}

/// Mean of all ratings, rounded to one decimal. `None` when nothing is rated yet.
pub fn average_rating(ratings: &[i16]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: f64 = ratings.iter().map(|&r| f64::from(r)).sum();
    let mean = sum / ratings.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
