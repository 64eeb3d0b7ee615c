use serde::{Deserialize, Serialize};

/// A single rating as it came out of the source data, before any id
/// remapping. The rating is already expressed in the configured scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRating {
    pub uid: String,
    pub iid: String,
    pub rating: f64,
    pub timestamp: Option<String>,
}

impl RawRating {
    pub fn new(uid: impl Into<String>, iid: impl Into<String>, rating: f64) -> Self {
        Self {
            uid: uid.into(),
            iid: iid.into(),
            rating,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// The minimum and maximum rating of a dataset, fixed per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingScale {
    pub min: f64,
    pub max: f64,
}

impl RatingScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp an estimate into the scale bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

/// A held-out rating in raw-id space. Evaluation always happens on raw ids.
pub type TestRating = (String, String, f64);

/// The output record of an external prediction algorithm: the true rating
/// `r_ui` it was asked about and the estimate `est` it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub uid: String,
    pub iid: String,
    pub r_ui: f64,
    pub est: f64,
}

impl Prediction {
    pub fn new(uid: impl Into<String>, iid: impl Into<String>, r_ui: f64, est: f64) -> Self {
        Self {
            uid: uid.into(),
            iid: iid.into(),
            r_ui,
            est,
        }
    }
}
