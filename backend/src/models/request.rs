//! Validated prediction request.

use serde::{Deserialize, Serialize};

use crate::error::PredictionError;

/// A prediction request whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub origin: String,
    pub datetime: String,
    /// Carried for search history only; it does not affect the features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl PredictionRequest {
    pub fn new(origin: impl Into<String>, datetime: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            datetime: datetime.into(),
            destination: None,
        }
    }

    /// Build a request from loosely-typed fields, failing on the first missing one.
    ///
    /// Presence is what is checked: an empty `origin` is accepted here and
    /// replaced by the default district during feature building.
    pub fn from_parts(
        origin: Option<String>,
        datetime: Option<String>,
        destination: Option<String>,
    ) -> Result<Self, PredictionError> {
        let origin = origin.ok_or(PredictionError::MissingRequiredField("origin"))?;
        let datetime = datetime.ok_or(PredictionError::MissingRequiredField("datetime"))?;
        Ok(Self {
            origin,
            datetime,
            destination: destination.filter(|d| !d.trim().is_empty()),
        })
    }
}
