//! Standardization of feature rows.

use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, InferenceError};
use super::Scaler;

/// Per-column `(x - mean) / scale`, as fitted offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.mean.is_empty() {
            return Err(ArtifactError::invalid("scaler has no columns"));
        }
        if self.mean.len() != self.scale.len() {
            return Err(ArtifactError::invalid(format!(
                "scaler mean has {} columns but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(ArtifactError::invalid("scaler contains non-finite values"));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.mean.len() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.mean.len(),
                got: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant columns were fitted with zero variance.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![10.0, 0.0, 5.0], vec![2.0, 1.0, 0.0]).unwrap();
        let out = scaler.transform(&[14.0, -3.0, 7.0]).unwrap();
        assert_eq!(out, vec![2.0, -3.0, 2.0]);
    }

    #[test]
    fn test_transform_shape_mismatch() {
        let scaler = StandardScaler::new(vec![0.0; 9], vec![1.0; 9]).unwrap();
        assert_eq!(
            scaler.transform(&[1.0, 2.0]),
            Err(InferenceError::ShapeMismatch {
                expected: 9,
                got: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_mismatched_columns() {
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0; 2]).is_err());
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_from_json() {
        let scaler = StandardScaler::from_json_str(r#"{"mean": [1.0, 2.0], "scale": [0.5, 4.0]}"#)
            .unwrap();
        assert_eq!(scaler.n_features(), 2);
        assert_eq!(scaler.transform(&[2.0, 6.0]).unwrap(), vec![2.0, 1.0]);
    }
}
