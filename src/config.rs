use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Segment count used when a drifting path is thrown away and resampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenSegments {
    /// Reuse the count drawn for the last path during the initial pass,
    /// for every regenerated path. Terrain statistics depend on this.
    #[default]
    LastInit,
    /// Reuse the count the regenerated path was originally sampled with.
    PerPath,
}

/// All tunable parameters. Missing JSON fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Drift
    pub num_paths: usize,
    pub max_drift_segments: usize,
    pub iterations: usize,
    pub segment_length_factor: f64,
    pub max_segment_length: Option<f64>,
    pub regen_one_in: u32,
    pub regen_segments: RegenSegments,

    // Shaping
    pub target_std: f64,
    pub offset: f64,
    pub corner_marker: f64,
    pub sea_floor: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            num_paths: 10,
            max_drift_segments: 8,
            iterations: 100,
            segment_length_factor: 5.0,
            max_segment_length: None,
            regen_one_in: 15,
            regen_segments: RegenSegments::LastInit,
            target_std: 1000.0,
            offset: -100.0,
            corner_marker: 5000.0,
            sea_floor: -5000.0,
        }
    }
}

/// Resolved inputs of one drift run.
#[derive(Clone, Debug, PartialEq)]
pub struct DriftSettings {
    pub num_paths: usize,
    pub max_segments_per_path: usize,
    pub max_segment_length: f64,
    pub iterations: usize,
    pub regen_one_in: u32,
    pub regen_segments: RegenSegments,
}

impl DriftSettings {
    /// Rejects settings the drift loop cannot sample from.
    pub fn validate(&self) -> Result<()> {
        if self.max_segments_per_path == 0 {
            return Err(Error::InvalidParams(
                "max_segments_per_path must be at least 1".into(),
            ));
        }
        if self.regen_one_in == 0 {
            return Err(Error::InvalidParams("regen_one_in must be at least 1".into()));
        }
        if !(self.max_segment_length.is_finite() && self.max_segment_length >= 0.0) {
            return Err(Error::InvalidParams(format!(
                "max_segment_length {} must be finite and non-negative",
                self.max_segment_length
            )));
        }
        Ok(())
    }
}

impl Params {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_paths == 0 {
            return Err(Error::InvalidParams("num_paths must be at least 1".into()));
        }
        if !(self.segment_length_factor.is_finite() && self.segment_length_factor >= 0.0) {
            return Err(Error::InvalidParams(format!(
                "segment_length_factor {} must be finite and non-negative",
                self.segment_length_factor
            )));
        }
        // A finite non-negative factor keeps the derived length valid at
        // any grid size, so one representative size covers the rest.
        self.drift_settings(1, 1).validate()?;
        let shaping = [self.target_std, self.offset, self.corner_marker, self.sea_floor];
        if shaping.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParams("shaping constants must be finite".into()));
        }
        Ok(())
    }

    /// Longest step a sampled path may take, scaled to the grid size.
    pub fn segment_length(&self, height: usize, width: usize) -> f64 {
        self.max_segment_length.unwrap_or_else(|| {
            (height + width) as f64 / self.num_paths as f64 / self.max_drift_segments as f64
                * self.segment_length_factor
        })
    }

    pub fn drift_settings(&self, height: usize, width: usize) -> DriftSettings {
        DriftSettings {
            num_paths: self.num_paths,
            max_segments_per_path: self.max_drift_segments,
            max_segment_length: self.segment_length(height, width),
            iterations: self.iterations,
            regen_one_in: self.regen_one_in,
            regen_segments: self.regen_segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_segment_length_scales_with_grid() {
        let p = Params::default();
        // (100 + 60) / 10 / 8 * 5
        assert!((p.segment_length(100, 60) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn explicit_segment_length_wins() {
        let p = Params { max_segment_length: Some(3.5), ..Params::default() };
        assert_eq!(p.drift_settings(100, 100).max_segment_length, 3.5);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let p: Params =
            serde_json::from_str(r#"{ "iterations": 5, "regen_segments": "per_path" }"#).unwrap();
        assert_eq!(p.iterations, 5);
        assert_eq!(p.num_paths, 10);
        assert_eq!(p.regen_segments, RegenSegments::PerPath);
    }

    #[test]
    fn drift_settings_reject_unsampleable_values() {
        let ok = Params::default().drift_settings(10, 10);
        assert!(ok.validate().is_ok());
        for bad in [
            DriftSettings { max_segments_per_path: 0, ..ok.clone() },
            DriftSettings { regen_one_in: 0, ..ok.clone() },
            DriftSettings { max_segment_length: -1.0, ..ok.clone() },
            DriftSettings { max_segment_length: f64::NAN, ..ok.clone() },
        ] {
            assert!(matches!(bad.validate(), Err(Error::InvalidParams(_))));
        }
    }

    #[test]
    fn validate_rejects_degenerate_counts() {
        assert!(Params::default().validate().is_ok());
        for bad in [
            Params { num_paths: 0, ..Params::default() },
            Params { max_drift_segments: 0, ..Params::default() },
            Params { regen_one_in: 0, ..Params::default() },
            Params { max_segment_length: Some(-1.0), ..Params::default() },
            Params { target_std: f64::NAN, ..Params::default() },
        ] {
            assert!(matches!(bad.validate(), Err(Error::InvalidParams(_))));
        }
    }
}
