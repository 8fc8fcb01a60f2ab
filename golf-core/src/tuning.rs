//! Tuning configuration loader.
//!
//! Loads gameplay constants from YAML presets, so shot power, friction and
//! hole forgiveness can be adjusted without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! tuning/
//! ├── default.yaml
//! └── arcade.yaml
//! ```
//!
//! Every key is optional; missing keys keep the defaults from
//! [`crate::types::constants`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::constants;

/// Error type for tuning operations.
#[derive(Debug)]
pub enum TuningError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
    Invalid(String),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::IoError(e) => write!(f, "IO error: {}", e),
            TuningError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            TuningError::NotFound(name) => write!(f, "Tuning preset not found: {}", name),
            TuningError::Invalid(reason) => write!(f, "Invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::IoError(err)
    }
}

impl From<serde_yaml::Error> for TuningError {
    fn from(err: serde_yaml::Error) -> Self {
        TuningError::ParseError(err)
    }
}

/// Drag-to-shot conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTuning {
    pub min_drag: f64,
    pub power_scale: f64,
    /// Aim line clamp (visual only)
    pub max_drag: f64,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            min_drag: constants::MIN_DRAG,
            power_scale: constants::POWER_SCALE,
            max_drag: constants::MAX_DRAG,
        }
    }
}

/// Rolling ball integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub friction_k: f64,
    pub rest_eps: f64,
    pub stop_eps: f64,
    pub max_frame_dt: f64,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            friction_k: constants::FRICTION_K,
            rest_eps: constants::REST_EPS,
            stop_eps: constants::STOP_EPS,
            max_frame_dt: constants::MAX_FRAME_DT,
        }
    }
}

/// Hole overlap test and entry acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleTuning {
    pub margin: f64,
    pub max_entry_speed: f64,
}

impl Default for HoleTuning {
    fn default() -> Self {
        Self {
            margin: constants::HOLE_MARGIN,
            max_entry_speed: constants::MAX_ENTRY_SPEED,
        }
    }
}

/// Complete gameplay tuning.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub shot: ShotTuning,
    pub physics: PhysicsTuning,
    pub hole: HoleTuning,
}

impl Tuning {
    /// Parse and validate a preset from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_yaml::from_str(yaml)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("shot.min_drag", self.shot.min_drag),
            ("shot.power_scale", self.shot.power_scale),
            ("shot.max_drag", self.shot.max_drag),
            ("physics.friction_k", self.physics.friction_k),
            ("physics.rest_eps", self.physics.rest_eps),
            ("physics.stop_eps", self.physics.stop_eps),
            ("physics.max_frame_dt", self.physics.max_frame_dt),
            ("hole.margin", self.hole.margin),
            ("hole.max_entry_speed", self.hole.max_entry_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if self.shot.min_drag <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "shot.min_drag must be positive, got {}",
                self.shot.min_drag
            )));
        }

        // A ball snapped to rest by friction must also be allowed to take the next shot
        if self.physics.stop_eps < self.physics.rest_eps {
            return Err(TuningError::Invalid(format!(
                "physics.stop_eps ({}) must not be below physics.rest_eps ({})",
                self.physics.stop_eps, self.physics.rest_eps
            )));
        }

        Ok(())
    }
}

/// Preset loader with configurable base directory.
pub struct TuningLoader {
    base_path: PathBuf,
}

impl TuningLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a preset by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = TuningLoader::new("tuning");
    /// let tuning = loader.load("arcade")?;
    /// ```
    pub fn load(&self, name: &str) -> Result<Tuning, TuningError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(TuningError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        Tuning::from_yaml_str(&contents)
    }

    /// List all available presets, sorted.
    pub fn list(&self) -> Result<Vec<String>, TuningError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn get_tuning_path() -> PathBuf {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("..").join("tuning")
    }

    #[test]
    fn test_default_preset_matches_constants() {
        let loader = TuningLoader::new(get_tuning_path());
        let result = loader.load("default");

        assert!(result.is_ok(), "Should load default: {:?}", result.err());
        assert_eq!(result.unwrap(), Tuning::default());
    }

    #[test]
    fn test_load_arcade() {
        let loader = TuningLoader::new(get_tuning_path());
        let tuning = loader.load("arcade").expect("arcade preset");

        assert!(tuning.physics.friction_k < constants::FRICTION_K);
        // Keys the preset leaves out keep their defaults
        assert_eq!(tuning.shot.min_drag, constants::MIN_DRAG);
    }

    #[test]
    fn test_load_nonexistent_preset() {
        let loader = TuningLoader::new(get_tuning_path());
        match loader.load("nonexistent_preset_xyz") {
            Err(TuningError::NotFound(name)) => assert_eq!(name, "nonexistent_preset_xyz"),
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_presets() {
        let loader = TuningLoader::new(get_tuning_path());
        let presets = loader.list().unwrap();
        assert_eq!(presets, vec!["arcade".to_string(), "default".to_string()]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let tuning = Tuning::from_yaml_str("shot:\n  power_scale: 10.0\n").unwrap();
        assert_eq!(tuning.shot.power_scale, 10.0);
        assert_eq!(tuning.shot.max_drag, constants::MAX_DRAG);
        assert_eq!(tuning.physics, PhysicsTuning::default());
    }

    #[test]
    fn test_rejects_negative_values() {
        let result = Tuning::from_yaml_str("physics:\n  friction_k: -1.0\n");
        assert!(matches!(result, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_min_drag() {
        let result = Tuning::from_yaml_str("shot:\n  min_drag: 0.0\n");
        match result {
            Err(TuningError::Invalid(reason)) => assert!(reason.contains("shot.min_drag")),
            other => panic!("Expected Invalid error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_stop_below_rest() {
        let result = Tuning::from_yaml_str("physics:\n  rest_eps: 0.5\n  stop_eps: 0.1\n");
        assert!(matches!(result, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = Tuning::from_yaml_str("shot: [not, a, map");
        assert!(matches!(result, Err(TuningError::ParseError(_))));
    }
}
