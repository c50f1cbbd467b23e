//! Avoidance-scene (security) configuration decoding.
//!
//! A security file carries an `AvoidSceneSet`: a list of named stopping
//! distance profiles selected by integer id. Only `noload.forward` is
//! consumed by the renderer (as the avoidance-circle radius); the other
//! distances are passthrough data for future consumers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DecodeError, Result};

/// Stopping distances for an unloaded robot, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoloadDistances {
    #[serde(default)]
    pub forward: f64,
    #[serde(default)]
    pub rotate: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub left: f64,
}

/// Per-scene configuration payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub noload: NoloadDistances,
}

/// A named avoidance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvoidanceScene {
    /// Selection key; unique within one loaded config
    pub id: i64,
    /// Display label
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: SceneConfig,
}

impl AvoidanceScene {
    /// The forward stopping distance, used as the avoidance-circle radius.
    pub fn forward(&self) -> f64 {
        self.config.noload.forward
    }
}

/// A decoded security configuration.
#[derive(Debug, Clone, Default)]
pub struct SecurityConfig {
    scenes: Vec<AvoidanceScene>,
}

impl SecurityConfig {
    /// Decode a security file. `AvoidSceneSet` is required.
    pub fn decode(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let set = value
            .get("AvoidSceneSet")
            .ok_or(DecodeError::MissingField("AvoidSceneSet"))?;
        let scenes: Vec<AvoidanceScene> = serde_json::from_value(set.clone())?;
        Ok(Self { scenes })
    }

    /// All scenes, in file order.
    pub fn scenes(&self) -> &[AvoidanceScene] {
        &self.scenes
    }

    /// Look up a scene by id. Absence is not an error; callers fall back
    /// to a default radius.
    pub fn scene_by_id(&self, id: i64) -> Option<&AvoidanceScene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    /// Id of the first scene, the selection adopted after import.
    pub fn first_id(&self) -> Option<i64> {
        self.scenes.first().map(|scene| scene.id)
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "AvoidSceneSet": [
            {"id": 0, "name": "minimal", "config": {"noload": {"forward": 200, "rotate": 50, "right": 50, "left": 50}}},
            {"id": 1, "name": "standard", "config": {"noload": {"forward": 500, "rotate": 100, "right": 80, "left": 80}}},
            {"id": 8, "name": "docking", "config": {"noload": {"forward": 200, "rotate": 50, "right": 10, "left": 10}}}
        ]
    }"#;

    #[test]
    fn decodes_scene_set_in_order() {
        let config = SecurityConfig::decode(SAMPLE).unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.scenes()[0].name, "minimal");
        assert_eq!(config.first_id(), Some(0));
    }

    #[test]
    fn scene_lookup_by_id() {
        let config = SecurityConfig::decode(SAMPLE).unwrap();
        let scene = config.scene_by_id(1).unwrap();
        assert_eq!(scene.name, "standard");
        assert_eq!(scene.forward(), 500.0);

        // Ids are sparse; a hole is simply absent.
        assert!(config.scene_by_id(5).is_none());
        assert!(config.scene_by_id(8).is_some());
    }

    #[test]
    fn missing_scene_set_is_fatal() {
        let err = SecurityConfig::decode(r#"{"other": 1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("AvoidSceneSet")));
    }

    #[test]
    fn empty_scene_set_is_valid() {
        let config = SecurityConfig::decode(r#"{"AvoidSceneSet": []}"#).unwrap();
        assert!(config.is_empty());
        assert_eq!(config.first_id(), None);
    }

    #[test]
    fn partial_noload_defaults_to_zero() {
        let raw = r#"{"AvoidSceneSet": [{"id": 2, "name": "bare"}]}"#;
        let config = SecurityConfig::decode(raw).unwrap();
        assert_eq!(config.scene_by_id(2).unwrap().forward(), 0.0);
    }
}
