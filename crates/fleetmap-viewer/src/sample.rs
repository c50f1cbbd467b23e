//! Embedded sample data.
//!
//! Loaded at startup when no files are given on the command line, so the
//! viewer always has something to show. "Reset to sample data" restores
//! these exact models.

use fleetmap_model::{SecurityConfig, TopologyMap};

/// Display name shown while the sample map is active.
pub const SAMPLE_MAP_NAME: &str = "Sample Map Data";

/// Display name shown while the sample security config is active.
pub const SAMPLE_SECURITY_NAME: &str = "Sample Security Config";

const SAMPLE_MAP: &str = r#"{
    "nodeKeys": ["x", "y", "type", "content", "name", "isTurn", "shelfIsTurn", "extraTypes"],
    "lineKeys": ["from", "to", "leftWidth", "rightWidth", "startExpandDistance", "endExpandDistance", "path"],
    "nodeArr": [
        [9775, 88064, 0, "10000007", "10000007", 0, 1, []],
        [88127, 88064, 0, "10000008", "10000008", 0, 1, []],
        [88127, 72690, 6, "10000009", "10000009", 0, 1, [0]],
        [49043, 74172, 0, "10000010", "10000010", 0, 1, []],
        [49043, 24345, 0, "10000011", "10000011", 0, 1, []],
        [63491, 24345, 0, "10000012", "10000012", 0, 1, []],
        [63491, 8045, 6, "10000013", "10000013", 0, 1, [0]],
        [6070, 8045, 0, "10000014", "10000014", 0, 1, []]
    ],
    "lineArr": [
        ["10000007", "10000008", -1, -1, -1, -1, [[9775, 88064], [88127, 88064]]],
        ["10000008", "10000009", -1, -1, -1, -1, [[88127, 88064], [88127, 72690]]],
        ["10000009", "10000010", -1, -1, -1, -1, [[88127, 72690], [49043, 74172]]],
        ["10000010", "10000011", -1, -1, -1, -1, [[49043, 74172], [49043, 24345]]]
    ],
    "chargeCoor": [["10000009", {"x": 0, "y": 0}], ["10000013", {"x": 0, "y": 0}]],
    "type": "topo",
    "height": 100000,
    "width": 100000
}"#;

const SAMPLE_SECURITY: &str = r#"{
    "AvoidSceneSet": [
        {"id": 0, "name": "Minimal avoidance", "config": {"noload": {"forward": 200, "rotate": 50, "right": 50, "left": 50}}},
        {"id": 1, "name": "Standard avoidance", "config": {"noload": {"forward": 500, "rotate": 100, "right": 80, "left": 80}}},
        {"id": 2, "name": "Short avoidance", "config": {"noload": {"forward": 300, "rotate": 100, "right": 80, "left": 80}}},
        {"id": 3, "name": "Shelf entry", "config": {"noload": {"forward": 300, "rotate": 50, "right": 20, "left": 20}}},
        {"id": 8, "name": "Charge docking", "config": {"noload": {"forward": 200, "rotate": 50, "right": 10, "left": 10}}}
    ]
}"#;

/// Decode the embedded sample map.
pub fn sample_map() -> TopologyMap {
    TopologyMap::decode(SAMPLE_MAP).expect("embedded sample map is valid")
}

/// Decode the embedded sample security config.
pub fn sample_security() -> SecurityConfig {
    SecurityConfig::decode(SAMPLE_SECURITY).expect("embedded sample security config is valid")
}
