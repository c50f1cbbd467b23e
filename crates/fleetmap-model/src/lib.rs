//! Fleetmap data model
//!
//! Decodes the two file formats the viewer consumes:
//!
//! - **Map files**: columnar JSON (`nodeKeys` + positional `nodeArr` rows,
//!   likewise for lines) describing waypoints, connecting paths and charge
//!   bindings in a fixed world space.
//! - **Security files**: an `AvoidSceneSet` of named obstacle-avoidance
//!   distance profiles.
//!
//! Decoding is all-or-nothing: a missing required field fails the import and
//! the caller keeps its previous model. Everything below the required fields
//! is tolerated — short rows, dangling references and malformed cells decode
//! to documented defaults and are resolved (or skipped) at render time.

mod error;
mod map;
mod security;

pub use error::{DecodeError, Result};
pub use map::{
    ChargeBinding, Edge, Node, NodeClass, TopologyMap, WorldBounds, WorldPoint,
    NODE_TYPE_CHARGE, NODE_TYPE_WAYPOINT,
};
pub use security::{AvoidanceScene, NoloadDistances, SceneConfig, SecurityConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_are_100k_square() {
        let bounds = WorldBounds::default();
        assert_eq!(bounds.width, 100_000.0);
        assert_eq!(bounds.height, 100_000.0);
    }

    #[test]
    fn node_type_constants() {
        assert_eq!(NODE_TYPE_WAYPOINT, 0);
        assert_eq!(NODE_TYPE_CHARGE, 6);
    }
}
