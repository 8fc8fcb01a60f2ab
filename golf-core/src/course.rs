//! Finding the cup and the ball in a loaded course.
//!
//! The host flattens its scene graph into [`SceneNode`]s (name + world-space
//! bounds) once the course model has loaded. Lookups run once; the results
//! are passed into the detector and integrator constructors.

use serde::{Deserialize, Serialize};

use crate::types::{Aabb, HoleRegion};

/// Names tried first, in order, before falling back to a substring search.
const HOLE_NAMES: [&str; 3] = ["Hole", "hole", "HOLE"];

const BALL_NAME: &str = "Ball";

/// A named object in the loaded course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub bounds: Aabb,
    pub is_mesh: bool,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, bounds: Aabb, is_mesh: bool) -> Self {
        Self {
            name: name.into(),
            bounds,
            is_mesh,
        }
    }
}

/// Error type for course lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleLookupError {
    NotFound,
}

impl std::fmt::Display for HoleLookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoleLookupError::NotFound => write!(f, "no hole mesh found in course"),
        }
    }
}

impl std::error::Error for HoleLookupError {}

/// Locate the cup.
///
/// An exact name match wins; otherwise the first mesh whose name contains
/// "hole" in any case.
pub fn locate_hole(nodes: &[SceneNode]) -> Result<HoleRegion, HoleLookupError> {
    let exact = HOLE_NAMES
        .iter()
        .find_map(|name| nodes.iter().find(|node| node.name == *name));

    let node = exact.or_else(|| {
        nodes
            .iter()
            .find(|node| node.is_mesh && node.name.to_lowercase().contains("hole"))
    });

    node.map(|node| HoleRegion::from_bounds(&node.bounds))
        .ok_or(HoleLookupError::NotFound)
}

/// Find the node named "Ball".
pub fn locate_ball(nodes: &[SceneNode]) -> Option<&SceneNode> {
    nodes.iter().find(|node| node.name == BALL_NAME)
}

/// Ball radius from its mesh bounds (half the larger horizontal extent).
pub fn ball_radius_from_bounds(bounds: &Aabb) -> f64 {
    bounds.planar_radius()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn cube(center: DVec3, half: f64) -> Aabb {
        Aabb::new(center - DVec3::splat(half), center + DVec3::splat(half))
    }

    #[test]
    fn test_exact_name_preferred() {
        let nodes = vec![
            SceneNode::new("hole_decal", cube(DVec3::new(9.0, 0.0, 9.0), 0.5), true),
            SceneNode::new("HOLE", cube(DVec3::new(5.0, 0.0, 5.0), 0.2), true),
            SceneNode::new("Hole", cube(DVec3::new(1.0, 0.0, 2.0), 0.1), true),
        ];

        let hole = locate_hole(&nodes).unwrap();
        assert!((hole.center - DVec3::new(1.0, 0.0, 2.0)).length() < 1e-12);
        assert!((hole.radius - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_substring_fallback_needs_mesh() {
        let nodes = vec![
            SceneNode::new("HoleGroup", cube(DVec3::ZERO, 3.0), false),
            SceneNode::new("Cup_Hole.001", cube(DVec3::new(4.0, 0.0, 0.0), 0.1), true),
        ];

        let hole = locate_hole(&nodes).unwrap();
        assert!((hole.center.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_hole() {
        let nodes = vec![
            SceneNode::new("Green", cube(DVec3::ZERO, 10.0), true),
            SceneNode::new("Ball", cube(DVec3::ZERO, 0.05), true),
        ];
        assert_eq!(locate_hole(&nodes), Err(HoleLookupError::NotFound));
        assert_eq!(locate_hole(&[]), Err(HoleLookupError::NotFound));
    }

    #[test]
    fn test_ball_lookup_and_radius() {
        let nodes = vec![SceneNode::new(
            "Ball",
            Aabb::new(DVec3::new(-0.05, 0.0, -0.04), DVec3::new(0.05, 0.2, 0.04)),
            true,
        )];

        let ball = locate_ball(&nodes).unwrap();
        assert!((ball_radius_from_bounds(&ball.bounds) - 0.05).abs() < 1e-12);
        assert!(locate_ball(&[]).is_none());
    }
}
