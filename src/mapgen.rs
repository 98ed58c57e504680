//! Procedural obstacle fields.
//!
//! [`generate_walls`] scatters walls along Voronoi cell boundaries while
//! keeping both gameplay anchors and the straight corridor between them
//! clear. [`assign_open_side_anchors`] then marks the free sides of each
//! wall as spawner positions.

mod anchors;
mod voronoi;

pub use anchors::{
    ANCHOR_CHECK_DISTANCE, ANCHOR_GAP, MAX_ANCHORS_PER_WALL, assign_open_side_anchors,
};
pub use voronoi::{
    ANCHOR_EXCLUSION_RADIUS_SQ, DEFAULT_CORRIDOR_WIDTH_MULTIPLIER, GeneratedWalls, MAX_ATTEMPTS,
    VoronoiParams, generate_walls,
};
