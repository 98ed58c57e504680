//! Voronoi-boundary wall placement with corridor carving.

// Grid math converts between float extents and cell counts
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::entity::Wall;
use crate::error::ConfigError;
use crate::math::{Bounds, Radius, Vec2};

/// Squared radius around the start and end anchors that stays wall-free.
pub const ANCHOR_EXCLUSION_RADIUS_SQ: f32 = 30_000.0;

/// Corridor half-width in wall radii when the level does not say.
pub const DEFAULT_CORRIDOR_WIDTH_MULTIPLIER: f32 = 3.0;

/// Generation passes before a short result is accepted anyway.
pub const MAX_ATTEMPTS: u32 = 8;

/// Inputs to [`generate_walls`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiParams {
    /// First gameplay anchor.
    pub start: Vec2,
    /// Second gameplay anchor.
    pub end: Vec2,
    /// Area to fill.
    pub stage: Bounds,
    /// Number of Voronoi sites.
    pub seed_count: usize,
    /// Sampling grid spacing.
    pub cell_size: f32,
    /// Radius of every generated wall.
    pub wall_radius: Radius,
    /// Chance to place a wall at each boundary sample, in `[0, 1]`.
    pub wall_density: f64,
    /// Retry when fewer walls than this are produced.
    pub min_wall_count: usize,
    /// Fixed seed; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Corridor half-width in wall radii.
    pub corridor_width_multiplier: Option<f32>,
}

/// Result of [`generate_walls`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWalls {
    /// The accepted wall set.
    pub walls: Vec<Wall>,
    /// Base seed; passing it back reproduces `walls` exactly.
    pub seed: u64,
    /// Passes used, `1..=MAX_ATTEMPTS`.
    pub attempts: u32,
}

impl VoronoiParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_count == 0 {
            return Err(ConfigError::NotPositive {
                field: "wall seed count",
                value: 0.0,
            });
        }
        ConfigError::require_positive("wall cell size", self.cell_size)?;
        ConfigError::require_in_range("wall density", self.wall_density, 0.0, 1.0)?;
        if let Some(multiplier) = self.corridor_width_multiplier {
            ConfigError::require_non_negative("corridor width multiplier", multiplier)?;
        }
        Ok(())
    }

    fn corridor_half_width(&self) -> f32 {
        self.wall_radius.get()
            * self
                .corridor_width_multiplier
                .unwrap_or(DEFAULT_CORRIDOR_WIDTH_MULTIPLIER)
    }

    fn is_clear_zone(&self, point: Vec2) -> bool {
        point.distance_squared(self.start) < ANCHOR_EXCLUSION_RADIUS_SQ
            || point.distance_squared(self.end) < ANCHOR_EXCLUSION_RADIUS_SQ
            || point.distance_to_segment(self.start, self.end) < self.corridor_half_width()
    }
}

/// Generate a wall field.
///
/// The same `params` with the same seed always produce the same walls.
///
/// # Errors
///
/// Returns [`ConfigError`] when the parameters are out of range.
pub fn generate_walls(params: &VoronoiParams) -> Result<GeneratedWalls, ConfigError> {
    params.validate()?;
    let base_seed = params
        .seed
        .unwrap_or_else(|| rand::thread_rng().next_u64());

    let mut walls = Vec::new();
    let mut attempts = 0;
    while attempts < MAX_ATTEMPTS {
        attempts += 1;
        walls = generate_once(params, derive_seed(base_seed, attempts - 1));
        if walls.len() >= params.min_wall_count {
            break;
        }
        log::debug!(
            "wall generation attempt {attempts} produced {} of {} walls",
            walls.len(),
            params.min_wall_count
        );
    }

    Ok(GeneratedWalls {
        walls,
        seed: base_seed,
        attempts,
    })
}

fn derive_seed(base: u64, attempt: u32) -> u64 {
    base ^ u64::from(attempt).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn generate_once(params: &VoronoiParams, seed: u64) -> Vec<Wall> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let stage = &params.stage;

    let sites: Vec<Vec2> = (0..params.seed_count)
        .map(|_| {
            Vec2::new(
                rng.gen_range(stage.left()..=stage.right()),
                rng.gen_range(stage.top()..=stage.bottom()),
            )
        })
        .collect();

    let cell = params.cell_size;
    let half = cell * 0.5;
    let columns = (stage.width() / cell).ceil() as usize;
    let rows = (stage.height() / cell).ceil() as usize;
    let mut walls = Vec::new();

    for row in 0..rows {
        for column in 0..columns {
            let sample = Vec2::new(
                (column as f32).mul_add(cell, stage.left()),
                (row as f32).mul_add(cell, stage.top()),
            );
            let here = nearest_site(&sites, sample);
            let right = nearest_site(&sites, sample + Vec2::new(cell, 0.0));
            let below = nearest_site(&sites, sample + Vec2::new(0.0, cell));

            if here != right && rng.gen_bool(params.wall_density) {
                place(params, sample + Vec2::new(half, 0.0), &mut walls);
            }
            if here != below && rng.gen_bool(params.wall_density) {
                place(params, sample + Vec2::new(0.0, half), &mut walls);
            }
        }
    }

    walls
}

fn place(params: &VoronoiParams, candidate: Vec2, walls: &mut Vec<Wall>) {
    if params.stage.contains(candidate) && !params.is_clear_zone(candidate) {
        walls.push(Wall::new(candidate, params.wall_radius));
    }
}

fn nearest_site(sites: &[Vec2], point: Vec2) -> usize {
    sites
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.distance_squared(point)
                .total_cmp(&b.distance_squared(point))
        })
        .map_or(0, |(index, _)| index)
}
