// config.rs
// Centralized simulation parameters: compile-time defaults plus the
// runtime SimConfig block (TOML-loadable, validated at construction).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ====================
// Arena
// ====================
pub const ARENA_WIDTH: f32 = 1600.0;
pub const ARENA_HEIGHT: f32 = 900.0;

// ====================
// Bodies
// ====================
pub const BODY_RADIUS: f32 = 15.0;
/// Max launch velocity component, in arena units per base tick.
pub const LAUNCH_SPEED: f32 = 4.0;
/// Velocity components below this magnitude are snapped to zero.
pub const VEL_EPSILON: f32 = 0.01;

// ====================
// Region grid
// ====================
pub const REGIONS_X: usize = 4;
pub const REGIONS_Y: usize = 2;

// ====================
// Lifecycle
// ====================
pub const PER_CATEGORY_CAP: usize = 50;
pub const SPAWN_TARGET: usize = 300;
pub const SPAWN_INTERVAL: f32 = 0.01;
pub const MERGE_COOLDOWN: f32 = 0.5;
/// Bodies that must have been launched before the single-category
/// terminal condition may trigger a reset.
pub const MIN_CREATED_FOR_RESET: usize = 10;

// ====================
// Collision response
// ====================
/// Velocity scale applied to the winner of a cross-category collision.
pub const ELIMINATION_DAMPING: f32 = 0.8;
/// Magnitude of the random velocity kick applied on region crossings.
pub const AGITATION_IMPULSE: f32 = 4.0;
pub const RESTITUTION: f32 = 1.0;
/// Per-tick velocity damping. 1.0 disables friction.
pub const TICK_DAMPING: f32 = 1.0;

// ====================
// Timing
// ====================
/// Nominal tick duration the per-tick velocities are calibrated against.
pub const BASE_TICK: f32 = 0.01;

/// Runtime configuration for one [`Simulation`](crate::simulation::Simulation).
///
/// Every field falls back to the matching compile-time constant, so a
/// TOML file only needs to name the values it overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub body_radius: f32,
    pub regions_x: usize,
    pub regions_y: usize,
    pub per_category_cap: usize,
    pub spawn_target: usize,
    pub spawn_interval: f32,
    pub launch_speed: f32,
    pub merge_cooldown: f32,
    pub min_created_for_reset: usize,
    pub elimination_damping: f32,
    pub agitation_impulse: f32,
    pub restitution: f32,
    pub damping: f32,
    pub vel_epsilon: f32,
    /// Seed for every random draw (spawn placement, category choice,
    /// agitation direction). Fixed seed means a reproducible run.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            body_radius: BODY_RADIUS,
            regions_x: REGIONS_X,
            regions_y: REGIONS_Y,
            per_category_cap: PER_CATEGORY_CAP,
            spawn_target: SPAWN_TARGET,
            spawn_interval: SPAWN_INTERVAL,
            launch_speed: LAUNCH_SPEED,
            merge_cooldown: MERGE_COOLDOWN,
            min_created_for_reset: MIN_CREATED_FOR_RESET,
            elimination_damping: ELIMINATION_DAMPING,
            agitation_impulse: AGITATION_IMPULSE,
            restitution: RESTITUTION,
            damping: TICK_DAMPING,
            vel_epsilon: VEL_EPSILON,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot run on. Called once at
    /// construction; a mid-run simulation never sees an invalid config.
    pub fn validate(&self) -> Result<(), String> {
        if self.body_radius <= 0.0 {
            return Err(format!("body_radius must be positive, got {}", self.body_radius));
        }
        if self.width <= 2.0 * self.body_radius || self.height <= 2.0 * self.body_radius {
            return Err(format!(
                "arena {}x{} cannot contain a body of radius {}",
                self.width, self.height, self.body_radius
            ));
        }
        if self.regions_x == 0 || self.regions_y == 0 {
            return Err(format!(
                "region grid must be non-empty, got {}x{}",
                self.regions_x, self.regions_y
            ));
        }
        if self.per_category_cap == 0 {
            return Err("per_category_cap must be at least 1".into());
        }
        if self.spawn_interval <= 0.0 {
            return Err(format!("spawn_interval must be positive, got {}", self.spawn_interval));
        }
        if self.merge_cooldown < 0.0 {
            return Err(format!("merge_cooldown must not be negative, got {}", self.merge_cooldown));
        }
        if self.elimination_damping <= 0.0 || self.elimination_damping >= 1.0 {
            return Err(format!(
                "elimination_damping must lie in (0, 1), got {}",
                self.elimination_damping
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(format!("restitution must lie in [0, 1], got {}", self.restitution));
        }
        if self.damping <= 0.0 || self.damping > 1.0 {
            return Err(format!("damping must lie in (0, 1], got {}", self.damping));
        }
        if self.vel_epsilon < 0.0 {
            return Err(format!("vel_epsilon must not be negative, got {}", self.vel_epsilon));
        }
        if self.agitation_impulse < 0.0 {
            return Err(format!(
                "agitation_impulse must not be negative, got {}",
                self.agitation_impulse
            ));
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn region_count(&self) -> usize {
        self.regions_x * self.regions_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_grid() {
        let cfg = SimConfig { regions_x: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_radius() {
        let cfg = SimConfig { body_radius: 0.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { body_radius: -3.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_cap() {
        let cfg = SimConfig { per_category_cap: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_arena_smaller_than_one_body() {
        let cfg = SimConfig { width: 20.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: SimConfig = toml::from_str("per_category_cap = 8\nseed = 42").unwrap();
        assert_eq!(cfg.per_category_cap, 8);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.width, ARENA_WIDTH);
        assert_eq!(cfg.regions_x, REGIONS_X);
    }
}
