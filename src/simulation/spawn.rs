// simulation/spawn.rs
// Periodic launcher: one attempt per elapsed interval, declined silently
// when the drawn category is at cap or the drawn position is occupied.

use super::registry::Registry;
use crate::body::{Body, Category};
use crate::config::SimConfig;
use ultraviolet::Vec2;

/// Attempt to launch one new body into the registry. Caller holds the
/// registry lock, so the cap check, overlap check, and insert cannot
/// interleave with a commit.
pub fn try_launch(registry: &mut Registry, config: &SimConfig, rng: &mut fastrand::Rng) -> bool {
    let category = Category::ALL[rng.usize(..Category::COUNT)];
    if registry.count_of(category) >= config.per_category_cap {
        return false;
    }

    let radius = config.body_radius;
    let pos = Vec2::new(
        radius + rng.f32() * (config.width - 2.0 * radius),
        radius + rng.f32() * (config.height - 2.0 * radius),
    );
    let vel = Vec2::new(
        (rng.f32() * 2.0 - 1.0) * config.launch_speed,
        (rng.f32() * 2.0 - 1.0) * config.launch_speed,
    );

    // Reject placements on top of a live body rather than retrying; the
    // next interval gets another attempt.
    if registry
        .bodies()
        .iter()
        .any(|body| (body.pos - pos).mag() < 2.0 * radius)
    {
        return false;
    }

    registry.insert_launched(Body::new(pos, vel, radius, category));
    true
}
