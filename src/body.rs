// body.rs
// Category labels, per-body state, and the single-body integrator step.

use crate::config::SimConfig;
use ultraviolet::Vec2;

/// Collision-outcome label for a body. Two bodies of different categories
/// eliminate competitively; two of the same category may merge.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Category {
    Azure,
    Auburn,
    Banana,
    Cerulean,
    Salmon,
    Lime,
    Firebrick,
    Goldenrod,
    Pink,
    Emerald,
}

impl Category {
    pub const COUNT: usize = 10;

    pub const ALL: [Category; Self::COUNT] = [
        Category::Azure,
        Category::Auburn,
        Category::Banana,
        Category::Cerulean,
        Category::Salmon,
        Category::Lime,
        Category::Firebrick,
        Category::Goldenrod,
        Category::Pink,
        Category::Emerald,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Azure => "azure",
            Category::Auburn => "auburn",
            Category::Banana => "banana",
            Category::Cerulean => "cerulean",
            Category::Salmon => "salmon",
            Category::Lime => "lime",
            Category::Firebrick => "firebrick",
            Category::Goldenrod => "goldenrod",
            Category::Pink => "pink",
            Category::Emerald => "emerald",
        }
    }
}

/// One circular particle. Velocities are expressed in arena units per
/// base tick; the integrator rescales for arbitrary `dt`.
#[derive(Clone, Debug)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub category: Category,
    /// Sim-clock time of this body's last merge participation. Gates the
    /// merge cooldown; fresh bodies start merge-eligible.
    pub last_spawn_time: f32,
    /// Region id computed on the previous tick, `None` before the first
    /// partitioning. A change triggers the agitation impulse.
    pub prev_region: Option<usize>,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, category: Category) -> Self {
        Self {
            pos,
            vel,
            radius,
            category,
            last_spawn_time: 0.0,
            prev_region: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.mag()
    }

    /// Advance one tick: motion, rigid wall rebound, damping, and the
    /// micro-motion snap that keeps near-stationary bodies at rest.
    ///
    /// Afterwards the position lies within
    /// `[radius, width-radius] x [radius, height-radius]`.
    pub fn integrate(&mut self, dt: f32, config: &SimConfig) {
        let scale = dt / crate::config::BASE_TICK;
        self.pos += self.vel * scale;

        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x * config.restitution;
        } else if self.pos.x + self.radius > config.width {
            self.pos.x = config.width - self.radius;
            self.vel.x = -self.vel.x * config.restitution;
        }
        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y * config.restitution;
        } else if self.pos.y + self.radius > config.height {
            self.pos.y = config.height - self.radius;
            self.vel.y = -self.vel.y * config.restitution;
        }

        self.vel *= config.damping;
        if self.vel.x.abs() < config.vel_epsilon {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < config.vel_epsilon {
            self.vel.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SimConfig {
        SimConfig {
            width: 400.0,
            height: 300.0,
            body_radius: 10.0,
            ..SimConfig::default()
        }
    }

    fn contained(body: &Body, config: &SimConfig) -> bool {
        body.pos.x >= body.radius
            && body.pos.x <= config.width - body.radius
            && body.pos.y >= body.radius
            && body.pos.y <= config.height - body.radius
    }

    #[test]
    fn stays_within_bounds_after_integration() {
        let config = test_config();
        let mut body = Body::new(
            Vec2::new(395.0, 295.0),
            Vec2::new(50.0, 50.0),
            10.0,
            Category::Azure,
        );
        body.integrate(crate::config::BASE_TICK, &config);
        assert!(contained(&body, &config));
    }

    #[test]
    fn wall_rebound_inverts_velocity() {
        let config = test_config();
        let mut body = Body::new(
            Vec2::new(12.0, 150.0),
            Vec2::new(-5.0, 0.0),
            10.0,
            Category::Lime,
        );
        body.integrate(crate::config::BASE_TICK, &config);
        assert_eq!(body.pos.x, 10.0);
        assert!(body.vel.x > 0.0, "x velocity should have flipped");
        assert_eq!(body.vel.x, 5.0);
    }

    #[test]
    fn restitution_scales_the_rebound() {
        let config = SimConfig { restitution: 0.5, ..test_config() };
        let mut body = Body::new(
            Vec2::new(12.0, 150.0),
            Vec2::new(-8.0, 0.0),
            10.0,
            Category::Lime,
        );
        body.integrate(crate::config::BASE_TICK, &config);
        assert_eq!(body.vel.x, 4.0);
    }

    #[test]
    fn micro_velocities_snap_to_zero() {
        let config = test_config();
        let mut body = Body::new(
            Vec2::new(200.0, 150.0),
            Vec2::new(0.005, -0.009),
            10.0,
            Category::Pink,
        );
        body.integrate(crate::config::BASE_TICK, &config);
        assert_eq!(body.vel, Vec2::zero());
    }

    #[test]
    fn free_flight_advances_by_velocity() {
        let config = test_config();
        let mut body = Body::new(
            Vec2::new(200.0, 150.0),
            Vec2::new(3.0, -2.0),
            10.0,
            Category::Auburn,
        );
        body.integrate(crate::config::BASE_TICK, &config);
        assert_eq!(body.pos, Vec2::new(203.0, 148.0));
    }
}
