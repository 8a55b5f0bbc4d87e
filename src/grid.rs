// grid.rs
// Fixed rectangular region partition of the arena and the per-tick
// ownership transfer into disjoint worker buckets.

use crate::body::Body;
use ultraviolet::Vec2;

/// A fixed `regions_x x regions_y` partition of the arena, indexed
/// row-major. Every position maps to exactly one region; positions on a
/// cell boundary resolve by floor-division.
pub struct RegionGrid {
    regions_x: usize,
    regions_y: usize,
    cell_width: f32,
    cell_height: f32,
}

impl RegionGrid {
    pub fn new(width: f32, height: f32, regions_x: usize, regions_y: usize) -> Self {
        Self {
            regions_x,
            regions_y,
            cell_width: width / regions_x as f32,
            cell_height: height / regions_y as f32,
        }
    }

    pub fn region_count(&self) -> usize {
        self.regions_x * self.regions_y
    }

    pub fn region_of(&self, pos: Vec2) -> usize {
        let x = ((pos.x / self.cell_width).floor() as isize)
            .clamp(0, self.regions_x as isize - 1) as usize;
        let y = ((pos.y / self.cell_height).floor() as isize)
            .clamp(0, self.regions_y as isize - 1) as usize;
        x + y * self.regions_x
    }

    /// Move the whole population into one owned bucket per region.
    ///
    /// A body whose region differs from last tick's receives a
    /// random-direction kick of `impulse` magnitude before bucketing, so
    /// the draw happens on the tick thread and stays seed-reproducible.
    /// Buckets are disjoint by construction; workers need no locking.
    pub fn partition(
        &self,
        bodies: Vec<Body>,
        impulse: f32,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<Body>> {
        let mut buckets: Vec<Vec<Body>> = (0..self.region_count()).map(|_| Vec::new()).collect();
        for mut body in bodies {
            let region = self.region_of(body.pos);
            if let Some(prev) = body.prev_region {
                if prev != region && impulse > 0.0 {
                    let angle = rng.f32() * std::f32::consts::TAU;
                    body.vel += Vec2::new(angle.cos(), angle.sin()) * impulse;
                }
            }
            body.prev_region = Some(region);
            buckets[region].push(body);
        }
        buckets
    }
}
