// simulation/collision.rs
// Pairwise overlap detection and resolution within one region bucket.
// Runs single-threaded over a bucket the worker exclusively owns.

use crate::body::{Body, Category};
use crate::config::SimConfig;

/// What one region worker hands back to the commit phase.
pub struct RegionOutcome {
    pub survivors: Vec<Body>,
    /// Merge newborns, pending the authoritative cap re-check at commit.
    pub spawned: Vec<Body>,
    /// Per-category elimination tally for this pass.
    pub eliminated: [usize; Category::COUNT],
}

/// Resolve every overlapping pair in one region for this tick.
///
/// For each unordered pair `(i, j)` with `i < j`, both still live:
/// coincident centers are skipped, overlaps are first separated by half
/// the penetration each. Cross-category contact eliminates the strictly
/// slower body and damps the winner; an exact speed tie eliminates `j`
/// and damps `i`. Same-category contact merges when both cooldowns have
/// expired and the category is below cap per `count_snapshot` (tick-start
/// counts; merges already made in this pass are counted on top). A body
/// marked removed takes no further part in the pass.
pub fn resolve_region(
    mut bodies: Vec<Body>,
    now: f32,
    count_snapshot: [usize; Category::COUNT],
    config: &SimConfig,
) -> RegionOutcome {
    let n = bodies.len();
    let mut removed = vec![false; n];
    let mut spawned = Vec::new();
    let mut merged = [0usize; Category::COUNT];
    let mut eliminated = [0usize; Category::COUNT];

    for i in 0..n {
        for j in (i + 1)..n {
            if removed[i] {
                break;
            }
            if removed[j] {
                continue;
            }
            let delta = bodies[i].pos - bodies[j].pos;
            let dist = delta.mag();
            let min_dist = bodies[i].radius + bodies[j].radius;
            if dist <= 0.0 || dist >= min_dist {
                continue;
            }

            // Positional correction: half the overlap each, along the
            // center normal. The pair midpoint is preserved.
            let push = delta * (0.5 * (min_dist - dist) / dist);
            bodies[i].pos += push;
            bodies[j].pos -= push;

            if bodies[i].category != bodies[j].category {
                if bodies[i].speed() < bodies[j].speed() {
                    removed[i] = true;
                    eliminated[bodies[i].category.index()] += 1;
                    bodies[j].vel *= config.elimination_damping;
                } else {
                    // Ties land here: j is removed, i damped.
                    removed[j] = true;
                    eliminated[bodies[j].category.index()] += 1;
                    bodies[i].vel *= config.elimination_damping;
                }
            } else {
                let category = bodies[i].category;
                let cooled = now - bodies[i].last_spawn_time >= config.merge_cooldown
                    && now - bodies[j].last_spawn_time >= config.merge_cooldown;
                let below_cap = count_snapshot[category.index()] + merged[category.index()]
                    < config.per_category_cap;
                if cooled && below_cap {
                    let midpoint = (bodies[i].pos + bodies[j].pos) * 0.5;
                    let velocity = (bodies[i].vel + bodies[j].vel) * 0.5;
                    spawned.push(Body::new(midpoint, velocity, bodies[i].radius, category));
                    merged[category.index()] += 1;
                    bodies[i].last_spawn_time = now;
                    bodies[j].last_spawn_time = now;
                }
            }
        }
    }

    let survivors = bodies
        .into_iter()
        .zip(removed)
        .filter_map(|(body, gone)| (!gone).then_some(body))
        .collect();

    RegionOutcome { survivors, spawned, eliminated }
}
