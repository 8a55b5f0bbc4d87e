// simulation/simulation.rs
// The Simulation struct and the two-phase tick pipeline: spawn, parallel
// region workers, synchronized commit, terminal check.

use super::collision::{self, RegionOutcome};
use super::registry::Registry;
use super::spawn;
use crate::body::{Body, Category};
use crate::config::SimConfig;
use crate::grid::RegionGrid;
use crate::profile_scope;
use parking_lot::Mutex;
use rayon::prelude::*;
use ultraviolet::Vec2;

/// Read-only view of one live body, for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyView {
    pub pos: Vec2,
    pub radius: f32,
    pub category: Category,
}

/// The whole arena: shared registry, region grid, a worker pool with one
/// thread per region, and the seeded RNG behind every random draw.
pub struct Simulation {
    config: SimConfig,
    registry: Mutex<Registry>,
    grid: RegionGrid,
    pool: rayon::ThreadPool,
    rng: fastrand::Rng,
    /// Monotonic sim clock, advanced by `dt` each tick. Cooldown
    /// timestamps are expressed against it.
    time: f32,
    since_last_launch: f32,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, String> {
        config.validate()?;
        let grid = RegionGrid::new(config.width, config.height, config.regions_x, config.regions_y);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(grid.region_count())
            .build()
            .map_err(|err| format!("failed to build region worker pool: {err}"))?;
        let rng = fastrand::Rng::with_seed(config.seed);
        Ok(Self {
            config,
            registry: Mutex::new(Registry::new()),
            grid,
            pool,
            rng,
            time: 0.0,
            since_last_launch: 0.0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Advance the arena by one step of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        profile_scope!("tick");
        self.time += dt;
        self.since_last_launch += dt;

        self.maybe_launch();
        let outcomes = self.run_regions(dt);
        self.commit(outcomes);
        self.check_terminal();
    }

    /// Spawner gate: one attempt per elapsed interval while the created
    /// total is below target. Runs under the registry lock so it cannot
    /// interleave with a commit.
    fn maybe_launch(&mut self) {
        if self.since_last_launch < self.config.spawn_interval {
            return;
        }
        self.since_last_launch = 0.0;
        let mut registry = self.registry.lock();
        if registry.total_created() < self.config.spawn_target {
            spawn::try_launch(&mut registry, &self.config, &mut self.rng);
        }
    }

    /// Parallel phase: check the population out of the registry into
    /// disjoint per-region buckets and run one worker task per region.
    /// Each worker integrates its bodies, then resolves collisions; the
    /// `collect` below is the join that bounds the phase.
    fn run_regions(&mut self, dt: f32) -> Vec<RegionOutcome> {
        profile_scope!("regions");
        let (bodies, counts) = {
            let mut registry = self.registry.lock();
            (registry.take_bodies(), registry.counts())
        };
        let buckets = self
            .grid
            .partition(bodies, self.config.agitation_impulse, &mut self.rng);

        let now = self.time;
        let config = &self.config;
        self.pool.install(|| {
            buckets
                .into_par_iter()
                .map(|mut bucket| {
                    for body in &mut bucket {
                        body.integrate(dt, config);
                    }
                    collision::resolve_region(bucket, now, counts, config)
                })
                .collect()
        })
    }

    /// Commit phase: one exclusive section applies every region's
    /// structural changes. Merge newborns pass the authoritative cap
    /// check here; over-cap newborns are dropped.
    fn commit(&mut self, outcomes: Vec<RegionOutcome>) {
        profile_scope!("commit");
        let mut registry = self.registry.lock();
        for outcome in outcomes {
            registry.apply_eliminations(&outcome.eliminated);
            registry.readmit(outcome.survivors);
            for body in outcome.spawned {
                registry.try_insert_merged(body, self.config.per_category_cap);
            }
        }
    }

    /// Terminal condition: exactly one category left after enough bodies
    /// have been launched. Restarts the arena, it does not stop it.
    fn check_terminal(&mut self) {
        let mut registry = self.registry.lock();
        if registry.total_created() < self.config.min_created_for_reset {
            return;
        }
        if let Some(winner) = registry.sole_survivor() {
            log::info!("category {} holds the arena; restarting", winner.name());
            registry.clear_with_winner(winner);
            drop(registry);
            self.since_last_launch = 0.0;
        }
    }

    /// Read-only copy of the live population. Idempotent between ticks.
    pub fn snapshot(&self) -> Vec<BodyView> {
        self.registry
            .lock()
            .bodies()
            .iter()
            .map(|body| BodyView {
                pos: body.pos,
                radius: body.radius,
                category: body.category,
            })
            .collect()
    }

    /// Clear the registry and counters. The recorded winner survives a
    /// manual reset.
    pub fn reset(&mut self) {
        self.registry.lock().clear();
        self.since_last_launch = 0.0;
    }

    /// Insert a body directly, bypassing the spawner gates. Intended for
    /// staged setups and tests; counts it as launched.
    pub fn insert(&mut self, body: Body) {
        self.registry.lock().insert_launched(body);
    }

    pub fn len(&self) -> usize {
        self.registry.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.lock().is_empty()
    }

    pub fn counts(&self) -> [usize; Category::COUNT] {
        self.registry.lock().counts()
    }

    pub fn total_created(&self) -> usize {
        self.registry.lock().total_created()
    }

    pub fn last_winner(&self) -> Option<Category> {
        self.registry.lock().last_winner()
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}
