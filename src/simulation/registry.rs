// simulation/registry.rs
// The authoritative live population and its per-category bookkeeping.
// All structural mutation happens under the simulation's registry lock.

use crate::body::{Body, Category};

/// The shared multiset of live bodies. Counts are kept incrementally in a
/// fixed array indexed by category, so the commit phase never scans the
/// population to answer a cap check.
#[derive(Default)]
pub struct Registry {
    bodies: Vec<Body>,
    counts: [usize; Category::COUNT],
    total_created: usize,
    last_winner: Option<Category>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn counts(&self) -> [usize; Category::COUNT] {
        self.counts
    }

    pub fn count_of(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Launched bodies alone count toward the spawn target; merge
    /// newborns do not.
    pub fn total_created(&self) -> usize {
        self.total_created
    }

    pub fn last_winner(&self) -> Option<Category> {
        self.last_winner
    }

    /// Insert a freshly launched body and count it toward the target.
    pub fn insert_launched(&mut self, body: Body) {
        self.counts[body.category.index()] += 1;
        self.total_created += 1;
        self.bodies.push(body);
    }

    /// Insert a merge newborn if its category is still below cap. This is
    /// the authoritative cap check; a region worker's decision was made
    /// against a tick-start snapshot and may be stale.
    pub fn try_insert_merged(&mut self, body: Body, cap: usize) -> bool {
        let idx = body.category.index();
        if self.counts[idx] >= cap {
            return false;
        }
        self.counts[idx] += 1;
        self.bodies.push(body);
        true
    }

    /// Check the whole population out for one parallel phase. The counts
    /// keep describing the checked-out bodies until the commit adjusts
    /// them, so cap snapshots taken alongside the drain stay meaningful.
    pub fn take_bodies(&mut self) -> Vec<Body> {
        std::mem::take(&mut self.bodies)
    }

    /// Return a region's surviving bodies after its workers finished.
    pub fn readmit(&mut self, survivors: Vec<Body>) {
        self.bodies.extend(survivors);
    }

    pub fn apply_eliminations(&mut self, eliminated: &[usize; Category::COUNT]) {
        for (count, removed) in self.counts.iter_mut().zip(eliminated) {
            *count -= removed;
        }
    }

    /// The sole live category, if exactly one remains.
    pub fn sole_survivor(&self) -> Option<Category> {
        if self.bodies.is_empty() {
            return None;
        }
        let mut survivor = None;
        for category in Category::ALL {
            if self.counts[category.index()] > 0 {
                if survivor.is_some() {
                    return None;
                }
                survivor = Some(category);
            }
        }
        survivor
    }

    /// Terminal reset: clear everything and remember who won.
    pub fn clear_with_winner(&mut self, winner: Category) {
        self.last_winner = Some(winner);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.counts = [0; Category::COUNT];
        self.total_created = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ultraviolet::Vec2;

    fn body(category: Category) -> Body {
        Body::new(Vec2::new(100.0, 100.0), Vec2::zero(), 15.0, category)
    }

    #[test]
    fn counts_track_inserts() {
        let mut registry = Registry::new();
        registry.insert_launched(body(Category::Azure));
        registry.insert_launched(body(Category::Azure));
        registry.insert_launched(body(Category::Lime));
        assert_eq!(registry.count_of(Category::Azure), 2);
        assert_eq!(registry.count_of(Category::Lime), 1);
        assert_eq!(registry.total_created(), 3);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn merged_bodies_do_not_count_toward_target() {
        let mut registry = Registry::new();
        registry.insert_launched(body(Category::Azure));
        assert!(registry.try_insert_merged(body(Category::Azure), 50));
        assert_eq!(registry.total_created(), 1);
        assert_eq!(registry.count_of(Category::Azure), 2);
    }

    #[test]
    fn merge_insert_declines_at_cap() {
        let mut registry = Registry::new();
        registry.insert_launched(body(Category::Pink));
        registry.insert_launched(body(Category::Pink));
        assert!(!registry.try_insert_merged(body(Category::Pink), 2));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.count_of(Category::Pink), 2);
    }

    #[test]
    fn sole_survivor_requires_exactly_one_category() {
        let mut registry = Registry::new();
        assert_eq!(registry.sole_survivor(), None);
        registry.insert_launched(body(Category::Salmon));
        registry.insert_launched(body(Category::Salmon));
        assert_eq!(registry.sole_survivor(), Some(Category::Salmon));
        registry.insert_launched(body(Category::Banana));
        assert_eq!(registry.sole_survivor(), None);
    }

    #[test]
    fn clear_with_winner_zeroes_counters_and_records() {
        let mut registry = Registry::new();
        registry.insert_launched(body(Category::Emerald));
        registry.clear_with_winner(Category::Emerald);
        assert!(registry.is_empty());
        assert_eq!(registry.total_created(), 0);
        assert_eq!(registry.counts(), [0; Category::COUNT]);
        assert_eq!(registry.last_winner(), Some(Category::Emerald));
    }

    #[test]
    fn eliminations_decrement_counts() {
        let mut registry = Registry::new();
        registry.insert_launched(body(Category::Azure));
        registry.insert_launched(body(Category::Azure));
        let _ = registry.take_bodies();
        let mut eliminated = [0; Category::COUNT];
        eliminated[Category::Azure.index()] = 1;
        registry.apply_eliminations(&eliminated);
        assert_eq!(registry.count_of(Category::Azure), 1);
    }
}
