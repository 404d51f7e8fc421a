//! Live target set and its ordered queries
//!
//! The registry owns every in-flight target. Insertion order is preserved so
//! height ties resolve deterministically, matching the single-writer
//! discipline documented in [`crate::sim`].

use super::target::{Target, TargetId};

/// Owns the live set of in-flight targets.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a target. Ignores the insert (with a log) if the id is already
    /// present; the registry never holds two targets with one identity.
    pub fn insert(&mut self, target: Target) {
        if self.targets.iter().any(|t| t.id == target.id) {
            log::warn!("duplicate target id {:?} ignored", target.id);
            return;
        }
        self.targets.push(target);
    }

    /// Remove by identity; no-op when absent. Returns the removed target.
    pub fn remove(&mut self, id: TargetId) -> Option<Target> {
        let idx = self.targets.iter().position(|t| t.id == id)?;
        Some(self.targets.remove(idx))
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    /// The not-yet-fired-upon target closest to the danger line (smallest
    /// height), ties broken by insertion order. Fired-upon targets stay in
    /// the registry but are excluded here until a contact destroys them.
    pub fn lowest_unfired(&self) -> Option<&Target> {
        self.targets
            .iter()
            .filter(|t| !t.fired_upon)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }

    pub fn lowest_unfired_mut(&mut self) -> Option<&mut Target> {
        self.targets
            .iter_mut()
            .filter(|t| !t.fired_upon)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }

    /// Indices of all targets sorted ascending by height, stable for ties.
    /// Used by the pacing controller for spacing enforcement.
    pub fn height_ordered(&self) -> Vec<TargetId> {
        let mut ids: Vec<(f32, TargetId)> = self.targets.iter().map(|t| (t.pos.y, t.id)).collect();
        ids.sort_by(|a, b| a.0.total_cmp(&b.0));
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.targets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
