use std::collections::HashMap;

use tracing::debug;

use crate::sound::category::SoundCategory;
use crate::sound::classify::{self, Resolution};
use crate::sound::host::{ComponentId, Discovery, EntityId, Registry, SceneView};

/// Cached outcome for one component identity, tagged with the owning entity
/// observed at resolution time so identity reuse can be detected.
#[derive(Debug, Clone)]
struct ResolutionRecord {
    owner: EntityId,
    resolution: Resolution,
}

/// Memoization layer over classification, keyed by component identity.
///
/// Classification (the discovery path in particular) is too costly to repeat
/// on every parameter update, so results are stored after the first call,
/// negatives included. Eviction is explicit: the host must call the
/// invalidation hooks on entity destruction and scene transitions, since
/// component identities may be reused and a stale hit would silently
/// misclassify a brand-new component.
///
/// Process-wide, single-threaded; not safe for concurrent use.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    records: HashMap<ComponentId, ResolutionRecord>,
    has_curve: HashMap<ComponentId, bool>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a component, consulting the cache first.
    ///
    /// A hit is validated against the component's current owner; a record
    /// whose owner no longer matches (destroyed entity, reused identity) is
    /// evicted and resolution retried exactly once. If the component cannot
    /// be looked up at all, the call returns `Unspecified` without caching.
    pub fn resolve(
        &mut self,
        component: ComponentId,
        scene: &dyn SceneView,
        discovery: &dyn Discovery,
        registry: &dyn Registry,
    ) -> Resolution {
        if let Some(record) = self.records.get(&component) {
            match scene.component(component) {
                Some(view) if view.owner == record.owner => {
                    return record.resolution.clone();
                }
                _ => {
                    debug!(
                        target: "cache",
                        component = component.0,
                        owner = record.owner.0,
                        "stale identity, evicting and retrying"
                    );
                    self.evict(component);
                }
            }
        }
        self.resolve_fresh(component, scene, discovery, registry)
    }

    /// Category-level view of [`resolve`]: a generic-profile resolution has
    /// no category and reads as `Unspecified` here.
    ///
    /// [`resolve`]: ResolutionCache::resolve
    pub fn resolve_category(
        &mut self,
        component: ComponentId,
        scene: &dyn SceneView,
        discovery: &dyn Discovery,
        registry: &dyn Registry,
    ) -> SoundCategory {
        match self.resolve(component, scene, discovery, registry) {
            Resolution::Category(category) => category,
            Resolution::Generic(_) => SoundCategory::Unspecified,
        }
    }

    fn resolve_fresh(
        &mut self,
        component: ComponentId,
        scene: &dyn SceneView,
        discovery: &dyn Discovery,
        registry: &dyn Registry,
    ) -> Resolution {
        let Some(view) = scene.component(component) else {
            return Resolution::Category(SoundCategory::Unspecified);
        };
        let Some(kind) = scene.entity_kind(view.owner) else {
            return Resolution::Category(SoundCategory::Unspecified);
        };
        let profiles = registry.profile_set(view.owner);
        let resolution = classify::resolve(component, &view, &kind, &profiles, discovery);
        self.records.insert(
            component,
            ResolutionRecord {
                owner: view.owner,
                resolution: resolution.clone(),
            },
        );
        resolution
    }

    /// Fast pre-check: does the resolved profile for this component carry a
    /// pitch curve? Memoized so components that never need curve work skip
    /// the resolution path entirely on subsequent calls.
    pub fn has_curve(
        &mut self,
        component: ComponentId,
        scene: &dyn SceneView,
        discovery: &dyn Discovery,
        registry: &dyn Registry,
    ) -> bool {
        if let Some(&flag) = self.has_curve.get(&component) {
            return flag;
        }
        let resolution = self.resolve(component, scene, discovery, registry);
        let Some(record) = self.records.get(&component) else {
            // Component could not be looked up; nothing to memoize.
            return false;
        };
        let profiles = registry.profile_set(record.owner);
        let flag = match &resolution {
            Resolution::Category(category) => profiles
                .get(*category)
                .map(|p| p.pitch_curve.is_some())
                .unwrap_or(false),
            Resolution::Generic(name) => profiles
                .get_generic(name)
                .map(|p| p.pitch_curve.is_some())
                .unwrap_or(false),
        };
        self.has_curve.insert(component, flag);
        flag
    }

    fn evict(&mut self, component: ComponentId) {
        self.records.remove(&component);
        self.has_curve.remove(&component);
    }

    /// Evict one component identity. Callable at any time.
    pub fn invalidate(&mut self, component: ComponentId) {
        self.evict(component);
    }

    /// Evict everything resolved under a destroyed entity.
    pub fn invalidate_entity(&mut self, entity: EntityId) {
        let stale: Vec<ComponentId> = self
            .records
            .iter()
            .filter(|(_, rec)| rec.owner == entity)
            .map(|(&id, _)| id)
            .collect();
        for id in &stale {
            self.evict(*id);
        }
        if !stale.is_empty() {
            debug!(target: "cache", entity = entity.0, evicted = stale.len(), "entity invalidated");
        }
    }

    /// Forget curve-presence memos for an entity's components, keeping the
    /// category resolutions. Needed after a profile commit, which may add or
    /// remove a curve behind an existing memo.
    pub fn refresh_curves_for_entity(&mut self, entity: EntityId) {
        let records = &self.records;
        self.has_curve
            .retain(|id, _| records.get(id).map(|rec| rec.owner) != Some(entity));
    }

    /// Drop every entry, e.g. on a scene transition.
    pub fn invalidate_all(&mut self) {
        self.records.clear();
        self.has_curve.clear();
    }
}
