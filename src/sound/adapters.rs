//! In-memory collaborator implementations. Hosts with simple needs can use
//! them directly; the integration tests drive the engine through them.

use std::collections::{HashMap, HashSet};

use crate::sound::category::SoundCategory;
use crate::sound::host::{
    AudioTargets, Catalog, ComponentId, ComponentKind, ComponentView, Discovery, EntityId,
    EntityKind, HostError, LiveAudioParams, Registry, SceneView,
};
use crate::sound::profile::{AudioProfile, ProfileSet};

/// Scene state as plain tables: entities with kinds, components with
/// owners, and the selectable subset.
#[derive(Debug, Default)]
pub struct SceneTable {
    entities: HashMap<EntityId, EntityKind>,
    selectable: HashSet<EntityId>,
    components: HashMap<ComponentId, ComponentView>,
}

impl SceneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, id: EntityId, kind: EntityKind, selectable: bool) {
        self.entities.insert(id, kind);
        if selectable {
            self.selectable.insert(id);
        }
    }

    pub fn add_component(
        &mut self,
        id: ComponentId,
        owner: EntityId,
        name: impl Into<String>,
        kind: ComponentKind,
        clip_names: Vec<String>,
    ) {
        self.components.insert(
            id,
            ComponentView {
                name: name.into(),
                kind,
                owner,
                clip_names,
            },
        );
    }

    /// Remove an entity and everything it owns, as the host would on
    /// destruction. The engine's `on_entity_destroyed` hook must still be
    /// called separately; this only mutates the scene.
    pub fn destroy_entity(&mut self, id: EntityId) {
        self.entities.remove(&id);
        self.selectable.remove(&id);
        self.components.retain(|_, view| view.owner != id);
    }
}

impl SceneView for SceneTable {
    fn component(&self, id: ComponentId) -> Option<ComponentView> {
        self.components.get(&id).cloned()
    }

    fn entity_kind(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).cloned()
    }

    fn is_selectable(&self, id: EntityId) -> bool {
        self.selectable.contains(&id)
    }
}

/// Fixed entity+category -> component mapping plus per-kind generic names.
#[derive(Debug, Default)]
pub struct StaticDiscovery {
    mappings: HashMap<(EntityId, SoundCategory), ComponentId>,
    generic_names: HashMap<EntityKind, Vec<String>>,
}

impl StaticDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, entity: EntityId, category: SoundCategory, component: ComponentId) {
        self.mappings.insert((entity, category), component);
    }

    pub fn set_generic_names(&mut self, kind: EntityKind, names: Vec<String>) {
        self.generic_names.insert(kind, names);
    }
}

impl Discovery for StaticDiscovery {
    fn mapped_component(&self, entity: EntityId, category: SoundCategory) -> Option<ComponentId> {
        self.mappings.get(&(entity, category)).copied()
    }

    fn generic_sound_names(&self, kind: &EntityKind) -> Vec<String> {
        self.generic_names.get(kind).cloned().unwrap_or_default()
    }
}

/// Profile sets held in a map, created lazily on first query. Persistence
/// requests are recorded so hosts (and tests) can observe them.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    sets: HashMap<EntityId, ProfileSet>,
    pub customized: HashSet<EntityId>,
    pub save_requests: Vec<EntityId>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: EntityId, set: ProfileSet) {
        self.sets.insert(entity, set);
    }
}

impl Registry for MemoryRegistry {
    fn profile_set(&self, entity: EntityId) -> ProfileSet {
        self.sets.get(&entity).cloned().unwrap_or_default()
    }

    fn update_profile_set(&mut self, entity: EntityId, set: ProfileSet) -> Result<(), HostError> {
        self.sets.insert(entity, set);
        Ok(())
    }

    fn mark_customized(&mut self, entity: EntityId) {
        self.customized.insert(entity);
    }

    fn save_state(&mut self, entity: EntityId, _set: &ProfileSet) -> Result<(), HostError> {
        self.save_requests.push(entity);
        Ok(())
    }
}

/// Catalog backed by a plain map, in insertion order per (kind, category).
#[derive(Debug, Default)]
pub struct StaticCatalog {
    profiles: HashMap<(EntityKind, SoundCategory), Vec<AudioProfile>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: EntityKind, profile: AudioProfile) {
        self.profiles
            .entry((kind, profile.category))
            .or_default()
            .push(profile);
    }

    /// Ingest a JSON array of profiles for one vehicle kind.
    pub fn add_json(&mut self, kind: EntityKind, json: &str) -> Result<(), serde_json::Error> {
        let profiles: Vec<AudioProfile> = serde_json::from_str(json)?;
        for profile in profiles {
            self.add(kind.clone(), profile);
        }
        Ok(())
    }
}

impl Catalog for StaticCatalog {
    fn available_profiles(&self, kind: &EntityKind, category: SoundCategory) -> Vec<AudioProfile> {
        self.profiles
            .get(&(kind.clone(), category))
            .cloned()
            .unwrap_or_default()
    }
}

/// Live parameter storage per (entity, category) slot.
#[derive(Debug, Default)]
pub struct MemoryTargets {
    slots: HashMap<(EntityId, SoundCategory), LiveAudioParams>,
}

impl MemoryTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slot(&mut self, entity: EntityId, category: SoundCategory, params: LiveAudioParams) {
        self.slots.insert((entity, category), params);
    }

    pub fn get(&self, entity: EntityId, category: SoundCategory) -> Option<&LiveAudioParams> {
        self.slots.get(&(entity, category))
    }
}

impl AudioTargets for MemoryTargets {
    fn target(
        &mut self,
        entity: EntityId,
        category: SoundCategory,
    ) -> Option<&mut LiveAudioParams> {
        self.slots.get_mut(&(entity, category))
    }
}
