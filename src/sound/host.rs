use serde::{Deserialize, Serialize};

use crate::core::curve::PitchCurve;
use crate::sound::category::SoundCategory;
use crate::sound::profile::{AudioProfile, ProfileSet};

/// Stable-for-session handle of a simulated entity (a vehicle). May be
/// reused by the host after the entity is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Stable-for-session handle of one audio-emitting part. Identity reuse
/// across destroy/recreate cycles is possible; the cache guards against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u64);

/// Host-defined vehicle kind, e.g. a locomotive model name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKind(pub String);

impl EntityKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// How a component produces sound, which decides which classification paths
/// apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Driven by a continuously varying parameter (pitch follows input).
    ParameterDriven,
    /// Driven by an array of content clips (one-shots, layered loops).
    ClipDriven,
}

/// Snapshot of a component as the host sees it, enough for classification.
#[derive(Debug, Clone)]
pub struct ComponentView {
    pub name: String,
    pub kind: ComponentKind,
    pub owner: EntityId,
    /// Clip names attached to a clip-driven component, in host order.
    pub clip_names: Vec<String>,
}

impl ComponentView {
    pub fn first_clip(&self) -> Option<&str> {
        self.clip_names.first().map(String::as_str)
    }
}

/// Mutable live parameters of a component, the sink the applicator writes
/// to and the structure curve evaluation reads from.
#[derive(Debug, Clone, Default)]
pub struct LiveAudioParams {
    pub pitch: f32,
    pub max_volume: f32,
    pub curve: Option<PitchCurve>,
}

/// Failure of an outbound collaborator call. Caught at each hook boundary;
/// never propagated into the host's update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A component reference was unexpectedly absent.
    MissingComponent(ComponentId),
    /// An entity reference was unexpectedly absent.
    MissingEntity(EntityId),
    /// The collaborator itself failed (message is host-defined).
    Collaborator(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::MissingComponent(id) => write!(f, "missing component {}", id.0),
            HostError::MissingEntity(id) => write!(f, "missing entity {}", id.0),
            HostError::Collaborator(msg) => write!(f, "collaborator failure: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Read access to the host's scene: component snapshots, ownership, entity
/// kinds, selectability.
pub trait SceneView {
    fn component(&self, id: ComponentId) -> Option<ComponentView>;
    fn entity_kind(&self, id: EntityId) -> Option<EntityKind>;
    /// Only designated subtypes (e.g. traction units) may be selected.
    fn is_selectable(&self, id: EntityId) -> bool;
}

/// Explicit entity+category -> component mapping, authoritative over the
/// name heuristics, plus the per-kind generic sound name set.
pub trait Discovery {
    fn mapped_component(&self, entity: EntityId, category: SoundCategory) -> Option<ComponentId>;
    fn generic_sound_names(&self, kind: &EntityKind) -> Vec<String>;
}

/// Source of truth for per-entity profile assignment, and the persistence
/// request surface. Durability is entirely the host's problem.
pub trait Registry {
    fn profile_set(&self, entity: EntityId) -> ProfileSet;
    fn update_profile_set(&mut self, entity: EntityId, set: ProfileSet) -> Result<(), HostError>;
    fn mark_customized(&mut self, entity: EntityId);
    fn save_state(&mut self, entity: EntityId, set: &ProfileSet) -> Result<(), HostError>;
}

/// Catalog of selectable profiles per vehicle kind and category, in the
/// order the workflow cycles through them.
pub trait Catalog {
    fn available_profiles(&self, kind: &EntityKind, category: SoundCategory) -> Vec<AudioProfile>;
}

/// Write access to live component parameters, looked up per entity and
/// category. `None` means the entity kind has no such part; that is not an
/// error.
pub trait AudioTargets {
    fn target(
        &mut self,
        entity: EntityId,
        category: SoundCategory,
    ) -> Option<&mut LiveAudioParams>;
}
