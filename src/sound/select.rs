use tracing::{debug, info, warn};

use crate::config::SelectionConfig;
use crate::sound::apply;
use crate::sound::cache::ResolutionCache;
use crate::sound::category::SoundCategory;
use crate::sound::host::{AudioTargets, Catalog, EntityId, EntityKind, Registry, SceneView};
use crate::sound::profile::AudioProfile;

/// Phase of the interactive selection protocol. There is no terminal phase;
/// `Disable` and a completed commit both land back at `PointAtEntity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    PointAtEntity,
    ChooseCategory,
    ChooseProfile,
}

/// Discrete input events from the host's device collaborator, consumed in
/// order by [`SelectionWorkflow::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The pointed-at entity changed (or nothing is pointed at).
    PointAt(Option<EntityId>),
    Commit,
    CycleForward,
    CycleBackward,
    Disable,
}

/// Per-frame render instructions for the host to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub text: String,
    pub commit_enabled: bool,
    pub cycle_enabled: bool,
}

fn cycle_index(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// The point/choose/confirm state machine.
///
/// Owns the transient selection cursors; the committed configuration lives
/// in the host's registry. Single-threaded, driven once per host frame.
#[derive(Debug)]
pub struct SelectionWorkflow {
    config: SelectionConfig,
    phase: SelectionPhase,
    pointed: Option<EntityId>,
    selected: Option<(EntityId, EntityKind)>,
    categories: Vec<SoundCategory>,
    category_index: usize,
    profiles: Vec<AudioProfile>,
    profile_index: usize,
}

impl SelectionWorkflow {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            phase: SelectionPhase::PointAtEntity,
            pointed: None,
            selected: None,
            categories: Vec::new(),
            category_index: 0,
            profiles: Vec::new(),
            profile_index: 0,
        }
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn category_index(&self) -> usize {
        self.category_index
    }

    pub fn profile_index(&self) -> usize {
        self.profile_index
    }

    pub fn current_category(&self) -> Option<SoundCategory> {
        self.categories.get(self.category_index).copied()
    }

    pub fn current_profile(&self) -> Option<&AudioProfile> {
        self.profiles.get(self.profile_index)
    }

    /// Reset to `PointAtEntity`, clearing all cursors and references.
    pub fn disable(&mut self) {
        self.phase = SelectionPhase::PointAtEntity;
        self.pointed = None;
        self.selected = None;
        self.categories.clear();
        self.category_index = 0;
        self.profiles.clear();
        self.profile_index = 0;
    }

    /// Consume this frame's input events in order, then produce the render
    /// instructions for the host.
    pub fn tick(
        &mut self,
        events: &[InputEvent],
        scene: &dyn SceneView,
        catalog: &dyn Catalog,
        registry: &mut dyn Registry,
        targets: &mut dyn AudioTargets,
        cache: &mut ResolutionCache,
    ) -> RenderState {
        for &event in events {
            self.handle_event(event, scene, catalog, registry, targets, cache);
        }
        // A pointed-at entity that vanished or went out of range reads as
        // "no target"; a previously committed selection is not re-validated.
        if self.phase == SelectionPhase::PointAtEntity {
            if let Some(entity) = self.pointed {
                if !scene.is_selectable(entity) {
                    self.pointed = None;
                }
            }
        }
        self.render(scene)
    }

    fn handle_event(
        &mut self,
        event: InputEvent,
        scene: &dyn SceneView,
        catalog: &dyn Catalog,
        registry: &mut dyn Registry,
        targets: &mut dyn AudioTargets,
        cache: &mut ResolutionCache,
    ) {
        match event {
            InputEvent::Disable => self.disable(),
            InputEvent::PointAt(target) => {
                // Non-selectable subtypes read the same as pointing at nothing.
                self.pointed = target.filter(|&e| scene.is_selectable(e));
            }
            InputEvent::CycleForward | InputEvent::CycleBackward => {
                let forward = event == InputEvent::CycleForward;
                match self.phase {
                    SelectionPhase::ChooseCategory => {
                        self.category_index =
                            cycle_index(self.category_index, self.categories.len(), forward);
                    }
                    SelectionPhase::ChooseProfile => {
                        self.profile_index =
                            cycle_index(self.profile_index, self.profiles.len(), forward);
                    }
                    SelectionPhase::PointAtEntity => {}
                }
            }
            InputEvent::Commit => {
                self.handle_commit(scene, catalog, registry, targets, cache)
            }
        }
    }

    fn handle_commit(
        &mut self,
        scene: &dyn SceneView,
        catalog: &dyn Catalog,
        registry: &mut dyn Registry,
        targets: &mut dyn AudioTargets,
        cache: &mut ResolutionCache,
    ) {
        match self.phase {
            SelectionPhase::PointAtEntity => {
                let Some(entity) = self.pointed else {
                    return;
                };
                if !scene.is_selectable(entity) {
                    return;
                }
                let Some(kind) = scene.entity_kind(entity) else {
                    return;
                };
                self.categories = SoundCategory::ALL
                    .iter()
                    .copied()
                    .filter(|&c| !catalog.available_profiles(&kind, c).is_empty())
                    .collect();
                self.category_index = 0;
                self.selected = Some((entity, kind));
                self.phase = SelectionPhase::ChooseCategory;
                debug!(
                    target: "select",
                    entity = entity.0,
                    categories = self.categories.len(),
                    "entity selected"
                );
            }
            SelectionPhase::ChooseCategory => {
                let Some(category) = self.current_category() else {
                    return;
                };
                let Some((_, kind)) = &self.selected else {
                    return;
                };
                self.profiles = catalog.available_profiles(kind, category);
                self.profile_index = 0;
                self.phase = SelectionPhase::ChooseProfile;
            }
            SelectionPhase::ChooseProfile => {
                if self.profiles.is_empty() {
                    self.phase = SelectionPhase::ChooseCategory;
                    return;
                }
                self.commit_profile(registry, targets, cache);
            }
        }
    }

    /// Write the chosen profile into the entity's profile set, apply it to
    /// the live components for immediate feedback, request persistence, and
    /// return to `PointAtEntity`.
    ///
    /// Registry failures are logged and swallowed; the workflow still
    /// completes its cycle so the operator is never stuck.
    fn commit_profile(
        &mut self,
        registry: &mut dyn Registry,
        targets: &mut dyn AudioTargets,
        cache: &mut ResolutionCache,
    ) {
        let (entity, profile) = match (self.selected.as_ref(), self.current_profile()) {
            (Some((entity, _)), Some(profile)) => (*entity, profile.clone()),
            _ => return,
        };

        let mut set = registry.profile_set(entity);
        set.set(profile.clone());
        set.customized = true;
        if let Err(err) = registry.update_profile_set(entity, set.clone()) {
            warn!(target: "select", entity = entity.0, %err, "profile set update failed");
            self.disable();
            return;
        }
        registry.mark_customized(entity);
        apply::apply(entity, &set, targets);
        cache.refresh_curves_for_entity(entity);
        if let Err(err) = registry.save_state(entity, &set) {
            warn!(target: "select", entity = entity.0, %err, "save request failed");
        }
        info!(
            target: "select",
            entity = entity.0,
            category = ?profile.category,
            profile = %profile.name,
            "profile committed"
        );
        self.disable();
    }

    fn render(&self, scene: &dyn SceneView) -> RenderState {
        match self.phase {
            SelectionPhase::PointAtEntity => match self.pointed {
                Some(entity) => {
                    let kind = scene
                        .entity_kind(entity)
                        .map(|k| k.0)
                        .unwrap_or_else(|| "vehicle".to_string());
                    RenderState {
                        text: format!("Target: {kind}\nCommit to customize its sounds."),
                        commit_enabled: true,
                        cycle_enabled: false,
                    }
                }
                None => RenderState {
                    text: "Point at a vehicle to customize its sounds.".to_string(),
                    commit_enabled: false,
                    cycle_enabled: false,
                },
            },
            SelectionPhase::ChooseCategory => match self.current_category() {
                Some(category) => RenderState {
                    text: format!(
                        "Sound type: {} ({}/{})",
                        category.label(),
                        self.category_index + 1,
                        self.categories.len()
                    ),
                    commit_enabled: true,
                    cycle_enabled: true,
                },
                None => RenderState {
                    text: "No sound types available for this vehicle.".to_string(),
                    commit_enabled: false,
                    cycle_enabled: false,
                },
            },
            SelectionPhase::ChooseProfile => match self.current_profile() {
                Some(profile) => {
                    let mut text = format!(
                        "Profile: {} ({}/{})",
                        profile.name,
                        self.profile_index + 1,
                        self.profiles.len()
                    );
                    if profile.category == SoundCategory::HornHit
                        && self.config.horn_hit_advisory
                    {
                        text.push_str(
                            "\nNote: a previously changed horn hit may need a vehicle reload to take a new profile.",
                        );
                    }
                    RenderState {
                        text,
                        commit_enabled: true,
                        cycle_enabled: true,
                    }
                }
                None => RenderState {
                    text: "No profiles available for this sound type.".to_string(),
                    commit_enabled: true,
                    cycle_enabled: false,
                },
            },
        }
    }
}
