use tracing::debug;

use crate::sound::category::{self, SoundCategory};
use crate::sound::host::{ComponentId, ComponentKind, ComponentView, Discovery, EntityKind};
use crate::sound::profile::ProfileSet;

/// Outcome of resolving a component against an entity's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A semantic category (possibly `Unspecified`).
    Category(SoundCategory),
    /// A generic clip-name profile key; used only when category
    /// classification failed on a clip-driven component.
    Generic(String),
}

impl Resolution {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Resolution::Category(SoundCategory::Unspecified))
    }

    /// The profile this resolution points at within a profile set, if any.
    pub fn profile_in<'a>(
        &self,
        set: &'a ProfileSet,
    ) -> Option<&'a crate::sound::profile::AudioProfile> {
        match self {
            Resolution::Category(category) => set.get(*category),
            Resolution::Generic(name) => set.get_generic(name),
        }
    }
}

/// Categories the discovery mapping is consulted for, per component kind.
fn applicable_categories(kind: ComponentKind) -> &'static [SoundCategory] {
    match kind {
        ComponentKind::ParameterDriven => &[
            SoundCategory::HornLoop,
            SoundCategory::Whistle,
            SoundCategory::Bell,
            SoundCategory::AirCompressor,
            SoundCategory::Dynamo,
        ],
        ComponentKind::ClipDriven => &[
            SoundCategory::HornHit,
            SoundCategory::EngineStartup,
            SoundCategory::EngineShutdown,
        ],
    }
}

/// Determine which semantic category a component represents.
///
/// Priority order is part of the contract: the discovery mapping is
/// authoritative, then the first clip name, then the component's own name.
/// Unmatched input yields `Unspecified`; that is not an error.
pub fn classify(
    component: ComponentId,
    view: &ComponentView,
    discovery: &dyn Discovery,
) -> SoundCategory {
    for &candidate in applicable_categories(view.kind) {
        if discovery.mapped_component(view.owner, candidate) == Some(component) {
            debug!(target: "classify", component = component.0, ?candidate, "discovery mapping");
            return candidate;
        }
    }

    if let Some(clip) = view.first_clip() {
        let by_clip = category::match_name(clip);
        if by_clip.is_specified() {
            debug!(target: "classify", component = component.0, clip, ?by_clip, "clip-name match");
            return by_clip;
        }
    }

    let by_name = category::match_name(&view.name);
    if by_name.is_specified() {
        debug!(target: "classify", component = component.0, name = %view.name, ?by_name, "component-name match");
    }
    by_name
}

/// Full resolution: category classification plus the clip-driven
/// generic-sound fallback. The fallback fires only when classification
/// failed, the first clip name is in the kind's generic set, and the
/// entity's profile set carries an entry for that literal name.
pub fn resolve(
    component: ComponentId,
    view: &ComponentView,
    kind: &EntityKind,
    profiles: &ProfileSet,
    discovery: &dyn Discovery,
) -> Resolution {
    let by_category = classify(component, view, discovery);
    if by_category.is_specified() {
        return Resolution::Category(by_category);
    }

    if view.kind == ComponentKind::ClipDriven {
        if let Some(clip) = view.first_clip() {
            if discovery
                .generic_sound_names(kind)
                .iter()
                .any(|n| n == clip)
                && profiles.get_generic(clip).is_some()
            {
                debug!(target: "classify", component = component.0, clip, "generic-sound match");
                return Resolution::Generic(clip.to_string());
            }
        }
    }

    Resolution::Category(SoundCategory::Unspecified)
}
