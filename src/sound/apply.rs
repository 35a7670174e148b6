use tracing::debug;

use crate::sound::host::{AudioTargets, EntityId};
use crate::sound::profile::ProfileSet;

/// Push a profile set's static fields onto the entity's live components.
///
/// Pure sink: fields absent from a profile leave the live parameter alone,
/// and a category with no live target on this entity kind is skipped — both
/// are expected, neither is an error.
pub fn apply(entity: EntityId, profiles: &ProfileSet, targets: &mut dyn AudioTargets) {
    for category in profiles.categories() {
        let Some(profile) = profiles.get(category) else {
            continue;
        };
        let Some(params) = targets.target(entity, category) else {
            debug!(target: "apply", entity = entity.0, ?category, "no live target, skipped");
            continue;
        };
        if let Some(pitch) = profile.pitch {
            params.pitch = pitch;
        }
        if let Some(max_volume) = profile.max_volume {
            params.max_volume = max_volume;
        }
        if let Some(curve) = &profile.pitch_curve {
            params.curve = Some(curve.clone());
        }
    }
}
