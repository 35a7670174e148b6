use crate::config::EngineConfig;
use crate::core::curve::PitchCurve;
use crate::sound::adapters::{
    MemoryRegistry, MemoryTargets, SceneTable, StaticCatalog, StaticDiscovery,
};
use crate::sound::apply;
use crate::sound::cache::ResolutionCache;
use crate::sound::category::SoundCategory;
use crate::sound::classify::{self, Resolution};
use crate::sound::engine::{HostContext, SoundCustomizer};
use crate::sound::host::{
    ComponentId, ComponentKind, EntityId, EntityKind, LiveAudioParams, SceneView,
};
use crate::sound::profile::{AudioProfile, ProfileSet};
use crate::sound::select::InputEvent;

const LOCO: EntityId = EntityId(1);
const HORN: ComponentId = ComponentId(10);

fn loco_kind() -> EntityKind {
    EntityKind::new("DE2")
}

fn scene_with_horn() -> SceneTable {
    let mut scene = SceneTable::new();
    scene.add_entity(LOCO, loco_kind(), true);
    scene.add_component(
        HORN,
        LOCO,
        "hornAudio",
        ComponentKind::ClipDriven,
        vec!["HornHit_01".into()],
    );
    scene
}

#[test]
fn discovery_mapping_wins_over_clip_name() {
    let scene = scene_with_horn();
    let mut discovery = StaticDiscovery::new();
    // The mapping says this clip-driven component is the engine startup
    // sound; the clip name says horn-hit. The mapping is authoritative.
    discovery.map(LOCO, SoundCategory::EngineStartup, HORN);
    let view = scene.component(HORN).unwrap();
    assert_eq!(
        classify::classify(HORN, &view, &discovery),
        SoundCategory::EngineStartup
    );
}

#[test]
fn component_name_is_the_last_fallback() {
    let mut scene = SceneTable::new();
    scene.add_entity(LOCO, loco_kind(), true);
    scene.add_component(
        ComponentId(11),
        LOCO,
        "bellController",
        ComponentKind::ParameterDriven,
        vec![],
    );
    let view = scene.component(ComponentId(11)).unwrap();
    let discovery = StaticDiscovery::new();
    assert_eq!(
        classify::classify(ComponentId(11), &view, &discovery),
        SoundCategory::Bell
    );
}

#[test]
fn generic_match_needs_both_the_name_set_and_a_profile_entry() {
    let mut scene = SceneTable::new();
    scene.add_entity(LOCO, loco_kind(), true);
    scene.add_component(
        ComponentId(12),
        LOCO,
        "miscAudio",
        ComponentKind::ClipDriven,
        vec!["sand_flow".into()],
    );
    let view = scene.component(ComponentId(12)).unwrap();
    let mut discovery = StaticDiscovery::new();
    discovery.set_generic_names(loco_kind(), vec!["sand_flow".into()]);

    // In the generic name set, but no profile entry: stays unspecified.
    let empty = ProfileSet::new();
    let res = classify::resolve(ComponentId(12), &view, &loco_kind(), &empty, &discovery);
    assert!(res.is_unspecified());

    // With a profile entry for the literal clip name it resolves generically.
    let mut set = ProfileSet::new();
    set.set_generic(
        "sand_flow",
        AudioProfile::new("quiet sand", SoundCategory::Unspecified).with_max_volume(0.4),
    );
    let res = classify::resolve(ComponentId(12), &view, &loco_kind(), &set, &discovery);
    assert_eq!(res, Resolution::Generic("sand_flow".into()));
}

#[test]
fn generic_match_is_clip_driven_only() {
    let mut scene = SceneTable::new();
    scene.add_entity(LOCO, loco_kind(), true);
    scene.add_component(
        ComponentId(13),
        LOCO,
        "misc",
        ComponentKind::ParameterDriven,
        vec!["sand_flow".into()],
    );
    let view = scene.component(ComponentId(13)).unwrap();
    let mut discovery = StaticDiscovery::new();
    discovery.set_generic_names(loco_kind(), vec!["sand_flow".into()]);
    let mut set = ProfileSet::new();
    set.set_generic(
        "sand_flow",
        AudioProfile::new("quiet sand", SoundCategory::Unspecified),
    );
    let res = classify::resolve(ComponentId(13), &view, &loco_kind(), &set, &discovery);
    assert!(res.is_unspecified());
}

#[test]
fn cache_detects_owner_change_and_retries_once() {
    let mut scene = scene_with_horn();
    let discovery = StaticDiscovery::new();
    let registry = MemoryRegistry::new();
    let mut cache = ResolutionCache::new();

    let first = cache.resolve(HORN, &scene, &discovery, &registry);
    assert_eq!(first, Resolution::Category(SoundCategory::HornHit));

    // Host reuses the component identity on a different entity with a
    // different clip. The stale record must not leak through.
    scene.destroy_entity(LOCO);
    scene.add_entity(EntityId(2), EntityKind::new("DM3"), true);
    scene.add_component(
        HORN,
        EntityId(2),
        "bellAudio",
        ComponentKind::ParameterDriven,
        vec![],
    );
    let second = cache.resolve(HORN, &scene, &discovery, &registry);
    assert_eq!(second, Resolution::Category(SoundCategory::Bell));
}

#[test]
fn cache_returns_unspecified_for_unknown_component_without_storing() {
    let scene = SceneTable::new();
    let discovery = StaticDiscovery::new();
    let registry = MemoryRegistry::new();
    let mut cache = ResolutionCache::new();
    let res = cache.resolve(ComponentId(99), &scene, &discovery, &registry);
    assert!(res.is_unspecified());
    assert!(cache.is_empty());
}

#[test]
fn applicator_applies_only_present_fields() {
    let mut targets = MemoryTargets::new();
    targets.add_slot(
        LOCO,
        SoundCategory::Whistle,
        LiveAudioParams {
            pitch: 1.0,
            max_volume: 0.7,
            curve: None,
        },
    );
    let mut set = ProfileSet::new();
    set.set(AudioProfile::new("loud whistle", SoundCategory::Whistle).with_max_volume(1.0));
    // A profile for a category with no live slot on this entity: skipped.
    set.set(AudioProfile::new("deep horn", SoundCategory::HornLoop).with_pitch(0.8));

    apply::apply(LOCO, &set, &mut targets);

    let params = targets.get(LOCO, SoundCategory::Whistle).unwrap();
    assert_eq!(params.pitch, 1.0);
    assert_eq!(params.max_volume, 1.0);
}

#[test]
fn commit_on_unselectable_target_is_a_noop() {
    let mut scene = SceneTable::new();
    scene.add_entity(LOCO, loco_kind(), false);
    let mut registry = MemoryRegistry::new();
    let catalog = StaticCatalog::new();
    let mut targets = MemoryTargets::new();
    let discovery = StaticDiscovery::new();
    let mut engine = SoundCustomizer::new(EngineConfig::default());

    let mut ctx = HostContext {
        scene: &scene,
        discovery: &discovery,
        registry: &mut registry,
        catalog: &catalog,
        targets: &mut targets,
    };
    let render = engine.tick(
        &mut ctx,
        &[InputEvent::PointAt(Some(LOCO)), InputEvent::Commit],
    );
    assert!(!render.commit_enabled);
    assert!(render.text.contains("Point at a vehicle"));
}

#[test]
fn continuous_hook_replaces_value_only_with_a_curve() {
    let scene = scene_with_horn();
    let discovery = StaticDiscovery::new();
    let mut registry = MemoryRegistry::new();
    let mut set = ProfileSet::new();
    set.set(
        AudioProfile::new("two-tone", SoundCategory::HornHit)
            .with_curve(PitchCurve::from_values(&[0.8, 1.6])),
    );
    registry.insert(LOCO, set);
    let catalog = StaticCatalog::new();
    let mut targets = MemoryTargets::new();
    let mut engine = SoundCustomizer::new(EngineConfig::default());

    let mut ctx = HostContext {
        scene: &scene,
        discovery: &discovery,
        registry: &mut registry,
        catalog: &catalog,
        targets: &mut targets,
    };
    // Standard range [0.5, 2.0]; raw 1.25 normalizes to 0.5.
    let mut value = 1.25;
    engine.on_continuous_value_set(&mut ctx, HORN, &mut value);
    assert!((value - 1.2).abs() < 1e-6);
}
