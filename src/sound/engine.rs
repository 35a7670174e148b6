use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::sound::cache::ResolutionCache;
use crate::sound::category::SoundCategory;
use crate::sound::classify::Resolution;
use crate::sound::curve::CurveEngine;
use crate::sound::host::{
    AudioTargets, Catalog, ComponentId, Discovery, EntityId, Registry, SceneView,
};
use crate::sound::select::{InputEvent, RenderState, SelectionWorkflow};

/// Borrowed collaborator bundle the host passes into each hook call. The
/// host owns all of these; the engine never stores them.
pub struct HostContext<'a> {
    pub scene: &'a dyn SceneView,
    pub discovery: &'a dyn Discovery,
    pub registry: &'a mut dyn Registry,
    pub catalog: &'a dyn Catalog,
    pub targets: &'a mut dyn AudioTargets,
}

/// The engine facade: owns the resolution cache, the curve engine and the
/// selection workflow, and exposes the inbound hook surface the host calls
/// from its update loop.
///
/// Every hook completes synchronously on the calling thread and recovers
/// locally from host lookup failures; nothing here propagates an error back
/// into the host's update loop.
pub struct SoundCustomizer {
    cache: ResolutionCache,
    curves: CurveEngine,
    workflow: SelectionWorkflow,
}

impl SoundCustomizer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cache: ResolutionCache::new(),
            curves: CurveEngine::new(config.calibration.clone()),
            workflow: SelectionWorkflow::new(config.selection.clone()),
        }
    }

    /// Host startup hook. Present for lifecycle symmetry with [`dispose`];
    /// the engine needs no setup beyond construction.
    ///
    /// [`dispose`]: SoundCustomizer::dispose
    pub fn init(&mut self) {
        info!(target: "hooks", "sound customizer initialized");
    }

    /// Host teardown hook: clears the cache and resets the workflow. The
    /// host must stop invoking hooks after this.
    pub fn dispose(&mut self) {
        self.cache.invalidate_all();
        self.workflow.disable();
        info!(target: "hooks", "sound customizer disposed");
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn workflow(&self) -> &SelectionWorkflow {
        &self.workflow
    }

    /// Called before the host applies a static pitch/volume to a component;
    /// overwrites either with the resolved profile's fields when present.
    pub fn on_parameter_update(
        &mut self,
        ctx: &mut HostContext<'_>,
        component: ComponentId,
        pitch: &mut f32,
        volume: &mut f32,
    ) {
        let resolution = self
            .cache
            .resolve(component, ctx.scene, ctx.discovery, ctx.registry);
        if resolution.is_unspecified() {
            return;
        }
        let Some(view) = ctx.scene.component(component) else {
            return;
        };
        let set = ctx.registry.profile_set(view.owner);
        let Some(profile) = resolution.profile_in(&set) else {
            return;
        };
        if let Some(p) = profile.pitch {
            *pitch = p;
        }
        if let Some(v) = profile.max_volume {
            *volume = v;
        }
        debug!(
            target: "hooks",
            component = component.0,
            profile = %profile.name,
            "parameter update overridden"
        );
    }

    /// Called when a continuously varying parameter changes. If the
    /// resolved profile carries a pitch curve, the raw value is replaced by
    /// the curve output; otherwise it passes through untouched.
    pub fn on_continuous_value_set(
        &mut self,
        ctx: &mut HostContext<'_>,
        component: ComponentId,
        value: &mut f32,
    ) {
        // Fast negative pre-check: most components never carry a curve.
        if !self
            .cache
            .has_curve(component, ctx.scene, ctx.discovery, ctx.registry)
        {
            return;
        }
        let resolution = self
            .cache
            .resolve(component, ctx.scene, ctx.discovery, ctx.registry);
        let Some(view) = ctx.scene.component(component) else {
            return;
        };
        let set = ctx.registry.profile_set(view.owner);
        let Some(profile) = resolution.profile_in(&set) else {
            return;
        };
        let Some(curve) = &profile.pitch_curve else {
            return;
        };
        let category = match &resolution {
            Resolution::Category(category) => *category,
            Resolution::Generic(_) => SoundCategory::Unspecified,
        };
        *value = self.curves.evaluate(category, curve, *value);
    }

    /// Entity-destroy notification: evicts every cache entry resolved under
    /// that entity, so a reused component identity re-resolves.
    pub fn on_entity_destroyed(&mut self, entity: EntityId) {
        self.cache.invalidate_entity(entity);
    }

    /// Scene/level transition notification: drops the whole cache.
    pub fn on_scene_transition(&mut self) {
        self.cache.invalidate_all();
    }

    /// Per-frame workflow update: consumes this frame's device events and
    /// returns the render instructions for the host to present.
    pub fn tick(&mut self, ctx: &mut HostContext<'_>, events: &[InputEvent]) -> RenderState {
        self.workflow.tick(
            events,
            ctx.scene,
            ctx.catalog,
            ctx.registry,
            ctx.targets,
            &mut self.cache,
        )
    }
}
