//! Engine lifecycle: ties the simulator, viewport, pointer, and
//! visibility gate together behind one tick entry point.

use std::time::Instant;

use meonji_core::{EngineConfig, Rgb};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::gate::{Transition, VisibilityGate};
use crate::pointer::{CanvasPointer, CanvasRect, PointerHub};
use crate::render::draw_particle;
use crate::simulator::Simulator;
use crate::surface::Surface;
use crate::viewport::{ResizeDebouncer, Viewport};

/// A running particle effect bound to one canvas.
#[derive(Debug)]
pub struct Engine {
    simulator: Simulator,
    viewport: Viewport,
    gate: VisibilityGate,
    debouncer: ResizeDebouncer,
    pointer: CanvasPointer,
    rng: StdRng,
}

impl Engine {
    /// Build an engine for the given viewport and spawn the pool.
    ///
    /// Returns `None` when the viewport has no drawable area: the
    /// effect degrades silently to "absent" instead of raising.
    pub fn new(config: EngineConfig, viewport: Viewport, hub: PointerHub) -> Option<Self> {
        Self::with_rng(config, viewport, hub, StdRng::from_entropy())
    }

    /// Like [`Engine::new`] with a caller-provided RNG, for
    /// deterministic tests.
    pub fn with_rng(
        config: EngineConfig,
        viewport: Viewport,
        hub: PointerHub,
        mut rng: StdRng,
    ) -> Option<Self> {
        if viewport.is_empty() {
            return None;
        }
        let mut simulator = Simulator::new(config);
        simulator.reinit(&mut rng, &viewport);
        Some(Self {
            simulator,
            viewport,
            gate: VisibilityGate::new(),
            debouncer: ResizeDebouncer::new(),
            pointer: CanvasPointer::new(hub),
            rng,
        })
    }

    /// Feed a visibility ratio. On `Parked` the host must stop
    /// scheduling ticks; on `Resumed` it should schedule the next one.
    pub fn observe_visibility(&mut self, ratio: f32) -> Option<Transition> {
        self.gate.observe(ratio)
    }

    pub fn is_animating(&self) -> bool {
        self.gate.is_animating()
    }

    /// Run one frame: clear, step, draw every particle.
    ///
    /// A no-op while hidden, so a stray scheduled tick after parking
    /// cannot mutate state or draw.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        if !self.gate.is_animating() {
            return;
        }
        let rect = CanvasRect::from_viewport(&self.viewport);
        let pointer = self.pointer.resolve(&rect);

        surface.clear();
        self.simulator.step(&mut self.rng, pointer, &self.viewport);
        let color = self.simulator.config().color;
        for particle in self.simulator.particles() {
            draw_particle(surface, particle, color);
        }
    }

    /// Record a resize signal; the actual reinitialization happens
    /// once [`Engine::poll_resize`] sees the settle window close.
    pub fn resize(&mut self, width: f32, height: f32, now: Instant) {
        self.debouncer.signal(width, height, now);
    }

    /// Apply a settled resize, if any. Returns true when the viewport
    /// changed and the pool was respawned.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        let Some((width, height)) = self.debouncer.poll(now) else {
            return false;
        };
        self.viewport = Viewport::new(width, height, self.viewport.dpr);
        self.simulator.reinit(&mut self.rng, &self.viewport);
        true
    }

    /// Deadline of a pending resize, for event-loop poll timeouts.
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Force a full pool respawn at the current dimensions.
    pub fn refresh(&mut self) {
        self.simulator.reinit(&mut self.rng, &self.viewport);
    }

    /// Swap the particle fill color without respawning the pool.
    pub fn set_color(&mut self, color: Rgb) {
        self.simulator.config_mut().color = color;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn particles(&self) -> &[crate::particle::Particle] {
        self.simulator.particles()
    }
}
