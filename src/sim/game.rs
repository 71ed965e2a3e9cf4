//! Game controller
//!
//! Owns the tunable configuration and the spawn scheduler, generates shapes
//! into the bound world, and reports every change through the event bus.
//! Statistics are always derived from the world's live collection.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{EventBus, EventKind, GameEvent, Observable, SubscriptionId};
use super::scheduler::SpawnScheduler;
use super::shape::{Shape, generate_shape, spawn_position};
use super::world::{ShapeHandle, World};
use crate::config::{GameConfig, StatsPolicy};
use crate::consts::{GRAVITY_STEP, SPAWN_RATE_STEP};
use crate::error::GameError;

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, no world attached
    Uninitialized,
    /// World attached, baseline notifications going out
    Bound,
    /// Scheduler started and initial statistics published
    Running,
}

pub struct Game<W: World> {
    config: GameConfig,
    world: Option<W>,
    scheduler: SpawnScheduler,
    rng: Pcg32,
    events: EventBus,
    phase: GamePhase,
}

impl<W: World> Game<W> {
    /// Create an unbound controller; fails only on invalid constant fields
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            scheduler: SpawnScheduler::new(config.spawn_interval_ms),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            world: None,
            events: EventBus::new(),
            phase: GamePhase::Uninitialized,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn shapes_per_second(&self) -> u32 {
        self.config.shapes_per_second
    }

    pub fn gravity_force(&self) -> f32 {
        self.config.gravity_force
    }

    pub fn is_spawning(&self) -> bool {
        self.scheduler.is_armed()
    }

    pub fn world(&self) -> Option<&W> {
        self.world.as_ref()
    }

    /// Mutable world access for the host's physics step. Remove shapes
    /// with [`Game::remove_shape`] or [`Game::remove_where`] so the
    /// statistics are republished.
    pub fn world_mut(&mut self) -> Option<&mut W> {
        self.world.as_mut()
    }

    /// Attach the world and start running.
    ///
    /// Publishes the gravity and spawn-rate baselines, starts the scheduler
    /// (which spawns one batch immediately), then publishes area and count.
    /// A world can only be bound once.
    pub fn bind_world(&mut self, world: W) -> Result<(), GameError> {
        if self.world.is_some() {
            log::warn!("Rejected bind_world: a world is already bound");
            return Err(GameError::AlreadyBound);
        }

        log::info!("World bound (width {})", world.width());
        if world.width() < 2.0 * self.config.radius {
            log::warn!(
                "Viewport width {} is narrower than two radii ({}), shapes will spawn centered",
                world.width(),
                2.0 * self.config.radius
            );
        }
        self.world = Some(world);
        self.phase = GamePhase::Bound;

        self.emit_gravity();
        self.emit_shapes_per_second();
        self.start_spawning()?;
        self.phase = GamePhase::Running;

        self.recompute_shape_area();
        self.recompute_shape_count();
        Ok(())
    }

    /// Arm the scheduler and spawn one batch right away
    pub fn start_spawning(&mut self) -> Result<(), GameError> {
        if self.world.is_none() {
            return Err(GameError::NotBound);
        }
        self.scheduler.start()?;
        log::info!(
            "Spawning {} shapes every {} ms ({} statistics)",
            self.config.shapes_per_second,
            self.scheduler.interval_ms(),
            self.config.stats_policy.as_str()
        );
        self.spawn_batch();
        Ok(())
    }

    /// Disarm the scheduler; safe to call when already stopped
    pub fn stop_spawning(&mut self) {
        if self.scheduler.is_armed() {
            log::info!("Spawning stopped");
        }
        self.scheduler.stop();
    }

    /// Advance the scheduler by `elapsed_ms`, running one batch per firing.
    /// Returns the number of batches run.
    pub fn update(&mut self, elapsed_ms: f64) -> u32 {
        let firings = self.scheduler.advance(elapsed_ms);
        for _ in 0..firings {
            self.spawn_batch();
        }
        firings
    }

    /// Spawn `shapes_per_second` shapes at default positions
    pub fn spawn_batch(&mut self) -> usize {
        let batch = self.config.shapes_per_second;
        if batch == 0 || self.world.is_none() {
            return 0;
        }

        let per_shape = self.config.stats_policy == StatsPolicy::PerShape;
        let mut spawned = 0;
        for _ in 0..batch {
            if self.create_shape(None).is_some() {
                spawned += 1;
            }
            if per_shape {
                self.recompute_shape_area();
                self.recompute_shape_count();
            }
        }
        if !per_shape {
            self.recompute_shape_area();
            self.recompute_shape_count();
        }

        log::debug!("Spawned batch of {spawned} shapes");
        spawned
    }

    /// Spawn one shape at the default spawn position
    pub fn spawn_shape(&mut self) -> Option<ShapeHandle> {
        self.spawn_single(None)
    }

    /// Spawn one shape centered at `position`
    pub fn spawn_shape_at(&mut self, position: Vec2) -> Option<ShapeHandle> {
        self.spawn_single(Some(position))
    }

    fn spawn_single(&mut self, position: Option<Vec2>) -> Option<ShapeHandle> {
        let handle = self.create_shape(position)?;
        self.recompute_shape_area();
        self.recompute_shape_count();
        Some(handle)
    }

    /// Generate a shape, hand it to the world and announce it
    fn create_shape(&mut self, position: Option<Vec2>) -> Option<ShapeHandle> {
        let world = self.world.as_mut()?;
        let radius = self.config.radius;
        let position =
            position.unwrap_or_else(|| spawn_position(&mut self.rng, world.width(), radius));

        let shape = generate_shape(&mut self.rng, position, radius);
        log::trace!(
            "Spawn {} at ({:.1}, {:.1}), area {:.2}",
            shape.kind.as_str(),
            shape.position.x,
            shape.position.y,
            shape.area
        );

        let event = GameEvent::ShapeSpawned(shape.clone());
        let handle = world.insert(shape);
        self.events.emit(&event);
        Some(handle)
    }

    pub fn increase_spawn_rate(&mut self) {
        self.config.shapes_per_second = self
            .config
            .shapes_per_second
            .saturating_add(SPAWN_RATE_STEP);
        self.emit_shapes_per_second();
    }

    /// Decrease the spawn rate, clamping at zero
    pub fn decrease_spawn_rate(&mut self) {
        if self.config.shapes_per_second == 0 {
            log::debug!("Spawn rate already 0");
        }
        self.config.shapes_per_second = self
            .config
            .shapes_per_second
            .saturating_sub(SPAWN_RATE_STEP);
        self.emit_shapes_per_second();
    }

    pub fn increase_gravity(&mut self) {
        self.config.gravity_force += GRAVITY_STEP;
        self.emit_gravity();
    }

    /// Unbounded; gravity may go negative
    pub fn decrease_gravity(&mut self) {
        self.config.gravity_force -= GRAVITY_STEP;
        self.emit_gravity();
    }

    /// Number of live shapes in the world (0 when unbound)
    pub fn shape_count(&self) -> usize {
        self.world
            .as_ref()
            .map_or(0, |world| world.live_shapes().count())
    }

    /// Sum of live shape areas (0 when unbound or empty), accumulated in f64
    pub fn total_area(&self) -> f32 {
        self.world.as_ref().map_or(0.0, |world| {
            world
                .live_shapes()
                .fold(0.0_f64, |total, shape| total + shape.area as f64) as f32
        })
    }

    /// Publish `shapeCountChanged` with the world's live count
    pub fn recompute_shape_count(&mut self) -> usize {
        if self.world.is_none() {
            log::debug!("No world bound, skipping shape count");
            return 0;
        }
        let count = self.shape_count();
        self.events.emit(&GameEvent::ShapeCountChanged { count });
        count
    }

    /// Publish `shapeAreaChanged` with the world's total live area
    pub fn recompute_shape_area(&mut self) -> f32 {
        if self.world.is_none() {
            log::debug!("No world bound, skipping shape area");
            return 0.0;
        }
        let total_area = self.total_area();
        self.events.emit(&GameEvent::ShapeAreaChanged { total_area });
        total_area
    }

    /// Destroy a shape, then publish area and count before returning.
    /// An unknown handle still republishes the (unchanged) statistics.
    pub fn remove_shape(&mut self, handle: ShapeHandle) -> bool {
        let Some(world) = self.world.as_mut() else {
            log::warn!("remove_shape({handle:?}) with no world bound");
            return false;
        };

        let destroyed = world.destroy(handle);
        if !destroyed {
            log::warn!("remove_shape({handle:?}): not a live shape");
        }
        self.recompute_shape_area();
        self.recompute_shape_count();
        destroyed
    }

    /// Destroy every live shape matching `remove`, then publish area and
    /// count once. Returns how many shapes were destroyed.
    pub fn remove_where(&mut self, mut remove: impl FnMut(&Shape) -> bool) -> usize {
        let Some(world) = self.world.as_mut() else {
            log::warn!("remove_where with no world bound");
            return 0;
        };

        let doomed: Vec<ShapeHandle> = world
            .live_shapes()
            .filter(|live| world.shape(live.handle).is_some_and(&mut remove))
            .map(|live| live.handle)
            .collect();
        let destroyed = doomed
            .into_iter()
            .filter(|&handle| world.destroy(handle))
            .count();

        log::debug!("Removed {destroyed} shapes");
        self.recompute_shape_area();
        self.recompute_shape_count();
        destroyed
    }

    fn emit_gravity(&mut self) {
        self.events.emit(&GameEvent::GravityForceChanged {
            value: self.config.gravity_force,
        });
    }

    fn emit_shapes_per_second(&mut self) {
        self.events.emit(&GameEvent::ShapesPerSecondChanged {
            value: self.config.shapes_per_second,
        });
    }
}

impl<W: World> Observable for Game<W> {
    fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe_all(handler)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn emit(&mut self, event: &GameEvent) {
        self.events.emit(event);
    }
}
