//! Game controller module
//!
//! All spawn policy lives here. Rendering and physics belong to the world:
//! - Seeded RNG only
//! - Time is pushed in by the host, never read
//! - Statistics are derived from the world on demand

pub mod events;
pub mod game;
pub mod scheduler;
pub mod shape;
pub mod world;

pub use events::{EventBus, EventKind, GameEvent, Observable, SubscriptionId};
pub use game::{Game, GamePhase};
pub use scheduler::SpawnScheduler;
pub use shape::{Shape, ShapeKind, build_shape, generate_shape, spawn_position};
pub use world::{LiveShape, Scene, SceneEntry, ShapeFactory, ShapeHandle, World};
