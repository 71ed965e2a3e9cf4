//! World collaborator contract and an in-memory scene
//!
//! The world owns every live shape after spawn. The controller only appends
//! to it, reads it for statistics, and forwards removal requests.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Opaque id of a shape living in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeHandle(pub u32);

/// Statistics view of one live shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveShape {
    pub handle: ShapeHandle,
    pub area: f32,
}

/// Rendering/scene surface the controller spawns into
pub trait World {
    /// Viewport width in pixels
    fn width(&self) -> f32;

    /// Take ownership of a freshly generated shape
    fn insert(&mut self, shape: Shape) -> ShapeHandle;

    /// Current live collection, the single source of truth for statistics
    fn live_shapes(&self) -> impl Iterator<Item = LiveShape> + '_;

    /// Descriptor of a live shape
    fn shape(&self, handle: ShapeHandle) -> Option<&Shape>;

    /// Run the shape's destruction; false if the handle is not live
    fn destroy(&mut self, handle: ShapeHandle) -> bool;
}

/// Turns a shape descriptor into something drawable
pub trait ShapeFactory {
    type Drawable;

    fn create(&mut self, shape: &Shape) -> Self::Drawable;
}

/// A live shape and its drawable
#[derive(Debug, Clone)]
pub struct SceneEntry<D> {
    pub handle: ShapeHandle,
    pub shape: Shape,
    pub drawable: D,
}

/// In-memory world keeping shapes in spawn order.
///
/// Physics is left to the host: it can integrate `velocity_y` through
/// [`Scene::entries_mut`]. Removal goes through the controller
/// (`Game::remove_shape` / `Game::remove_where`) so statistics follow.
pub struct Scene<F: ShapeFactory> {
    width: f32,
    factory: F,
    entries: Vec<SceneEntry<F::Drawable>>,
    next_handle: u32,
}

impl<F: ShapeFactory> Scene<F> {
    pub fn new(width: f32, factory: F) -> Self {
        Self {
            width,
            factory,
            entries: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, handle: ShapeHandle) -> Option<&SceneEntry<F::Drawable>> {
        self.entries.iter().find(|e| e.handle == handle)
    }

    pub fn entries(&self) -> &[SceneEntry<F::Drawable>] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut SceneEntry<F::Drawable>> {
        self.entries.iter_mut()
    }

    /// Oldest live shape
    pub fn first_handle(&self) -> Option<ShapeHandle> {
        self.entries.first().map(|e| e.handle)
    }
}

impl<F: ShapeFactory> World for Scene<F> {
    fn width(&self) -> f32 {
        self.width
    }

    fn insert(&mut self, shape: Shape) -> ShapeHandle {
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        let drawable = self.factory.create(&shape);
        self.entries.push(SceneEntry {
            handle,
            shape,
            drawable,
        });
        handle
    }

    fn live_shapes(&self) -> impl Iterator<Item = LiveShape> + '_ {
        self.entries.iter().map(|e| LiveShape {
            handle: e.handle,
            area: e.shape.area,
        })
    }

    fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.get(handle).map(|e| &e.shape)
    }

    fn destroy(&mut self, handle: ShapeHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}
