//! Scene object registry
//!
//! The registry exclusively owns every live object. Ids are generational, so
//! an id held after its object was removed simply stops resolving; it never
//! aliases a newer object that reused the slot. Insertion order is draw
//! order.
//!
//! Name lookups scan the whole set. Scenes hold dozens of objects, not
//! thousands, which is the scale this is meant for.

use crate::foundation::collections::OrderedArena;
use crate::scene::context::SceneCommands;
use crate::scene::object::{ObjectId, SceneObject};

/// The live set of scene objects
#[derive(Default)]
pub struct SceneRegistry {
    objects: OrderedArena<ObjectId, Box<dyn SceneObject>>,
}

impl SceneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object; it is drawn after every object already present
    pub fn add(&mut self, object: Box<dyn SceneObject>) -> ObjectId {
        let id = self.objects.insert(object);
        log::trace!("Added object {id:?}");
        id
    }

    /// Remove an object by id
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn SceneObject>> {
        let removed = self.objects.remove(id);
        if removed.is_some() {
            log::trace!("Removed object {id:?}");
        }
        removed
    }

    /// Object by id
    pub fn get_by_id(&self, id: ObjectId) -> Option<&dyn SceneObject> {
        self.objects.get(id).map(|object| &**object)
    }

    /// Mutable object by id
    pub fn get_by_id_mut(&mut self, id: ObjectId) -> Option<&mut dyn SceneObject> {
        self.objects.get_mut(id).map(|object| &mut **object)
    }

    /// Concrete object by id, `None` if absent or of another type
    pub fn get_as<T: SceneObject>(&self, id: ObjectId) -> Option<&T> {
        self.get_by_id(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutable concrete object by id
    pub fn get_as_mut<T: SceneObject>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.get_by_id_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Every object currently drawing `mesh_name`, in draw order
    pub fn get_by_mesh_name(&self, mesh_name: &str) -> Vec<ObjectId> {
        self.iter()
            .filter(|(_, object)| object.mesh_name() == mesh_name)
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether the id still resolves
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(id)
    }

    /// Snapshot of live ids in draw order
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys()
    }

    /// Iterate objects in draw order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn SceneObject)> + '_ {
        self.objects.iter().map(|(id, object)| (id, &**object))
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects are live
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Apply queued removals, then queued insertions.
    ///
    /// Returns the ids given to the inserted objects.
    pub fn apply(&mut self, commands: &mut SceneCommands) -> Vec<ObjectId> {
        let (despawn, spawn) = commands.drain();
        for id in despawn {
            self.remove(id);
        }
        spawn.into_iter().map(|object| self.add(object)).collect()
    }
}
