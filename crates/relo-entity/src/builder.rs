use std::sync::Arc;

use tokio::sync::Mutex;

use relo_core::EntityId;

use crate::lock::LockCounters;
use crate::table::EntityMap;
use crate::{Body, EntityTable};

/// Fluent builder for [`EntityTable`].
///
/// Ids are assigned densely from zero in spawn order.
///
/// # Example
///
/// ```rust
/// use relo_core::Vec3;
/// use relo_entity::{Body, EntityTableBuilder};
///
/// let mut builder = EntityTableBuilder::new();
/// let courier = builder.spawn(Body::at(Vec3::new(1.0, 0.0, 2.0)));
/// let table = builder.build();
///
/// assert!(table.contains(courier));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Default)]
pub struct EntityTableBuilder {
    bodies: Vec<Body>,
}

impl EntityTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { bodies: Vec::with_capacity(n) }
    }

    /// Register a body and return the id it will carry in the table.
    pub fn spawn(&mut self, body: Body) -> EntityId {
        let id = EntityId(self.bodies.len() as u32);
        self.bodies.push(body);
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn build(self) -> EntityTable {
        let mut slots: EntityMap<Arc<Mutex<Body>>> = Default::default();
        slots.reserve(self.bodies.len());
        for (i, body) in self.bodies.into_iter().enumerate() {
            slots.insert(EntityId(i as u32), Arc::new(Mutex::new(body)));
        }
        EntityTable { slots, counters: Arc::new(LockCounters::default()) }
    }
}
