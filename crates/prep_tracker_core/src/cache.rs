//! crates/prep_tracker_core/src/cache.rs
//!
//! The client-side mirror of both server collections.
//!
//! Every operation is synchronous and total: an identifier that is not present
//! turns an update or removal into a no-op rather than an error.

use crate::domain::{CodeSnippet, Entity, Question, RecordId};

/// One server-ordered collection of entities.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityList<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Wholesale replacement with a fresh server snapshot.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Replaces the entity with the same identifier in place, or inserts it at the front.
    pub fn upsert_one(&mut self, entity: T) {
        if !self.replace_one(entity.clone()) {
            self.items.insert(0, entity);
        }
    }

    /// Replaces the entity with the same identifier in place. Returns whether one was found.
    pub fn replace_one(&mut self, entity: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Removes the entity with the given identifier. Returns whether one was found.
    pub fn remove_one(&mut self, id: RecordId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }
}

/// Both collections, owned by a single client session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientCache {
    pub questions: EntityList<Question>,
    pub snippets: EntityList<CodeSnippet>,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::default()
    }
}
