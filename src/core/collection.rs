//! Geordnete Sammlung aller fertigen Formen.

use super::shape::{Shape, ShapeId, ShapeSnapshot};
use indexmap::IndexMap;

/// Formen in Einfügereihenfolge, adressiert über ihre ID.
#[derive(Debug, Default)]
pub struct ShapeCollection {
    shapes: IndexMap<ShapeId, Shape>,
}

impl ShapeCollection {
    /// Leere Sammlung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl Formen.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// `true` ohne Formen.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Fügt eine Form am Ende ein (ersetzt eine Form gleicher ID an Ort und Stelle).
    pub fn insert(&mut self, shape: Shape) {
        self.shapes.insert(shape.id(), shape);
    }

    /// Form per ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Mutable Form per ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// `true`, wenn eine Form mit dieser ID existiert.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Entfernt eine Form dauerhaft (Reihenfolge der übrigen bleibt erhalten).
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.shapes.shift_remove(&id)
    }

    /// Entnimmt eine Form für eine Edit-Session samt ihrer Position.
    pub fn take(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let (index, _, shape) = self.shapes.shift_remove_full(&id)?;
        Some((index, shape))
    }

    /// Setzt eine entnommene Form an ihre ursprüngliche Position zurück.
    pub fn restore(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.shift_insert(index, shape.id(), shape);
    }

    /// Alle Formen in Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Alle IDs in Reihenfolge.
    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.keys().copied().collect()
    }

    /// Serialisierbare Zustände aller Formen.
    pub fn snapshots(&self) -> Vec<ShapeSnapshot> {
        self.shapes.values().map(Shape::snapshot).collect()
    }

    /// Baut eine Sammlung aus Snapshots neu auf.
    pub fn from_snapshots(snapshots: &[ShapeSnapshot]) -> Self {
        let mut collection = Self::new();
        for snapshot in snapshots {
            collection.insert(Shape::from_snapshot(snapshot));
        }
        collection
    }
}
