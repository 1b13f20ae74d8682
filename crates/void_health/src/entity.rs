//! Entity identity and logical condition

use serde::{Deserialize, Serialize};

/// Opaque identifier of an engine entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new entity ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// What kind of character owns a health controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Controlled by a player; gets HUD routing and a death event
    Player,
    /// Controlled by AI or scripts
    Ai,
}

impl Default for EntityKind {
    fn default() -> Self {
        Self::Ai
    }
}

impl EntityKind {
    /// Check if this is a player-controlled entity
    pub fn is_player(&self) -> bool {
        matches!(self, Self::Player)
    }
}

/// Logical condition of the owning character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Alive and controllable
    Normal,
    /// Dead until revived
    Dead,
}

impl Default for Condition {
    fn default() -> Self {
        Self::Normal
    }
}

impl Condition {
    /// Check if this condition is the dead state
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Collision / rendering layer index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Layer(pub u32);

impl Layer {
    /// Create a layer from its index
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the layer index
    pub fn index(&self) -> u32 {
        self.0
    }
}
