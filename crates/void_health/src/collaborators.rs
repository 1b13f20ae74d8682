//! Collaborator interfaces
//!
//! The health controller only decides *what* should happen. These traits are
//! implemented by the host engine to actually do it. Every collaborator is
//! optional; a missing one simply means that side effect is skipped.

use crate::entity::{Condition, EntityId, EntityKind, Layer};
use crate::events::EventSink;

/// Visual and audio feedback
pub trait Presentation {
    /// Remember the baseline tint so it can be restored on revive
    fn capture_baseline(&mut self) {}
    /// Play hit effects and flicker for the given duration
    fn play_hit_feedback(&mut self, position: [f32; 3], flicker_duration: f32);
    /// Play death effects
    fn play_death_feedback(&mut self, position: [f32; 3]);
    /// Fire an animator trigger ("Damage", "Death")
    fn trigger_animation(&mut self, name: &str);
    /// Show or hide the visual model
    fn set_model_active(&mut self, active: bool);
    /// Restore the tint captured by `capture_baseline`
    fn restore_tint(&mut self);
}

/// World-space health bar attached to the entity
pub trait HealthBar {
    /// Reset the bar's own state (on revive)
    fn initialize(&mut self) {}
    /// Refresh the displayed value; `show` flashes the bar into view
    fn update_bar(&mut self, current: u32, min: u32, max: u32, show: bool);
}

/// Screen-space HUD for player characters
pub trait Hud {
    /// Refresh the health bar of a given player
    fn update_player_health_bar(&mut self, current: u32, min: u32, max: u32, player_id: &str);
}

/// Character movement controller
pub trait MovementController {
    /// Stop colliding with the world
    fn disable_collisions(&mut self);
    /// Collide with the world again
    fn enable_collisions(&mut self);
    /// Stop processing movement
    fn disable(&mut self);
    /// Resume processing movement
    fn enable(&mut self);
    /// Clear velocities and transient movement state
    fn reset(&mut self);
}

/// A single physics collider
pub trait Collider {
    /// Enable or disable the collider
    fn set_enabled(&mut self, enabled: bool);
}

/// Takes over destruction when the entity dies (pooling, respawn timing)
pub trait RespawnHandler {
    /// Called instead of deactivating the entity
    fn handle_death(&mut self);
}

/// The character that owns the health controller
pub trait Owner {
    /// Entity ID used in events
    fn id(&self) -> EntityId;
    /// Player or AI
    fn kind(&self) -> EntityKind;
    /// Player identifier for HUD routing
    fn player_id(&self) -> Option<&str> {
        None
    }
    /// Current logical condition
    fn condition(&self) -> Condition;
    /// Change the logical condition
    fn set_condition(&mut self, condition: Condition);
    /// Reset transient character state (abilities, input buffers)
    fn reset(&mut self);
}

/// Transform and activation state of the entity in the scene
pub trait SceneNode {
    /// World position
    fn position(&self) -> [f32; 3];
    /// Move the entity
    fn set_position(&mut self, position: [f32; 3]);
    /// Current layer
    fn layer(&self) -> Layer;
    /// Change layer, optionally on every descendant too
    fn set_layer(&mut self, layer: Layer, recursive: bool);
    /// Activate or deactivate the entity in the scene
    fn set_active(&mut self, active: bool);
}

/// Colliders belonging to the entity
#[derive(Default)]
pub struct ColliderSet {
    /// Colliders on the entity itself
    pub own: Vec<Box<dyn Collider>>,
    /// Colliders on descendants
    pub descendants: Vec<Box<dyn Collider>>,
}

impl ColliderSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider on the entity itself
    pub fn with_own(mut self, collider: impl Collider + 'static) -> Self {
        self.own.push(Box::new(collider));
        self
    }

    /// Add a collider on a descendant
    pub fn with_descendant(mut self, collider: impl Collider + 'static) -> Self {
        self.descendants.push(Box::new(collider));
        self
    }

    /// Enable or disable the entity's own colliders
    pub fn set_own_enabled(&mut self, enabled: bool) {
        for collider in &mut self.own {
            collider.set_enabled(enabled);
        }
    }

    /// Enable or disable descendant colliders
    pub fn set_descendants_enabled(&mut self, enabled: bool) {
        for collider in &mut self.descendants {
            collider.set_enabled(enabled);
        }
    }

    /// Total number of colliders
    pub fn len(&self) -> usize {
        self.own.len() + self.descendants.len()
    }

    /// Check if there are no colliders at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a health controller talks to, wired at construction time
#[derive(Default)]
pub struct Collaborators {
    pub presentation: Option<Box<dyn Presentation>>,
    pub health_bar: Option<Box<dyn HealthBar>>,
    pub hud: Option<Box<dyn Hud>>,
    pub controller: Option<Box<dyn MovementController>>,
    pub colliders: ColliderSet,
    pub respawn: Option<Box<dyn RespawnHandler>>,
    pub events: Option<Box<dyn EventSink>>,
    pub owner: Option<Box<dyn Owner>>,
    pub scene: Option<Box<dyn SceneNode>>,
}

impl Collaborators {
    /// No collaborators at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Set presentation
    pub fn with_presentation(mut self, presentation: impl Presentation + 'static) -> Self {
        self.presentation = Some(Box::new(presentation));
        self
    }

    /// Set health bar
    pub fn with_health_bar(mut self, bar: impl HealthBar + 'static) -> Self {
        self.health_bar = Some(Box::new(bar));
        self
    }

    /// Set player HUD
    pub fn with_hud(mut self, hud: impl Hud + 'static) -> Self {
        self.hud = Some(Box::new(hud));
        self
    }

    /// Set movement controller
    pub fn with_controller(mut self, controller: impl MovementController + 'static) -> Self {
        self.controller = Some(Box::new(controller));
        self
    }

    /// Set colliders
    pub fn with_colliders(mut self, colliders: ColliderSet) -> Self {
        self.colliders = colliders;
        self
    }

    /// Set respawn handler
    pub fn with_respawn_handler(mut self, handler: impl RespawnHandler + 'static) -> Self {
        self.respawn = Some(Box::new(handler));
        self
    }

    /// Set event sink
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Some(Box::new(sink));
        self
    }

    /// Set owner character
    pub fn with_owner(mut self, owner: impl Owner + 'static) -> Self {
        self.owner = Some(Box::new(owner));
        self
    }

    /// Set scene node
    pub fn with_scene_node(mut self, scene: impl SceneNode + 'static) -> Self {
        self.scene = Some(Box::new(scene));
        self
    }

    /// Entity ID of the owner, if any
    pub fn owner_id(&self) -> Option<EntityId> {
        self.owner.as_ref().map(|owner| owner.id())
    }

    /// Whether the owner is a player character
    pub fn owner_is_player(&self) -> bool {
        self.owner
            .as_ref()
            .map_or(false, |owner| owner.kind().is_player())
    }

    /// Current world position (origin without a scene node)
    pub fn position(&self) -> [f32; 3] {
        self.scene
            .as_ref()
            .map_or([0.0, 0.0, 0.0], |scene| scene.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingCollider {
        enabled: Arc<AtomicU32>,
    }

    impl Collider for CountingCollider {
        fn set_enabled(&mut self, enabled: bool) {
            if enabled {
                self.enabled.fetch_add(1, Ordering::SeqCst);
            } else {
                self.enabled.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_collider_set_groups() {
        let own = Arc::new(AtomicU32::new(10));
        let children = Arc::new(AtomicU32::new(10));

        let mut set = ColliderSet::new()
            .with_own(CountingCollider { enabled: own.clone() })
            .with_descendant(CountingCollider { enabled: children.clone() })
            .with_descendant(CountingCollider { enabled: children.clone() });

        assert_eq!(set.len(), 3);

        set.set_own_enabled(false);
        assert_eq!(own.load(Ordering::SeqCst), 9);
        assert_eq!(children.load(Ordering::SeqCst), 10);

        set.set_descendants_enabled(false);
        assert_eq!(children.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_empty_collaborators() {
        let collaborators = Collaborators::new();
        assert!(collaborators.owner_id().is_none());
        assert!(!collaborators.owner_is_player());
        assert_eq!(collaborators.position(), [0.0, 0.0, 0.0]);
        assert!(collaborators.colliders.is_empty());
    }
}
