//! Health configuration

use crate::entity::Layer;
use crate::error::{HealthError, HealthResult};
use serde::{Deserialize, Serialize};

/// Layer switch applied when the entity dies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathLayer {
    /// Layer to move the entity to
    pub layer: Layer,
    /// Also move every descendant
    pub recursive: bool,
}

impl DeathLayer {
    /// Move only the entity itself
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            recursive: false,
        }
    }

    /// Move the entity and all of its descendants
    pub fn recursive(layer: Layer) -> Self {
        Self {
            layer,
            recursive: true,
        }
    }
}

/// Static settings of a health controller
///
/// Loaded from authoring data, so every field has a default and partial
/// documents deserialize fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Health restored on every (re)initialization
    pub initial_health: u32,
    /// Upper bound for current health
    pub maximum_health: u32,
    /// Read by knockback systems, not enforced here
    pub immune_to_knockback: bool,
    /// Deactivate the entity when it dies (ignored when a respawn handler is attached)
    pub destroy_on_death: bool,
    /// Seconds between death and the destruction step
    pub delay_before_destruction: f32,
    /// Points awarded on death (0 = none)
    pub points_when_destroyed: i32,
    /// Teleport back to the spawn position on revive
    pub respawn_at_initial_location: bool,
    /// Disable the movement controller on death
    pub disable_controller_on_death: bool,
    /// Hide the visual model on death
    pub disable_model_on_death: bool,
    /// Turn off the entity's own colliders on death
    pub disable_collisions_on_death: bool,
    /// Also turn off descendant colliders (requires `disable_collisions_on_death`)
    pub disable_child_collisions_on_death: bool,
    /// Layer to switch to on death, if any
    pub layer_on_death: Option<DeathLayer>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            initial_health: 10,
            maximum_health: 10,
            immune_to_knockback: false,
            destroy_on_death: true,
            delay_before_destruction: 0.0,
            points_when_destroyed: 0,
            respawn_at_initial_location: false,
            disable_controller_on_death: true,
            disable_model_on_death: true,
            disable_collisions_on_death: true,
            disable_child_collisions_on_death: false,
            layer_on_death: None,
        }
    }
}

impl HealthConfig {
    /// Create a config where initial and maximum health are equal
    pub fn new(health: u32) -> Self {
        Self {
            initial_health: health,
            maximum_health: health,
            ..Default::default()
        }
    }

    /// Set initial health
    pub fn with_initial_health(mut self, health: u32) -> Self {
        self.initial_health = health;
        self
    }

    /// Set maximum health
    pub fn with_maximum_health(mut self, health: u32) -> Self {
        self.maximum_health = health;
        self
    }

    /// Mark as immune to knockback
    pub fn with_knockback_immunity(mut self) -> Self {
        self.immune_to_knockback = true;
        self
    }

    /// Set whether the entity is deactivated on death
    pub fn with_destroy_on_death(mut self, destroy: bool) -> Self {
        self.destroy_on_death = destroy;
        self
    }

    /// Set delay before destruction
    pub fn with_delay_before_destruction(mut self, seconds: f32) -> Self {
        self.delay_before_destruction = seconds;
        self
    }

    /// Set points awarded on death
    pub fn with_points_when_destroyed(mut self, points: i32) -> Self {
        self.points_when_destroyed = points;
        self
    }

    /// Respawn at the captured spawn position
    pub fn with_respawn_at_initial_location(mut self) -> Self {
        self.respawn_at_initial_location = true;
        self
    }

    /// Set whether the movement controller is disabled on death
    pub fn with_disable_controller_on_death(mut self, disable: bool) -> Self {
        self.disable_controller_on_death = disable;
        self
    }

    /// Set whether the model is hidden on death
    pub fn with_disable_model_on_death(mut self, disable: bool) -> Self {
        self.disable_model_on_death = disable;
        self
    }

    /// Set collision handling on death
    pub fn with_disable_collisions_on_death(mut self, own: bool, children: bool) -> Self {
        self.disable_collisions_on_death = own;
        self.disable_child_collisions_on_death = children;
        self
    }

    /// Switch layer on death
    pub fn with_layer_on_death(mut self, layer: DeathLayer) -> Self {
        self.layer_on_death = Some(layer);
        self
    }

    /// Whether the layer changes on death
    pub fn change_layer_on_death(&self) -> bool {
        self.layer_on_death.is_some()
    }

    /// Whether a zero-health entity is a damage dummy that never dies from hits
    pub fn is_dummy(&self) -> bool {
        self.initial_health == 0
    }

    /// Check the config for values the controller cannot honour
    pub fn validate(&self) -> HealthResult<()> {
        if self.maximum_health == 0 {
            return Err(HealthError::InvalidMaximumHealth);
        }
        if self.initial_health > self.maximum_health {
            return Err(HealthError::InitialExceedsMaximum {
                initial: self.initial_health,
                maximum: self.maximum_health,
            });
        }
        if !(self.delay_before_destruction >= 0.0) {
            return Err(HealthError::NegativeDelay(self.delay_before_destruction));
        }
        Ok(())
    }

    /// Clamp invalid values into range instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        if self.maximum_health == 0 {
            log::warn!("Maximum health is zero, raising it to 1");
            self.maximum_health = 1;
        }
        if self.initial_health > self.maximum_health {
            log::warn!(
                "Initial health {} exceeds maximum {}, clamping",
                self.initial_health,
                self.maximum_health
            );
            self.initial_health = self.maximum_health;
        }
        if !(self.delay_before_destruction >= 0.0) {
            log::warn!(
                "Invalid destruction delay {}, destroying immediately",
                self.delay_before_destruction
            );
            self.delay_before_destruction = 0.0;
        }
        self
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> HealthResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> HealthResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
