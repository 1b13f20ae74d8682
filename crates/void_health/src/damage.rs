//! Damage requests and the damage pipeline

use crate::controller::HealthController;
use crate::entity::EntityId;
use crate::events::HealthEvent;
use crate::timer::TimedAction;
use serde::{Deserialize, Serialize};

/// Information about a damage instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Health to remove
    pub amount: u32,
    /// Entity that caused the damage (if any)
    pub instigator: Option<EntityId>,
    /// How long the target should flicker, in seconds
    pub flicker_duration: f32,
    /// Invulnerability window after the hit, in seconds (0 = none)
    pub invincibility_duration: f32,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: u32) -> Self {
        Self {
            amount,
            instigator: None,
            flicker_duration: 0.0,
            invincibility_duration: 0.0,
        }
    }

    /// Set the instigator
    pub fn with_instigator(mut self, entity: EntityId) -> Self {
        self.instigator = Some(entity);
        self
    }

    /// Set the flicker duration
    pub fn with_flicker(mut self, seconds: f32) -> Self {
        self.flicker_duration = seconds;
        self
    }

    /// Set the invulnerability window granted by this hit
    pub fn with_invincibility(mut self, seconds: f32) -> Self {
        self.invincibility_duration = seconds;
        self
    }
}

impl Default for DamageInfo {
    fn default() -> Self {
        Self::new(0)
    }
}

/// What a damage call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable, dead, disabled or never initialized
    Ignored,
    /// Health was reduced (possibly by zero) and the entity survived
    Applied { previous: u32, current: u32 },
    /// The hit was lethal and the death pipeline ran
    Killed { previous: u32 },
}

impl DamageOutcome {
    /// Check if the hit landed at all
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Check if the hit was lethal
    pub fn is_lethal(&self) -> bool {
        matches!(self, Self::Killed { .. })
    }
}

impl HealthController {
    /// Apply damage to this entity
    pub fn apply_damage(&mut self, damage: &DamageInfo) -> DamageOutcome {
        if !self.initialized || !self.active {
            log::trace!("Ignoring damage on inactive entity");
            return DamageOutcome::Ignored;
        }

        if self.invulnerable {
            log::trace!("Ignoring {} damage while invulnerable", damage.amount);
            return DamageOutcome::Ignored;
        }

        if !self.alive || (self.current_health == 0 && !self.config.is_dummy()) {
            log::trace!("Ignoring {} damage on dead entity", damage.amount);
            return DamageOutcome::Ignored;
        }

        let previous = self.current_health;
        self.current_health = self.current_health.saturating_sub(damage.amount);

        let entity = self.collaborators.owner_id();
        let position = self.collaborators.position();

        self.observers.on_hit.notify();
        self.emit(HealthEvent::Hit { entity, position });

        if damage.invincibility_duration > 0.0 {
            self.invulnerable = true;
            self.timers
                .schedule(damage.invincibility_duration, TimedAction::ClearInvulnerability);
        }

        self.emit(HealthEvent::DamageTaken {
            source: entity,
            instigator: damage.instigator,
            new_health: self.current_health,
            damage: damage.amount,
            previous_health: previous,
        });

        if let Some(presentation) = self.collaborators.presentation.as_mut() {
            presentation.trigger_animation("Damage");
            presentation.play_hit_feedback(position, damage.flicker_duration);
        }

        self.update_health_bar(true);

        if self.current_health == 0 && !self.config.is_dummy() {
            self.kill();
            return DamageOutcome::Killed { previous };
        }

        DamageOutcome::Applied {
            previous,
            current: self.current_health,
        }
    }
}
