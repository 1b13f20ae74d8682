//! Health controller state and manual adjustments
//!
//! The damage, death and revive pipelines live in their own modules as
//! further `impl HealthController` blocks.

use crate::collaborators::Collaborators;
use crate::config::HealthConfig;
use crate::entity::{EntityId, Layer};
use crate::error::HealthResult;
use crate::events::HealthEvent;
use crate::observer::{ObserverId, Observers};
use crate::timer::{TimedAction, TimerQueue};

/// Health of a single damageable entity
pub struct HealthController {
    pub(crate) config: HealthConfig,
    pub(crate) current_health: u32,
    pub(crate) invulnerable: bool,
    pub(crate) alive: bool,
    pub(crate) active: bool,
    pub(crate) initialized: bool,
    pub(crate) initial_position: [f32; 3],
    pub(crate) initial_layer: Layer,
    pub(crate) collaborators: Collaborators,
    pub(crate) observers: Observers,
    pub(crate) timers: TimerQueue<TimedAction>,
}

impl HealthController {
    /// Create an uninitialized controller, clamping any invalid settings
    pub fn new(config: HealthConfig, collaborators: Collaborators) -> Self {
        Self {
            config: config.sanitized(),
            current_health: 0,
            invulnerable: false,
            alive: false,
            active: true,
            initialized: false,
            initial_position: [0.0, 0.0, 0.0],
            initial_layer: Layer::default(),
            collaborators,
            observers: Observers::default(),
            timers: TimerQueue::new(),
        }
    }

    /// Create an uninitialized controller, rejecting invalid settings
    pub fn try_new(config: HealthConfig, collaborators: Collaborators) -> HealthResult<Self> {
        config.validate()?;
        Ok(Self::new(config, collaborators))
    }

    /// Reset health and invulnerability; the first call also captures the spawn baseline
    ///
    /// Pending timers are dropped so a destroy scheduled before the reset
    /// cannot hit the re-initialized entity.
    pub fn initialize(&mut self) {
        if !self.initialized {
            self.initial_position = self.collaborators.position();
            self.initial_layer = self
                .collaborators
                .scene
                .as_ref()
                .map_or(Layer::default(), |scene| scene.layer());
            if let Some(presentation) = self.collaborators.presentation.as_mut() {
                presentation.capture_baseline();
            }
            self.initialized = true;
            log::debug!(
                "Initialized health for {:?} at {:?} (layer {})",
                self.collaborators.owner_id(),
                self.initial_position,
                self.initial_layer.index()
            );
        }

        if let Some(presentation) = self.collaborators.presentation.as_mut() {
            presentation.set_model_active(true);
        }

        self.timers.cancel_all();
        self.current_health = self.config.initial_health;
        self.invulnerable = false;
        self.alive = true;
        self.update_health_bar(false);
    }

    /// Re-activate the controller (e.g. after pooling) and restore initial health
    pub fn enable(&mut self) {
        self.active = true;
        self.initialize();
    }

    /// Deactivate the controller; pending timers are dropped and never fire
    pub fn disable(&mut self) {
        if self.active {
            log::debug!("Disabled health for {:?}", self.collaborators.owner_id());
        }
        self.active = false;
        self.timers.cancel_all();
    }

    /// Advance timers (call once per frame)
    pub fn update(&mut self, delta_time: f32) {
        if !self.active {
            return;
        }

        for action in self.timers.advance(delta_time) {
            if !self.active {
                break;
            }
            log::trace!("Timer fired: {:?}", action);
            match action {
                TimedAction::ClearInvulnerability => self.invulnerable = false,
                TimedAction::Destroy => self.destroy_object(),
            }
        }
    }

    /// Add health, never above maximum
    /// Returns the amount actually healed
    pub fn heal(&mut self, amount: u32, instigator: Option<EntityId>) -> u32 {
        if !self.active || !self.alive {
            log::trace!("Ignoring heal of {} from {:?}", amount, instigator);
            return 0;
        }

        let previous = self.current_health;
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.config.maximum_health);
        self.update_health_bar(true);
        self.current_health - previous
    }

    /// Set health directly (clamped to 0..max)
    ///
    /// Dropping a live entity to zero runs the death pipeline, except for
    /// damage dummies.
    pub fn set_health(&mut self, health: u32) {
        if !self.active || !self.alive {
            return;
        }

        self.current_health = health.min(self.config.maximum_health);
        self.update_health_bar(false);

        if self.current_health == 0 && !self.config.is_dummy() {
            self.kill();
        }
    }

    /// Refill to maximum health
    pub fn reset_health_to_max(&mut self) {
        if !self.active || !self.alive {
            return;
        }

        self.current_health = self.config.maximum_health;
        self.update_health_bar(false);
    }

    /// Toggle invulnerability directly (power-ups, cutscenes)
    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.invulnerable = invulnerable;
    }

    /// Prevent any damage
    pub fn damage_disabled(&mut self) {
        self.set_invulnerable(true);
    }

    /// Allow damage again
    pub fn damage_enabled(&mut self) {
        self.set_invulnerable(false);
    }

    /// Subscribe to hits
    pub fn on_hit<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observers.on_hit.subscribe(observer)
    }

    /// Subscribe to death
    pub fn on_death<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observers.on_death.subscribe(observer)
    }

    /// Subscribe to revive
    pub fn on_revive<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observers.on_revive.subscribe(observer)
    }

    /// Remove an observer from whichever list holds it
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.on_hit.unsubscribe(id)
            | self.observers.on_death.unsubscribe(id)
            | self.observers.on_revive.unsubscribe(id)
    }

    /// Get the observer lists
    pub fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }

    /// Get the collaborators
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Get the collaborators mutably
    pub fn collaborators_mut(&mut self) -> &mut Collaborators {
        &mut self.collaborators
    }

    /// Get the config
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Current health
    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    /// Maximum health
    pub fn maximum_health(&self) -> u32 {
        self.config.maximum_health
    }

    /// Initial health
    pub fn initial_health(&self) -> u32 {
        self.config.initial_health
    }

    /// Check if damage is currently blocked
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Check if alive
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Check if the controller is enabled
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Check if `initialize` has run at least once
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether knockback systems should skip this entity
    pub fn immune_to_knockback(&self) -> bool {
        self.config.immune_to_knockback
    }

    /// Spawn position captured on first initialization
    pub fn initial_position(&self) -> [f32; 3] {
        self.initial_position
    }

    /// Get health as a percentage (0.0 - 1.0)
    pub fn health_percent(&self) -> f32 {
        if self.config.maximum_health == 0 {
            return 0.0;
        }
        self.current_health as f32 / self.config.maximum_health as f32
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.current_health >= self.config.maximum_health
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn emit(&mut self, event: HealthEvent) {
        if let Some(sink) = self.collaborators.events.as_mut() {
            log::trace!("Emitting {}", event.name());
            sink.emit(event);
        }
    }

    pub(crate) fn update_health_bar(&mut self, show: bool) {
        let current = self.current_health;
        let max = self.config.maximum_health;

        if let Some(bar) = self.collaborators.health_bar.as_mut() {
            bar.update_bar(current, 0, max, show);
        }

        if let (Some(owner), Some(hud)) = (
            self.collaborators.owner.as_ref(),
            self.collaborators.hud.as_mut(),
        ) {
            if owner.kind().is_player() {
                hud.update_player_health_bar(current, 0, max, owner.player_id().unwrap_or_default());
            }
        }
    }
}
