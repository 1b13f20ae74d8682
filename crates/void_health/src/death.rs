//! Death pipeline and destruction

use crate::controller::HealthController;
use crate::entity::Condition;
use crate::events::{HealthEvent, PointsMethod};
use crate::timer::TimedAction;

impl HealthController {
    /// Kill the entity: mark it dead, play death effects, award points and
    /// request collision / controller / layer / model changes
    pub fn kill(&mut self) {
        if !self.initialized || !self.alive {
            log::trace!("Ignoring kill on entity that is not alive");
            return;
        }

        log::debug!("Entity {:?} died", self.collaborators.owner_id());

        let mut dead_player = None;
        if let Some(owner) = self.collaborators.owner.as_mut() {
            if !owner.condition().is_dead() {
                owner.set_condition(Condition::Dead);
            }
            owner.reset();
            if owner.kind().is_player() {
                dead_player = Some(owner.id());
            }
        }
        if let Some(entity) = dead_player {
            self.emit(HealthEvent::PlayerDied { entity });
        }

        self.current_health = 0;
        self.alive = false;
        // Stays invulnerable for the whole death window
        self.invulnerable = true;
        self.timers
            .cancel_matching(|action| *action == TimedAction::ClearInvulnerability);

        let position = self.collaborators.position();
        if let Some(presentation) = self.collaborators.presentation.as_mut() {
            presentation.play_death_feedback(position);
        }

        if self.config.points_when_destroyed != 0 {
            self.emit(HealthEvent::PointsEarned {
                method: PointsMethod::Add,
                amount: self.config.points_when_destroyed,
            });
        }

        if let Some(presentation) = self.collaborators.presentation.as_mut() {
            presentation.trigger_animation("Death");
        }

        if self.config.disable_collisions_on_death {
            self.collaborators.colliders.set_own_enabled(false);
            if let Some(controller) = self.collaborators.controller.as_mut() {
                controller.disable_collisions();
            }
            if self.config.disable_child_collisions_on_death {
                self.collaborators.colliders.set_descendants_enabled(false);
            }
        }

        if let Some(death_layer) = self.config.layer_on_death {
            if let Some(scene) = self.collaborators.scene.as_mut() {
                scene.set_layer(death_layer.layer, death_layer.recursive);
            }
        }

        self.observers.on_death.notify();

        if self.config.disable_controller_on_death {
            if let Some(controller) = self.collaborators.controller.as_mut() {
                controller.disable();
            }
        }

        if self.config.disable_model_on_death {
            if let Some(presentation) = self.collaborators.presentation.as_mut() {
                presentation.set_model_active(false);
            }
        }

        let delay = self.config.delay_before_destruction;
        if delay > 0.0 {
            self.timers
                .cancel_matching(|action| *action == TimedAction::Destroy);
            self.timers.schedule(delay, TimedAction::Destroy);
        } else {
            self.destroy_object();
        }
    }

    /// Hand the dead entity to its respawn handler, or deactivate it
    pub(crate) fn destroy_object(&mut self) {
        let owner_id = self.collaborators.owner_id();
        if let Some(respawn) = self.collaborators.respawn.as_mut() {
            log::debug!("Handing {:?} to respawn handler", owner_id);
            respawn.handle_death();
        } else if self.config.destroy_on_death {
            log::debug!("Destroying {:?}", owner_id);
            if let Some(scene) = self.collaborators.scene.as_mut() {
                scene.set_active(false);
            }
            self.disable();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingRespawn {
        calls: Arc<AtomicU32>,
    }

    impl RespawnHandler for CountingRespawn {
        fn handle_death(&mut self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_kill_state() {
        let mut health = HealthController::new(HealthConfig::new(10), Collaborators::new());
        health.initialize();
        health.kill();

        assert!(!health.is_alive());
        assert!(health.is_invulnerable());
        assert_eq!(health.current_health(), 0);
        // Destroyed immediately
        assert!(!health.is_active());
    }

    #[test]
    fn test_kill_twice_is_noop() {
        let events = EventQueue::new();
        let mut health = HealthController::new(
            HealthConfig::new(10)
                .with_destroy_on_death(false)
                .with_points_when_destroyed(5),
            Collaborators::new().with_event_sink(events.clone()),
        );
        health.initialize();

        health.kill();
        health.kill();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_kill_before_initialize() {
        let mut health = HealthController::new(HealthConfig::new(10), Collaborators::new());
        health.kill();
        assert!(health.is_active());
        assert!(!health.is_initialized());
    }

    #[test]
    fn test_respawn_handler_takes_over() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut health = HealthController::new(
            HealthConfig::new(10),
            Collaborators::new().with_respawn_handler(CountingRespawn {
                calls: calls.clone(),
            }),
        );
        health.initialize();
        health.kill();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // The handler owns teardown, so the controller stays enabled
        assert!(health.is_active());
    }

    #[test]
    fn test_delayed_destruction() {
        let mut health = HealthController::new(
            HealthConfig::new(10).with_delay_before_destruction(1.5),
            Collaborators::new(),
        );
        health.initialize();
        health.kill();

        assert!(health.is_active());
        assert_eq!(health.pending_timers(), 1);

        health.update(1.0);
        assert!(health.is_active());

        health.update(0.5);
        assert!(!health.is_active());
        assert_eq!(health.pending_timers(), 0);
    }

    #[test]
    fn test_kill_keeps_invulnerability() {
        let mut health = HealthController::new(
            HealthConfig::new(10).with_destroy_on_death(false),
            Collaborators::new(),
        );
        health.initialize();
        health.apply_damage(&DamageInfo::new(2).with_invincibility(1.0));
        health.kill();

        health.update(2.0);
        assert!(health.is_invulnerable());
    }
}
