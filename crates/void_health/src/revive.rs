//! Revive pipeline

use crate::controller::HealthController;
use crate::entity::Condition;

impl HealthController {
    /// Bring the entity back: restore collisions, layer, controller, tint and
    /// position, then re-initialize health
    pub fn revive(&mut self) {
        if !self.initialized {
            log::warn!("Revive called before initialization, ignoring");
            return;
        }

        // A destroy still in flight must never hit the revived entity
        self.timers.cancel_all();

        self.collaborators.colliders.set_own_enabled(true);
        if self.config.disable_child_collisions_on_death {
            self.collaborators.colliders.set_descendants_enabled(true);
        }

        if let Some(death_layer) = self.config.layer_on_death {
            if let Some(scene) = self.collaborators.scene.as_mut() {
                scene.set_layer(self.initial_layer, death_layer.recursive);
            }
        }

        if let Some(controller) = self.collaborators.controller.as_mut() {
            controller.enable();
            controller.enable_collisions();
            controller.reset();
        }

        if let Some(owner) = self.collaborators.owner.as_mut() {
            owner.set_condition(Condition::Normal);
        }

        if let Some(presentation) = self.collaborators.presentation.as_mut() {
            presentation.restore_tint();
        }

        if self.config.respawn_at_initial_location {
            if let Some(scene) = self.collaborators.scene.as_mut() {
                scene.set_position(self.initial_position);
            }
        }

        if let Some(bar) = self.collaborators.health_bar.as_mut() {
            bar.initialize();
        }

        self.active = true;
        self.initialize();

        log::debug!("Revived {:?}", self.collaborators.owner_id());
        self.observers.on_revive.notify();
    }
}
