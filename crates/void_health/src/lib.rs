//! Void Health - Damage, Death and Revive Life-cycle
//!
//! This crate drives the health of a single damageable entity and tells the
//! rest of the engine what should happen around it.
//!
//! # Features
//!
//! - Current / maximum / initial health with clamping
//! - Damage pipeline with timed invulnerability (i-frames)
//! - Death pipeline that requests collision, controller, layer and model
//!   changes from collaborators
//! - Revive pipeline that restores the spawn baseline
//! - Per-entity timers for invulnerability expiry and delayed destruction
//! - Hit / death / revive observers and a pluggable event sink
//!
//! The controller never touches rendering, physics or the scene itself. Every
//! side effect goes through the collaborator traits in [`collaborators`], and
//! each of them is optional.
//!
//! # Example
//!
//! ```ignore
//! use void_health::prelude::*;
//!
//! let config = HealthConfig::new(10)
//!     .with_delay_before_destruction(3.0)
//!     .with_points_when_destroyed(50);
//!
//! let events = EventQueue::new();
//! let mut health = HealthController::new(
//!     config,
//!     Collaborators::new().with_event_sink(events.clone()),
//! );
//! health.initialize();
//!
//! health.apply_damage(&DamageInfo::new(4).with_invincibility(0.5));
//! health.update(delta_time);
//! ```

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod damage;
pub mod death;
pub mod entity;
pub mod error;
pub mod events;
pub mod observer;
pub mod revive;
pub mod timer;

pub mod prelude {
    pub use crate::collaborators::{
        Collaborators, Collider, ColliderSet, HealthBar, Hud, MovementController, Owner,
        Presentation, RespawnHandler, SceneNode,
    };
    pub use crate::config::{DeathLayer, HealthConfig};
    pub use crate::controller::HealthController;
    pub use crate::damage::{DamageInfo, DamageOutcome};
    pub use crate::entity::{Condition, EntityId, EntityKind, Layer};
    pub use crate::error::{HealthError, HealthResult};
    pub use crate::events::{EventQueue, EventSink, HealthEvent, PointsMethod};
    pub use crate::observer::{ObserverId, ObserverList, Observers};
    pub use crate::timer::{TimedAction, TimerId, TimerQueue};
}

pub use prelude::*;
