//! Combat domain — огнестрел, перезарядка, урон, прицеливание
//!
//! # Архитектура
//!
//! **Components:**
//! - `CombatState` — state machine (Unoccupied / FireTimerInProgress / Reloading / Equipping / Stunned)
//! - `FireTrigger` — кнопка огня + fire interval
//! - `Aiming`, `LookRates`, `CrosshairSpread` — прицел
//!
//! **Events:**
//! - `BulletTraceRequest` (ECS → Host), `BulletTraceResult` (Host → ECS)
//! - `AnimNotify` (Host → ECS): завершения монтажей
//! - `DamageEvent`, `CharacterDied`
//! - `ReloadRequest` (ECS internal)
//!
//! # Порядок
//! Notifications: notifies → bullet results → damage → FinishDeath
//! Input: fire/aim кнопки
//! Timers: fire interval + выстрел
//! Items: reload (после подбора патронов)
//! Presentation: FOV, look rates, crosshair

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

pub use components::*;
pub use events::*;
pub use systems::*;

use crate::ShooterSet;

/// Plugin для combat
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BulletTraceRequest>()
            .add_event::<BulletTraceResult>()
            .add_event::<DamageEvent>()
            .add_event::<CharacterDied>()
            .add_event::<AnimNotify>()
            .add_event::<ReloadRequest>()
            .add_systems(
                Update,
                (
                    handle_anim_notifies,
                    handle_bullet_trace_results,
                    apply_damage,
                    handle_finish_death,
                )
                    .chain()
                    .in_set(ShooterSet::Notifications),
            )
            .add_systems(
                Update,
                (handle_fire_input, handle_aim_input)
                    .chain()
                    .in_set(ShooterSet::Input),
            )
            .add_systems(Update, update_trigger.in_set(ShooterSet::Timers))
            .add_systems(
                Update,
                handle_reload
                    .after(crate::inventory::handle_item_arrived)
                    .in_set(ShooterSet::Items),
            )
            .add_systems(
                Update,
                (update_camera_fov, update_look_rates, update_crosshair_spread).in_set(ShooterSet::Presentation),
            );
    }
}
