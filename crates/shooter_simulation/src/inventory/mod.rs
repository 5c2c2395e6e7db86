//! Inventory domain — подбор, слоты, патроны, equip/swap/drop
//!
//! Компоненты контроллера живут в `components::inventory`; здесь — события
//! и системы, которые их меняют.
//!
//! # Events
//! - `ItemOverlapChanged`, `ItemTraceResult` (Host → ECS)
//! - `InventorySlotEquipped`, `HighlightInventoryIcon`, `ItemPickedUp` (ECS → UI)

use bevy::prelude::*;

pub mod equip;
pub mod events;
pub mod highlight;
pub mod pickup;

pub use equip::*;
pub use events::*;
pub use highlight::*;
pub use pickup::*;

use crate::components::SoundCooldowns;
use crate::ShooterSet;

/// Plugin для inventory
pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemOverlapChanged>()
            .add_event::<ItemTraceResult>()
            .add_event::<InventorySlotEquipped>()
            .add_event::<HighlightInventoryIcon>()
            .add_event::<ItemPickedUp>()
            .add_systems(
                Update,
                (handle_item_overlaps, handle_item_trace)
                    .chain()
                    .in_set(ShooterSet::Notifications),
            )
            .add_systems(
                Update,
                (handle_select_input, handle_equip_input, handle_drop_input)
                    .chain()
                    .in_set(ShooterSet::Input),
            )
            .add_systems(Update, tick_sound_cooldowns.in_set(ShooterSet::Timers))
            .add_systems(
                Update,
                handle_item_arrived
                    .after(crate::item::update_item_interp)
                    .in_set(ShooterSet::Items),
            )
            .add_systems(Update, audit_overlap_counts.in_set(ShooterSet::Presentation));
    }
}

pub fn tick_sound_cooldowns(time: Res<Time>, mut characters: Query<&mut SoundCooldowns>) {
    for mut cooldowns in characters.iter_mut() {
        if cooldowns.pickup.is_some() || cooldowns.equip.is_some() {
            cooldowns.tick(time.delta());
        }
    }
}
