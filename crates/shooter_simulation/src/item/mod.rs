//! Item domain — подбираемые предметы
//!
//! # Архитектура
//!
//! **Components:**
//! - `PickupItem` — вид, rarity, state, UI флаги
//! - `ItemProperties` — collision/visibility/physics, выведенные из state
//! - `GlowMaterial` / `ItemOutline` / `PulseTimer` — косметика
//! - `RarityVisuals` — снимок rarity таблицы при spawn
//! - `ItemInterp` — только пока предмет летит к камере
//!
//! **Events:**
//! - `StartItemInterp` (→ ECS): начать полёт
//! - `ItemArrived` (ECS internal): долетел, контроллер забирает
//!
//! # Порядок (ShooterSet::Items)
//! start_item_interp → update_item_interp → [inventory pickup] → init/sync/glow

use bevy::prelude::*;

pub mod components;
pub mod interp;
pub mod pulse;
pub mod rarity;

pub use components::*;
pub use interp::*;
pub use pulse::*;
pub use rarity::*;

use crate::weapon::AmmoType;
use crate::ShooterSet;

/// Plugin для pickup предметов
pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StartItemInterp>()
            .add_event::<ItemArrived>()
            .add_systems(
                Update,
                (start_item_interp, update_item_interp)
                    .chain()
                    .in_set(ShooterSet::Items),
            )
            .add_systems(
                Update,
                (init_spawned_items, sync_item_properties, update_item_glow)
                    .chain()
                    .after(update_item_interp)
                    .after(crate::inventory::handle_item_arrived)
                    .in_set(ShooterSet::Items),
            );
    }
}

/// Bundle подбираемого предмета (rarity косметика снимается здесь один раз)
pub fn pickup_item_bundle(item: PickupItem, rarities: &RarityTable, transform: Transform) -> impl Bundle {
    let visuals = rarities.visuals(item.rarity);
    (item, visuals, transform)
}

/// Пачка патронов
pub fn ammo_bundle(ammo_type: AmmoType, count: u32, rarities: &RarityTable, transform: Transform) -> impl Bundle {
    let name = match ammo_type {
        AmmoType::NineMm => "9mm Ammo",
        AmmoType::AssaultRifle => "Assault Rifle Ammo",
    };
    let item = PickupItem::new(name, ItemKind::Ammo { ammo_type }, ItemRarity::Common)
        .with_count(count)
        .with_sounds(Some("ammo_pickup".to_string()), Some("ammo_equip".to_string()));

    pickup_item_bundle(item, rarities, transform)
}
