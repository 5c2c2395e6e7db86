//! Weapon domain — огнестрел, который одновременно является pickup предметом
//!
//! # Архитектура
//!
//! Weapon entity = `PickupItem` + `Weapon` + `WeaponSlide` на одном entity.
//! Статы (magazine, fire rate, урон, звуки) приходят из `WeaponTable` при spawn
//! и дальше не меняются; меняется только `ammo` и косметика (`moving_clip`, slide).
//!
//! # Системы
//! - `tick_falling_weapons` — брошенное оружие падает `throw_weapon_duration`, потом → Pickup
//! - `tick_weapon_slide` — slide/recoil пистолета после выстрела

pub mod components;
pub mod table;
pub mod throw;

pub use components::*;
pub use table::*;
pub use throw::*;

use bevy::prelude::*;

use crate::item::{pickup_item_bundle, ItemKind, ItemRarity, PickupItem, RarityTable};
use crate::ShooterSet;

/// Plugin для оружия (падение + slide)
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (tick_falling_weapons, tick_weapon_slide).in_set(ShooterSet::Timers),
        );
    }
}

/// Bundle оружия из таблицы (лежит в мире в Pickup состоянии)
pub fn weapon_bundle(
    table: &WeaponTable,
    rarities: &RarityTable,
    weapon_type: WeaponType,
    rarity: ItemRarity,
    transform: Transform,
) -> impl Bundle {
    let row = table.row(weapon_type);
    let item = PickupItem::new(row.name.clone(), ItemKind::Weapon, rarity)
        .with_sounds(row.pickup_sound.clone(), row.equip_sound.clone());

    (
        pickup_item_bundle(item, rarities, transform),
        Weapon::from_row(weapon_type, &row),
        WeaponSlide::default(),
    )
}
