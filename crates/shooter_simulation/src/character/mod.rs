//! Character domain — spawn персонажа и locomotion (crouch/jump)

use bevy::prelude::*;

pub mod locomotion;

pub use locomotion::*;

use crate::combat::LookRates;
use crate::components::{AmmoReserves, FollowCamera, Inventory, ShooterCharacter};
use crate::config::ShooterConfig;
use crate::item::{ItemRarity, ItemState, PickupItem, RarityTable};
use crate::weapon::{weapon_bundle, WeaponTable, WeaponType};
use crate::{log, ShooterSet};

/// Plugin для locomotion
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<JumpRequested>()
            .add_systems(Update, handle_locomotion_input.in_set(ShooterSet::Input))
            .add_systems(Update, interp_capsule_half_height.in_set(ShooterSet::Presentation));
    }
}

/// Bundle персонажа (стартовые патроны, стойка, камера из config)
pub fn shooter_character_bundle(config: &ShooterConfig, transform: Transform) -> impl Bundle {
    (
        ShooterCharacter,
        transform,
        AmmoReserves::from_config(config),
        Stance::standing(config),
        LookRates::hip(config),
        FollowCamera {
            transform: Transform::default(),
            fov: config.default_fov,
        },
    )
}

/// Spawn персонажа + (опционально) стартовое оружие в слоте 0, экипированное
///
/// Таблицы и config берутся из world (или дефолты, если plugin ещё не собран).
pub fn spawn_shooter_character(
    world: &mut World,
    transform: Transform,
    starting_weapon: Option<WeaponType>,
) -> (Entity, Option<Entity>) {
    let config = world.get_resource::<ShooterConfig>().cloned().unwrap_or_default();
    let weapons = world.get_resource::<WeaponTable>().cloned().unwrap_or_default();
    let rarities = world.get_resource::<RarityTable>().cloned().unwrap_or_default();

    let weapon = starting_weapon.map(|weapon_type| {
        let entity = world
            .spawn(weapon_bundle(&weapons, &rarities, weapon_type, ItemRarity::Common, transform))
            .id();
        if let Some(mut item) = world.get_mut::<PickupItem>(entity) {
            item.state = ItemState::Equipped;
            item.slot_index = Some(0);
        }
        entity
    });

    let mut inventory = Inventory::default();
    if let Some(weapon) = weapon {
        inventory.slots[0] = Some(weapon);
        inventory.equipped = Some(0);
    }

    let character = world
        .spawn((shooter_character_bundle(&config, transform), inventory))
        .id();

    log(&format!("🧍 Spawned shooter {:?} with {:?}", character, starting_weapon));
    (character, weapon)
}
