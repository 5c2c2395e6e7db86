//! Equip / swap / drop оружия
//!
//! Экипированное оружие остаётся в своём слоте: `Inventory::equipped`
//! указывает на слот, предмет переключается между Equipped и PickedUp.

use bevy::prelude::*;

use super::events::{InventorySlotEquipped, PickupOutcome};
use crate::combat::{Aiming, CombatState};
use crate::components::{Dead, Dying, Inventory, ShooterCharacter};
use crate::config::ShooterConfig;
use crate::effects::{Effect, Montage};
use crate::input::{ActionKind, PlayerAction};
use crate::item::{ItemState, PickupItem};
use crate::weapon::throw_weapon;
use crate::{log, log_error, DeterministicRng};

/// Секция equip монтажа
const EQUIP_MONTAGE_SECTION: &str = "Equip";

/// Сделать оружие в `slot` экипированным
///
/// UI получает `InventorySlotEquipped`, кроме swap'а поверх уже экипированного.
pub fn equip_weapon(
    character: Entity,
    inventory: &mut Inventory,
    weapon: &mut PickupItem,
    slot: usize,
    swapping: bool,
    equipped_events: &mut EventWriter<InventorySlotEquipped>,
) {
    match inventory.equipped {
        None => {
            equipped_events.write(InventorySlotEquipped {
                character,
                old: None,
                new: slot,
            });
        }
        Some(old) if !swapping => {
            equipped_events.write(InventorySlotEquipped {
                character,
                old: Some(old),
                new: slot,
            });
        }
        Some(_) => {}
    }

    inventory.equipped = Some(slot);
    weapon.state = ItemState::Equipped;
    log(&format!("🔫 {} equipped (slot {})", weapon.name, slot));
}

/// Выбросить экипированное оружие (слот освобождается)
pub fn drop_equipped_weapon(
    commands: &mut Commands,
    inventory: &mut Inventory,
    items: &mut Query<(&mut PickupItem, &mut Transform)>,
    rng: &mut DeterministicRng,
    config: &ShooterConfig,
) -> Option<Entity> {
    let slot = inventory.equipped?;
    let weapon = inventory.get(slot)?;

    let Ok((mut item, mut transform)) = items.get_mut(weapon) else {
        log_error(&format!("Equipped weapon {:?} has no PickupItem", weapon));
        return None;
    };

    inventory.slots[slot] = None;
    inventory.equipped = None;
    throw_weapon(commands, weapon, &mut item, &mut transform, rng, config);

    Some(weapon)
}

/// Новое оружие занимает слот экипированного, старое выбрасывается
pub fn swap_weapon(
    commands: &mut Commands,
    character: Entity,
    new_weapon: Entity,
    inventory: &mut Inventory,
    items: &mut Query<(&mut PickupItem, &mut Transform)>,
    rng: &mut DeterministicRng,
    config: &ShooterConfig,
    equipped_events: &mut EventWriter<InventorySlotEquipped>,
) -> Option<PickupOutcome> {
    let slot = inventory.equipped?;
    let old_weapon = inventory.get(slot)?;

    {
        let Ok((mut old_item, mut transform)) = items.get_mut(old_weapon) else {
            log_error(&format!("Swap: equipped weapon {:?} has no PickupItem", old_weapon));
            return None;
        };
        throw_weapon(commands, old_weapon, &mut old_item, &mut transform, rng, config);
    }

    let Ok((mut new_item, _)) = items.get_mut(new_weapon) else {
        log_error(&format!("Swap: new weapon {:?} has no PickupItem", new_weapon));
        return None;
    };

    inventory.slots[slot] = Some(new_weapon);
    new_item.slot_index = Some(slot);
    new_item.inventory_full = false;
    equip_weapon(character, inventory, &mut new_item, slot, true, equipped_events);

    Some(PickupOutcome::Swapped {
        slot,
        dropped: old_weapon,
    })
}

/// Переключиться на оружие из `new_slot` (equip montage, forced equip звук)
pub fn exchange_inventory_items(
    character: Entity,
    new_slot: usize,
    inventory: &mut Inventory,
    state: &mut CombatState,
    aiming: &mut Aiming,
    items: &mut Query<&mut PickupItem>,
    effects: &mut EventWriter<Effect>,
    equipped_events: &mut EventWriter<InventorySlotEquipped>,
) -> bool {
    if inventory.equipped == Some(new_slot) || !state.can_exchange_items() {
        return false;
    }

    let Some(new_weapon) = inventory.get(new_slot) else {
        return false;
    };
    if !items.get(new_weapon).is_ok_and(|item| item.is_weapon()) {
        return false;
    }

    aiming.stop();

    if let Some(old_weapon) = inventory.equipped_weapon() {
        if let Ok(mut old_item) = items.get_mut(old_weapon) {
            old_item.state = ItemState::PickedUp;
        }
    }

    let Ok(mut new_item) = items.get_mut(new_weapon) else {
        return false;
    };
    equip_weapon(character, inventory, &mut new_item, new_slot, false, equipped_events);

    *state = CombatState::Equipping;
    effects.write(Effect::montage(character, Montage::Equip, EQUIP_MONTAGE_SECTION));
    if let Some(effect) = Effect::sound(new_item.equip_sound.as_deref()) {
        effects.write(effect);
    }

    true
}

pub fn handle_equip_input(
    mut actions: EventReader<PlayerAction>,
    mut characters: Query<
        (&mut Inventory, &mut CombatState, &mut Aiming),
        (With<ShooterCharacter>, Without<Dying>, Without<Dead>),
    >,
    mut items: Query<&mut PickupItem>,
    mut effects: EventWriter<Effect>,
    mut equipped_events: EventWriter<InventorySlotEquipped>,
) {
    for action in actions.read() {
        let Some(new_slot) = action.action.equip_slot() else {
            continue;
        };
        let Ok((mut inventory, mut state, mut aiming)) = characters.get_mut(action.character) else {
            continue;
        };

        exchange_inventory_items(
            action.character,
            new_slot,
            &mut inventory,
            &mut state,
            &mut aiming,
            &mut items,
            &mut effects,
            &mut equipped_events,
        );
    }
}

pub fn handle_drop_input(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    mut characters: Query<(&mut Inventory, &CombatState), (With<ShooterCharacter>, Without<Dying>, Without<Dead>)>,
    mut items: Query<(&mut PickupItem, &mut Transform)>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<ShooterConfig>,
) {
    for action in actions.read().filter(|action| action.action == ActionKind::DropWeapon) {
        let Ok((mut inventory, state)) = characters.get_mut(action.character) else {
            continue;
        };
        if *state != CombatState::Unoccupied {
            continue;
        }

        drop_equipped_weapon(&mut commands, &mut inventory, &mut items, &mut rng, &config);
    }
}
