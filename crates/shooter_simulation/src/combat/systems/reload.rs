//! Reload + montage notifies
//!
//! `handle_reload` — кнопка Reload и `ReloadRequest` (auto-reload).
//! `handle_anim_notifies` — GrabClip/ReleaseClip (косметика магазина) и
//! завершения монтажей через таблицу переходов `CombatState`.

use bevy::prelude::*;

use crate::combat::{Aiming, AnimNotify, AnimNotifyKind, CombatState, CombatTrigger, ReloadRequest};
use crate::components::{AmmoReserves, Dead, Dying, Inventory, ShooterCharacter};
use crate::effects::{Effect, Montage};
use crate::input::{ActionKind, PlayerAction};
use crate::weapon::Weapon;
use crate::{log, log_warning};

pub fn handle_reload(
    mut actions: EventReader<PlayerAction>,
    mut requests: EventReader<ReloadRequest>,
    mut characters: Query<
        (&Inventory, &AmmoReserves, &mut CombatState, &mut Aiming),
        (With<ShooterCharacter>, Without<Dying>, Without<Dead>),
    >,
    weapons: Query<&Weapon>,
    mut effects: EventWriter<Effect>,
) {
    let pending: Vec<Entity> = actions
        .read()
        .filter(|action| action.action == ActionKind::Reload)
        .map(|action| action.character)
        .chain(requests.read().map(|request| request.character))
        .collect();

    for character in pending {
        let Ok((inventory, reserves, mut state, mut aiming)) = characters.get_mut(character) else {
            continue;
        };

        reload_weapon(character, inventory, reserves, &mut state, &mut aiming, &weapons, &mut effects);
    }
}

/// Начать перезарядку: Unoccupied, магазин не полон, резерв не пуст
pub fn reload_weapon(
    character: Entity,
    inventory: &Inventory,
    reserves: &AmmoReserves,
    state: &mut CombatState,
    aiming: &mut Aiming,
    weapons: &Query<&Weapon>,
    effects: &mut EventWriter<Effect>,
) -> bool {
    if !state.can_reload() {
        return false;
    }

    let Some(weapon) = inventory.equipped_weapon().and_then(|entity| weapons.get(entity).ok()) else {
        return false;
    };
    if weapon.is_clip_full() || reserves.get(weapon.ammo_type) == 0 {
        return false;
    }

    aiming.stop();
    *state = CombatState::Reloading;
    effects.write(Effect::montage(
        character,
        Montage::Reload,
        weapon.reload_montage_section.clone(),
    ));

    log(&format!("🔄 {:?} reloading {:?}", character, weapon.weapon_type));
    true
}

pub fn handle_anim_notifies(
    mut notifies: EventReader<AnimNotify>,
    mut characters: Query<(&Inventory, &mut AmmoReserves, &mut CombatState, &mut Aiming), With<ShooterCharacter>>,
    mut weapons: Query<&mut Weapon>,
) {
    for event in notifies.read() {
        // FinishDeath обрабатывает damage
        if event.notify == AnimNotifyKind::FinishDeath {
            continue;
        }

        let Ok((inventory, mut reserves, mut state, mut aiming)) = characters.get_mut(event.character) else {
            log_warning(&format!("⚠️ {:?} for unknown character {:?}", event.notify, event.character));
            continue;
        };

        let equipped = inventory.equipped_weapon();

        match event.notify {
            AnimNotifyKind::GrabClip | AnimNotifyKind::ReleaseClip => {
                if let Some(mut weapon) = equipped.and_then(|entity| weapons.get_mut(entity).ok()) {
                    weapon.moving_clip = event.notify == AnimNotifyKind::GrabClip;
                }
            }
            AnimNotifyKind::FinishReloading => {
                if !state.apply(CombatTrigger::ReloadFinished) {
                    continue;
                }
                aiming.resume_if_held();

                let Some(mut weapon) = equipped.and_then(|entity| weapons.get_mut(entity).ok()) else {
                    continue;
                };
                let moved = reserves.take(weapon.ammo_type, weapon.missing_ammo());
                weapon.reload_ammo(moved);

                log(&format!(
                    "✅ {:?} reloaded: {}/{} (reserve {})",
                    event.character,
                    weapon.ammo,
                    weapon.magazine_capacity,
                    reserves.get(weapon.ammo_type)
                ));
            }
            AnimNotifyKind::FinishEquipping => {
                if state.apply(CombatTrigger::EquipFinished) {
                    aiming.resume_if_held();
                }
            }
            AnimNotifyKind::EndStun => {
                if state.apply(CombatTrigger::StunEnded) {
                    aiming.resume_if_held();
                }
            }
            AnimNotifyKind::FinishDeath => {}
        }
    }
}
