//! Pickup pipeline: overlap счётчик, focus трассы, Select, get_pickup_item
//!
//! # Systems
//!
//! **Notifications:**
//! - `handle_item_overlaps` — ±1 к счётчику, автосбор патронов
//! - `handle_item_trace` — prompt/outline/подсветка слота для предмета под прицелом
//!
//! **Input:**
//! - `handle_select_input` — Select → интерполяция focused предмета
//!
//! **Items:**
//! - `handle_item_arrived` — долетевший предмет → слот / equip / swap / патроны
//!
//! **Presentation:**
//! - `audit_overlap_counts` — warning если счётчик ушёл в минус

use bevy::prelude::*;

use super::equip::{equip_weapon, swap_weapon};
use super::events::*;
use super::highlight::{highlight_empty_slot, unhighlight_slot};
use crate::combat::{CombatState, ReloadRequest};
use crate::components::{AmmoReserves, Dead, Dying, Inventory, OverlappedItems, ShooterCharacter, SoundCooldowns};
use crate::config::ShooterConfig;
use crate::effects::Effect;
use crate::input::{ActionKind, PlayerAction};
use crate::item::{ItemArrived, ItemBehavior, ItemKind, ItemOutline, ItemState, PickupItem, StartItemInterp};
use crate::weapon::Weapon;
use crate::{log, log_error, log_warning, DeterministicRng};

// ============================================================================
// Overlaps
// ============================================================================

pub fn handle_item_overlaps(
    mut events: EventReader<ItemOverlapChanged>,
    mut characters: Query<(&mut OverlappedItems, &mut Inventory), With<ShooterCharacter>>,
    items: Query<&PickupItem>,
    mut interps: EventWriter<StartItemInterp>,
    mut highlights: EventWriter<HighlightInventoryIcon>,
) {
    for event in events.read() {
        let Ok((mut overlapped, mut inventory)) = characters.get_mut(event.character) else {
            log_error(&format!("Overlap for unknown character {:?}", event.character));
            continue;
        };

        if !event.began {
            overlapped.increment(-1);
            unhighlight_slot(event.character, &mut inventory, &mut highlights);
            continue;
        }

        overlapped.increment(1);

        // Патроны собираются сразу, без Select
        let Ok(item) = items.get(event.item) else {
            continue;
        };
        if item.kind.collects_on_overlap() && item.state == ItemState::Pickup {
            interps.write(StartItemInterp {
                item: event.item,
                character: event.character,
                force_play_sound: false,
            });
        }
    }
}

/// Конец кадра: отрицательный счётчик = потерянный begin/end overlap
pub fn audit_overlap_counts(characters: Query<(Entity, &OverlappedItems), Changed<OverlappedItems>>) {
    for (entity, overlapped) in characters.iter() {
        if overlapped.count < 0 {
            log_warning(&format!(
                "⚠️ Character {:?} overlapped item count is negative ({})",
                entity, overlapped.count
            ));
        }
    }
}

// ============================================================================
// Focus trace
// ============================================================================

pub fn handle_item_trace(
    mut traces: EventReader<ItemTraceResult>,
    mut characters: Query<(Entity, &mut OverlappedItems, &mut Inventory), With<ShooterCharacter>>,
    mut items: Query<(&mut PickupItem, &mut ItemOutline)>,
    mut highlights: EventWriter<HighlightInventoryIcon>,
) {
    for trace in traces.read() {
        let Ok((_, mut overlapped, mut inventory)) = characters.get_mut(trace.character) else {
            continue;
        };
        if !overlapped.should_trace_for_items() {
            continue;
        }

        // Предмет в полёте (или уже подобранный) focus не получает
        let focused = trace.item.filter(|item| {
            items
                .get(*item)
                .is_ok_and(|(item, _)| item.state == ItemState::Pickup)
        });

        match focused {
            Some(entity) => {
                if let Ok((mut item, mut outline)) = items.get_mut(entity) {
                    item.prompt_visible = true;
                    item.inventory_full = inventory.is_full();
                    outline.request(true);
                }
                if inventory.highlighted.is_none() {
                    highlight_empty_slot(trace.character, &mut inventory, &mut highlights);
                }
            }
            None => unhighlight_slot(trace.character, &mut inventory, &mut highlights),
        }

        if let Some(last) = overlapped.last_focused {
            if Some(last) != focused {
                hide_focus(&mut items, last);
            }
        }

        overlapped.focused = focused;
        overlapped.last_focused = focused;
    }

    // Вышли из всех сфер → гасим то, что было под прицелом
    for (_, mut overlapped, _) in characters.iter_mut() {
        if overlapped.should_trace_for_items() {
            continue;
        }
        overlapped.focused = None;
        if let Some(last) = overlapped.last_focused.take() {
            hide_focus(&mut items, last);
        }
    }
}

fn hide_focus(items: &mut Query<(&mut PickupItem, &mut ItemOutline)>, entity: Entity) {
    if let Ok((mut item, mut outline)) = items.get_mut(entity) {
        item.prompt_visible = false;
        outline.request(false);
    }
}

// ============================================================================
// Select
// ============================================================================

pub fn handle_select_input(
    mut actions: EventReader<PlayerAction>,
    mut characters: Query<(&mut OverlappedItems, &CombatState), (With<ShooterCharacter>, Without<Dying>, Without<Dead>)>,
    mut interps: EventWriter<StartItemInterp>,
) {
    for action in actions.read().filter(|action| action.action == ActionKind::Select) {
        let Ok((mut overlapped, state)) = characters.get_mut(action.character) else {
            continue;
        };
        if *state != CombatState::Unoccupied {
            continue;
        }

        let Some(item) = overlapped.focused.take() else {
            continue;
        };

        interps.write(StartItemInterp {
            item,
            character: action.character,
            force_play_sound: true,
        });
    }
}

// ============================================================================
// GetPickupItem
// ============================================================================

pub fn handle_item_arrived(
    mut commands: Commands,
    mut arrivals: EventReader<ItemArrived>,
    mut characters: Query<
        (&mut Inventory, &mut AmmoReserves, &mut SoundCooldowns, &mut OverlappedItems),
        (With<ShooterCharacter>, Without<Dead>),
    >,
    mut items: Query<(&mut PickupItem, &mut Transform)>,
    weapons: Query<&Weapon>,
    config: Res<ShooterConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: EventWriter<Effect>,
    mut equipped_events: EventWriter<InventorySlotEquipped>,
    mut reloads: EventWriter<ReloadRequest>,
    mut picked_up: EventWriter<ItemPickedUp>,
) {
    for arrival in arrivals.read() {
        let Ok((mut inventory, mut reserves, mut cooldowns, mut overlapped)) = characters.get_mut(arrival.character)
        else {
            log_error(&format!("ItemArrived: character {:?} not found or dead", arrival.character));
            continue;
        };

        let Ok((mut item, _)) = items.get_mut(arrival.item) else {
            log_error(&format!("ItemArrived: item {:?} not found", arrival.item));
            continue;
        };

        if cooldowns.try_play_equip_sound(false, config.equip_sound_cooldown) {
            if let Some(effect) = Effect::sound(item.equip_sound.as_deref()) {
                effects.write(effect);
            }
        }

        let kind = item.kind;
        let outcome = match kind {
            ItemKind::Ammo { ammo_type } => {
                let total = reserves.add(ammo_type, item.count);
                log(&format!("📦 +{} {:?} ammo (reserve {})", item.count, ammo_type, total));
                commands.entity(arrival.item).despawn();

                // Пустое экипированное оружие того же калибра → перезарядка
                let empty_match = inventory
                    .equipped_weapon()
                    .and_then(|weapon| weapons.get(weapon).ok())
                    .is_some_and(|weapon| weapon.ammo_type == ammo_type && !weapon.has_ammo());
                if empty_match {
                    reloads.write(ReloadRequest {
                        character: arrival.character,
                    });
                }

                PickupOutcome::AmmoAdded { total }
            }
            ItemKind::Weapon | ItemKind::Misc => match inventory.first_empty_slot() {
                Some(slot) => {
                    inventory.slots[slot] = Some(arrival.item);
                    item.slot_index = Some(slot);
                    item.inventory_full = false;

                    if item.is_weapon() && inventory.equipped.is_none() {
                        equip_weapon(arrival.character, &mut inventory, &mut item, slot, false, &mut equipped_events);
                        PickupOutcome::Equipped { slot }
                    } else {
                        item.state = ItemState::PickedUp;
                        PickupOutcome::Stored { slot }
                    }
                }
                None if item.is_weapon() && inventory.equipped_weapon().is_some() => {
                    // Отпускаем borrow нового предмета: swap трогает оба оружия
                    drop(item);
                    match swap_weapon(
                        &mut commands,
                        arrival.character,
                        arrival.item,
                        &mut inventory,
                        &mut items,
                        &mut rng,
                        &config,
                        &mut equipped_events,
                    ) {
                        Some(outcome) => {
                            overlapped.focused = None;
                            overlapped.last_focused = None;
                            outcome
                        }
                        None => continue,
                    }
                }
                None => {
                    item.state = ItemState::PickedUp;
                    item.inventory_full = true;
                    log_warning(&format!("⚠️ Inventory full, {} not stored", item.name));
                    PickupOutcome::InventoryFull
                }
            },
        };

        picked_up.write(ItemPickedUp {
            character: arrival.character,
            item: arrival.item,
            outcome,
        });
    }
}
