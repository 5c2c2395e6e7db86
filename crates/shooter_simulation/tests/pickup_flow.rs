//! Pickup flow (headless): overlap → focus → Select → полёт → inventory

mod common;

use bevy::prelude::*;
use common::*;
use shooter_simulation::inventory::{HighlightInventoryIcon, InventorySlotEquipped, ItemOverlapChanged, ItemTraceResult};
use shooter_simulation::item::{ammo_bundle, pickup_item_bundle, ItemInterp, ItemOutline, PulseTimer};
use shooter_simulation::weapon::{weapon_bundle, Falling};
use shooter_simulation::*;

/// Время полёта (0.7s) с запасом
const INTERP_FRAMES: usize = 10;

fn spawn_weapon(app: &mut App, weapon_type: WeaponType, location: Vec3) -> Entity {
    let table = app.world().resource::<WeaponTable>().clone();
    let rarities = app.world().resource::<RarityTable>().clone();
    app.world_mut()
        .spawn(weapon_bundle(
            &table,
            &rarities,
            weapon_type,
            ItemRarity::Rare,
            Transform::from_translation(location),
        ))
        .id()
}

fn spawn_misc(app: &mut App, name: &str, state: ItemState) -> Entity {
    let rarities = app.world().resource::<RarityTable>().clone();
    let item = PickupItem::new(name, ItemKind::Misc, ItemRarity::Common).with_state(state);
    app.world_mut()
        .spawn(pickup_item_bundle(item, &rarities, Transform::from_xyz(1.0, 0.0, -3.0)))
        .id()
}

/// Заполнить слоты 1.. misc предметами (слот 0 занят стартовым оружием)
fn fill_inventory(app: &mut App, character: Entity) {
    for slot in 1..6 {
        let item = spawn_misc(app, &format!("Trinket {slot}"), ItemState::PickedUp);
        app.world_mut().get_mut::<PickupItem>(item).unwrap().slot_index = Some(slot);
        app.world_mut().get_mut::<Inventory>(character).unwrap().slots[slot] = Some(item);
    }
}

fn overlap(app: &mut App, character: Entity, item: Entity, began: bool) {
    app.world_mut().send_event(ItemOverlapChanged { item, character, began });
}

fn trace(app: &mut App, character: Entity, item: Option<Entity>) {
    app.world_mut().send_event(ItemTraceResult { character, item });
}

/// overlap + trace + Select, затем полёт до конца
fn select_and_collect(app: &mut App, character: Entity, item: Entity) {
    overlap(app, character, item, true);
    app.update();
    trace(app, character, Some(item));
    app.update();
    act(app, character, ActionKind::Select);
    run_frames(app, INTERP_FRAMES);
}

fn item_state(app: &App, item: Entity) -> ItemState {
    app.world().get::<PickupItem>(item).unwrap().state
}

fn outcomes(app: &App) -> Vec<PickupOutcome> {
    collected::<ItemPickedUp>(app)
        .into_iter()
        .map(|event| event.outcome)
        .collect()
}

#[test]
fn test_overlap_count_is_balanced_and_never_clamped() {
    let mut app = test_app();
    let (character, _) = spawn_character(&mut app, None);
    let first = spawn_misc(&mut app, "Coin", ItemState::Pickup);
    let second = spawn_misc(&mut app, "Key", ItemState::Pickup);

    overlap(&mut app, character, first, true);
    overlap(&mut app, character, second, true);
    app.update();
    assert_eq!(app.world().get::<OverlappedItems>(character).unwrap().count, 2);

    overlap(&mut app, character, first, false);
    overlap(&mut app, character, second, false);
    app.update();
    assert_eq!(app.world().get::<OverlappedItems>(character).unwrap().count, 0);

    // Лишний end overlap: только warning
    overlap(&mut app, character, second, false);
    app.update();
    assert_eq!(app.world().get::<OverlappedItems>(character).unwrap().count, -1);
}

#[test]
fn test_trace_focus_shows_prompt_and_highlights_slot() {
    let mut app = test_app();
    let (character, _) = spawn_character(&mut app, None);
    let item = spawn_misc(&mut app, "Coin", ItemState::Pickup);

    overlap(&mut app, character, item, true);
    trace(&mut app, character, Some(item));
    app.update();

    let pickup = app.world().get::<PickupItem>(item).unwrap();
    assert!(pickup.prompt_visible);
    assert!(!pickup.inventory_full);
    assert!(app.world().get::<ItemOutline>(item).unwrap().enabled);
    assert_eq!(app.world().get::<OverlappedItems>(character).unwrap().focused, Some(item));
    assert_eq!(
        collected::<HighlightInventoryIcon>(&app),
        vec![HighlightInventoryIcon {
            character,
            slot: 0,
            start_animation: true,
        }]
    );

    // Прицел ушёл с предмета
    trace(&mut app, character, None);
    app.update();

    assert!(!app.world().get::<PickupItem>(item).unwrap().prompt_visible);
    assert!(!app.world().get::<ItemOutline>(item).unwrap().enabled);
    assert_eq!(app.world().get::<OverlappedItems>(character).unwrap().focused, None);
    assert!(!collected::<HighlightInventoryIcon>(&app).last().unwrap().start_animation);
}

#[test]
fn test_weapon_round_trip_equips_and_frees_anchor() {
    let mut app = test_app();
    let (character, _) = spawn_character(&mut app, None);
    let weapon = spawn_weapon(&mut app, WeaponType::SubmachineGun, Vec3::new(2.0, 0.0, -2.0));

    overlap(&mut app, character, weapon, true);
    app.update();
    // Оружие само не собирается
    assert_eq!(item_state(&app, weapon), ItemState::Pickup);

    trace(&mut app, character, Some(weapon));
    app.update();
    act(&mut app, character, ActionKind::Select);
    app.update();

    assert_eq!(item_state(&app, weapon), ItemState::EquipInterping);
    assert!(app.world().get::<ItemInterp>(weapon).is_some());
    assert!(!app.world().get::<PulseTimer>(weapon).unwrap().is_running());
    assert_eq!(app.world().get::<InterpDestinations>(character).unwrap().anchors[0].item_count, 1);

    run_frames(&mut app, INTERP_FRAMES);

    assert_eq!(item_state(&app, weapon), ItemState::Equipped);
    assert!(app.world().get::<ItemInterp>(weapon).is_none());
    assert_eq!(app.world().get::<Transform>(weapon).unwrap().scale, Vec3::ONE);
    assert_eq!(app.world().get::<InterpDestinations>(character).unwrap().anchors[0].item_count, 0);

    let inventory = app.world().get::<Inventory>(character).unwrap();
    assert_eq!(inventory.slots[0], Some(weapon));
    assert_eq!(inventory.equipped, Some(0));
    assert_eq!(inventory.highlighted, None);

    assert_eq!(outcomes(&app), vec![PickupOutcome::Equipped { slot: 0 }]);
    assert_eq!(
        collected::<InventorySlotEquipped>(&app),
        vec![InventorySlotEquipped {
            character,
            old: None,
            new: 0,
        }]
    );
}

#[test]
fn test_misc_item_is_stored_next_to_equipped_weapon() {
    let mut app = test_app();
    let (character, _) = spawn_character(&mut app, Some(WeaponType::SubmachineGun));
    let item = spawn_misc(&mut app, "Coin", ItemState::Pickup);

    select_and_collect(&mut app, character, item);

    assert_eq!(item_state(&app, item), ItemState::PickedUp);
    assert_eq!(app.world().get::<PickupItem>(item).unwrap().slot_index, Some(1));
    let inventory = app.world().get::<Inventory>(character).unwrap();
    assert_eq!(inventory.item_count(), 2);
    assert_eq!(inventory.equipped, Some(0));
    assert_eq!(outcomes(&app), vec![PickupOutcome::Stored { slot: 1 }]);

    // Shared точки снова свободны
    let destinations = app.world().get::<InterpDestinations>(character).unwrap();
    assert!(destinations.anchors.iter().all(|anchor| anchor.item_count == 0));
}

#[test]
fn test_full_inventory_rejects_misc_item() {
    let mut app = test_app();
    let (character, _) = spawn_character(&mut app, Some(WeaponType::SubmachineGun));
    fill_inventory(&mut app, character);
    let item = spawn_misc(&mut app, "Seventh", ItemState::Pickup);

    overlap(&mut app, character, item, true);
    trace(&mut app, character, Some(item));
    app.update();
    assert!(app.world().get::<PickupItem>(item).unwrap().inventory_full);
    // Свободного слота нет → подсветки нет
    assert!(collected::<HighlightInventoryIcon>(&app).is_empty());

    act(&mut app, character, ActionKind::Select);
    run_frames(&mut app, INTERP_FRAMES);

    let pickup = app.world().get::<PickupItem>(item).unwrap();
    assert_eq!(pickup.state, ItemState::PickedUp);
    assert!(pickup.inventory_full);
    assert_eq!(pickup.slot_index, None);
    assert_eq!(app.world().get::<Inventory>(character).unwrap().item_count(), 6);
    assert_eq!(outcomes(&app), vec![PickupOutcome::InventoryFull]);
}

#[test]
fn test_full_inventory_swaps_weapons() {
    let mut app = test_app();
    let (character, old_weapon) = spawn_character(&mut app, Some(WeaponType::SubmachineGun));
    let old_weapon = old_weapon.unwrap();
    fill_inventory(&mut app, character);
    let new_weapon = spawn_weapon(&mut app, WeaponType::AssaultRifle, Vec3::new(0.0, 0.0, -2.0));

    select_and_collect(&mut app, character, new_weapon);

    assert_eq!(
        outcomes(&app),
        vec![PickupOutcome::Swapped {
            slot: 0,
            dropped: old_weapon,
        }]
    );

    let inventory = app.world().get::<Inventory>(character).unwrap();
    assert_eq!(inventory.slots[0], Some(new_weapon));
    assert_eq!(inventory.equipped, Some(0));
    assert_eq!(item_state(&app, new_weapon), ItemState::Equipped);

    // Старое оружие брошено, падает, через 0.7s снова Pickup
    let dropped = app.world().get::<PickupItem>(old_weapon).unwrap();
    assert_eq!(dropped.slot_index, None);
    assert!(matches!(dropped.state, ItemState::Falling | ItemState::Pickup));

    run_frames(&mut app, INTERP_FRAMES);
    assert_eq!(item_state(&app, old_weapon), ItemState::Pickup);
    assert!(app.world().get::<Falling>(old_weapon).is_none());
    assert!(app.world().get::<PulseTimer>(old_weapon).unwrap().is_running());
}

#[test]
fn test_ammo_is_collected_on_overlap_and_reloads_empty_weapon() {
    let mut app = test_app();
    let (character, weapon) = spawn_character(&mut app, Some(WeaponType::SubmachineGun));
    let weapon = weapon.unwrap();
    app.world_mut().get_mut::<Weapon>(weapon).unwrap().ammo = 0;
    app.world_mut()
        .get_mut::<AmmoReserves>(character)
        .unwrap()
        .set(AmmoType::NineMm, 0);

    let rarities = app.world().resource::<RarityTable>().clone();
    let ammo = app
        .world_mut()
        .spawn(ammo_bundle(AmmoType::NineMm, 20, &rarities, Transform::from_xyz(1.0, 0.0, -1.0)))
        .id();

    overlap(&mut app, character, ammo, true);
    app.update();
    assert_eq!(item_state(&app, ammo), ItemState::EquipInterping);
    // В полёте outline залочен и погашен
    let outline = app.world().get::<ItemOutline>(ammo).unwrap();
    assert!(!outline.enabled);
    assert!(outline.locked);

    run_frames(&mut app, INTERP_FRAMES);

    assert!(app.world().get_entity(ammo).is_err());
    assert_eq!(outcomes(&app), vec![PickupOutcome::AmmoAdded { total: 20 }]);
    assert_eq!(*app.world().get::<CombatState>(character).unwrap(), CombatState::Reloading);

    notify(&mut app, character, AnimNotifyKind::FinishReloading);
    app.update();
    assert_eq!(app.world().get::<Weapon>(weapon).unwrap().ammo, 20);
    assert_eq!(app.world().get::<AmmoReserves>(character).unwrap().get(AmmoType::NineMm), 0);
}

#[test]
fn test_interp_reverts_when_character_disappears() {
    let mut app = test_app();
    let (character, _) = spawn_character(&mut app, None);
    let item = spawn_misc(&mut app, "Coin", ItemState::Pickup);

    overlap(&mut app, character, item, true);
    trace(&mut app, character, Some(item));
    app.update();
    act(&mut app, character, ActionKind::Select);
    run_frames(&mut app, 2);
    assert_eq!(item_state(&app, item), ItemState::EquipInterping);

    app.world_mut().despawn(character);
    run_frames(&mut app, 2);

    assert_eq!(item_state(&app, item), ItemState::Pickup);
    assert!(app.world().get::<ItemInterp>(item).is_none());
    assert!(app.world().get::<PulseTimer>(item).unwrap().is_running());
    assert!(!app.world().get::<ItemOutline>(item).unwrap().locked);
    assert_eq!(app.world().get::<Transform>(item).unwrap().scale, Vec3::ONE);
}

#[test]
fn test_interp_reverts_when_character_is_dead() {
    let mut app = test_app();
    let (character, _) = spawn_character(&mut app, None);
    let item = spawn_misc(&mut app, "Coin", ItemState::Pickup);

    overlap(&mut app, character, item, true);
    trace(&mut app, character, Some(item));
    app.update();
    act(&mut app, character, ActionKind::Select);
    run_frames(&mut app, 2);
    assert_eq!(item_state(&app, item), ItemState::EquipInterping);

    app.world_mut().entity_mut(character).insert(Dead);
    run_frames(&mut app, INTERP_FRAMES);

    assert_eq!(item_state(&app, item), ItemState::Pickup);
    assert!(app.world().get::<ItemInterp>(item).is_none());
    assert!(outcomes(&app).is_empty());
    assert_eq!(app.world().get::<Inventory>(character).unwrap().item_count(), 0);
}

#[test]
fn test_exchange_equips_stored_weapon() {
    let mut app = test_app();
    let (character, smg) = spawn_character(&mut app, Some(WeaponType::SubmachineGun));
    let smg = smg.unwrap();
    let pistol = spawn_weapon(&mut app, WeaponType::Pistol, Vec3::ZERO);
    {
        let mut item = app.world_mut().get_mut::<PickupItem>(pistol).unwrap();
        item.state = ItemState::PickedUp;
        item.slot_index = Some(1);
    }
    app.world_mut().get_mut::<Inventory>(character).unwrap().slots[1] = Some(pistol);

    act(&mut app, character, ActionKind::EquipSlot(1));
    app.update();

    assert_eq!(*app.world().get::<CombatState>(character).unwrap(), CombatState::Equipping);
    assert_eq!(item_state(&app, smg), ItemState::PickedUp);
    assert_eq!(item_state(&app, pistol), ItemState::Equipped);
    assert_eq!(app.world().get::<Inventory>(character).unwrap().equipped, Some(1));
    assert!(montages(&app, character).contains(&(Montage::Equip, "Equip".to_string())));
    assert_eq!(
        collected::<InventorySlotEquipped>(&app),
        vec![InventorySlotEquipped {
            character,
            old: Some(0),
            new: 1,
        }]
    );

    // Equip montage можно перебить следующим exchange
    act(&mut app, character, ActionKind::EquipSlot(0));
    app.update();
    assert_eq!(app.world().get::<Inventory>(character).unwrap().equipped, Some(0));
    assert_eq!(item_state(&app, pistol), ItemState::PickedUp);

    // Пустой слот не экипируется
    act(&mut app, character, ActionKind::EquipSlot(4));
    app.update();
    assert_eq!(app.world().get::<Inventory>(character).unwrap().equipped, Some(0));

    notify(&mut app, character, AnimNotifyKind::FinishEquipping);
    app.update();
    assert_eq!(*app.world().get::<CombatState>(character).unwrap(), CombatState::Unoccupied);
}

#[test]
fn test_drop_throws_equipped_weapon() {
    let mut app = test_app();
    let (character, weapon) = spawn_character(&mut app, Some(WeaponType::AssaultRifle));
    let weapon = weapon.unwrap();

    act(&mut app, character, ActionKind::DropWeapon);
    app.update();

    let inventory = app.world().get::<Inventory>(character).unwrap();
    assert_eq!(inventory.equipped, None);
    assert_eq!(inventory.slots[0], None);
    assert_eq!(item_state(&app, weapon), ItemState::Falling);
    assert!(app.world().get::<Falling>(weapon).is_some());

    run_frames(&mut app, INTERP_FRAMES);
    assert_eq!(item_state(&app, weapon), ItemState::Pickup);
}
