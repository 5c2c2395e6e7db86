//! Общий headless harness для интеграционных тестов
//!
//! Фиксированный шаг 100ms (`ManualDuration`), все исходящие события
//! собираются в `Collected<E>` в конце кадра.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use shooter_simulation::inventory::{HighlightInventoryIcon, InventorySlotEquipped};
use shooter_simulation::*;
use std::time::Duration;

pub const FRAME_SECS: f32 = 0.1;

/// Все события типа `E`, прочитанные за время теста
#[derive(Resource)]
pub struct Collected<E: Event>(pub Vec<E>);

impl<E: Event> Default for Collected<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn collect<E: Event + Clone>(mut reader: EventReader<E>, mut collected: ResMut<Collected<E>>) {
    collected.0.extend(reader.read().cloned());
}

fn collect_events<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Collected<E>>().add_systems(Last, collect::<E>);
}

/// Headless app + SimulationPlugin, первый (нулевой) кадр уже прогнан
pub fn test_app() -> App {
    test_app_with_seed(42)
}

pub fn test_app_with_seed(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(FRAME_SECS)))
        .add_plugins(SimulationPlugin);

    collect_events::<Effect>(&mut app);
    collect_events::<ItemPickedUp>(&mut app);
    collect_events::<BulletTraceRequest>(&mut app);
    collect_events::<CharacterDied>(&mut app);
    collect_events::<InventorySlotEquipped>(&mut app);
    collect_events::<HighlightInventoryIcon>(&mut app);

    app.update();
    app
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn act(app: &mut App, character: Entity, action: ActionKind) {
    app.world_mut().send_event(PlayerAction::new(character, action));
}

pub fn notify(app: &mut App, character: Entity, notify: AnimNotifyKind) {
    app.world_mut().send_event(AnimNotify { character, notify });
}

pub fn collected<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Collected<E>>().0.clone()
}

pub fn clear_collected<E: Event>(app: &mut App) {
    app.world_mut().resource_mut::<Collected<E>>().0.clear();
}

pub fn spawn_character(app: &mut App, weapon: Option<WeaponType>) -> (Entity, Option<Entity>) {
    spawn_shooter_character(app.world_mut(), Transform::default(), weapon)
}

pub fn montages(app: &App, character: Entity) -> Vec<(Montage, String)> {
    collected::<Effect>(app)
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::PlayMontage {
                entity,
                montage,
                section,
            } if entity == character => Some((montage, section)),
            _ => None,
        })
        .collect()
}
