//! Item interpolation engine (полёт подобранного предмета к камере)
//!
//! # Flow
//!
//! 1. `StartItemInterp` (Select / автосбор патронов) → `start_item_interp`:
//!    выбор точки, `ItemInterp` компонент, state = EquipInterping, pulse стоп
//! 2. `update_item_interp` каждый кадр: XZ сглаживается к точке, Y идёт по
//!    Z кривой, yaw держится относительно камеры
//! 3. Таймер истёк → `ItemArrived` (контроллер делает `get_pickup_item`)
//!
//! Персонаж пропал посреди полёта → предмет возвращается в Pickup.

use bevy::prelude::*;

use super::components::{GlowMaterial, ItemBehavior, ItemOutline, ItemState, PickupItem, PulseTimer};
use crate::components::{Dead, Dying, FollowCamera, InterpDestinations, Inventory, ShooterCharacter, SoundCooldowns};
use crate::config::ShooterConfig;
use crate::effects::Effect;
use crate::inventory::{unhighlight_slot, HighlightInventoryIcon};
use crate::shared::{interp_to, yaw_of, ShooterCurves};
use crate::{log, log_error, log_warning};

/// Предмет летит к персонажу (есть только в EquipInterping)
#[derive(Component, Debug, Clone)]
pub struct ItemInterp {
    /// Контроллер (weak: может исчезнуть посреди полёта)
    pub character: Entity,
    /// Индекс в `InterpDestinations` (None → летим в origin)
    pub anchor: Option<usize>,
    pub start_location: Vec3,
    /// Yaw предмета относительно камеры в момент старта
    pub initial_yaw_offset: f32,
    pub timer: Timer,
}

impl ItemInterp {
    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed_secs()
    }
}

/// Запрос: начать интерполяцию предмета к персонажу
#[derive(Event, Debug, Clone, Copy)]
pub struct StartItemInterp {
    pub item: Entity,
    pub character: Entity,
    /// Играть pickup звук даже под cooldown'ом
    pub force_play_sound: bool,
}

/// Интерполяция закончилась, контроллер должен забрать предмет
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemArrived {
    pub item: Entity,
    pub character: Entity,
}

pub fn start_item_interp(
    mut commands: Commands,
    mut requests: EventReader<StartItemInterp>,
    mut items: Query<(&mut PickupItem, &Transform, &mut PulseTimer, &mut ItemOutline), Without<ItemInterp>>,
    mut characters: Query<
        (&FollowCamera, &mut InterpDestinations, &mut SoundCooldowns),
        (With<ShooterCharacter>, Without<Dying>, Without<Dead>),
    >,
    config: Res<ShooterConfig>,
    mut effects: EventWriter<Effect>,
) {
    for request in requests.read() {
        let Ok((mut item, transform, mut pulse, mut outline)) = items.get_mut(request.item) else {
            log_error(&format!("StartItemInterp: {:?} is not an idle pickup item", request.item));
            continue;
        };

        // Два запроса в одном кадре: второй видит уже EquipInterping
        if item.state != ItemState::Pickup {
            log(&format!("StartItemInterp: {} is {:?}, skipping", item.name, item.state));
            continue;
        }

        let Ok((camera, mut destinations, mut cooldowns)) = characters.get_mut(request.character) else {
            log_error(&format!("StartItemInterp: character {:?} not found or dead", request.character));
            continue;
        };

        let anchor = destinations.select(item.kind.anchor_pool());
        if let Some(index) = anchor {
            destinations.acquire(index);
        }

        if cooldowns.try_play_pickup_sound(request.force_play_sound, config.pickup_sound_cooldown) {
            if let Some(effect) = Effect::sound(item.pickup_sound.as_deref()) {
                effects.write(effect);
            }
        }

        item.state = ItemState::EquipInterping;
        item.prompt_visible = false;
        pulse.cancel();
        // Outline залочен выключенным на время полёта
        outline.enabled = false;
        outline.locked = true;

        commands.entity(request.item).insert(ItemInterp {
            character: request.character,
            anchor,
            start_location: transform.translation,
            initial_yaw_offset: yaw_of(transform.rotation) - camera.yaw(),
            timer: Timer::from_seconds(config.item_interp_duration, TimerMode::Once),
        });

        log(&format!(
            "🎯 {} → character {:?} (anchor {:?})",
            item.name, request.character, anchor
        ));
    }
}

pub fn update_item_interp(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ShooterConfig>,
    curves: Res<ShooterCurves>,
    mut items: Query<(
        Entity,
        &mut ItemInterp,
        &mut Transform,
        &mut PickupItem,
        &mut ItemOutline,
        &mut GlowMaterial,
        &mut PulseTimer,
    )>,
    // Умерший персонаж = потерянный: item возвращается в Pickup
    mut characters: Query<(&FollowCamera, &mut InterpDestinations, &mut Inventory), (With<ShooterCharacter>, Without<Dead>)>,
    mut arrived: EventWriter<ItemArrived>,
    mut highlights: EventWriter<HighlightInventoryIcon>,
) {
    let delta = time.delta_secs();

    for (entity, mut interp, mut transform, mut item, mut outline, mut glow, mut pulse) in items.iter_mut() {
        let Ok((camera, mut destinations, mut inventory)) = characters.get_mut(interp.character) else {
            log_warning(&format!(
                "⚠️ {} lost its character {:?} mid-interpolation, back to Pickup",
                item.name, interp.character
            ));
            item.state = ItemState::Pickup;
            outline.locked = false;
            outline.enabled = false;
            transform.scale = Vec3::ONE;
            pulse.start(config.pulse_duration);
            commands.entity(entity).remove::<ItemInterp>();
            continue;
        };

        interp.timer.tick(time.delta());
        let elapsed = interp.elapsed().min(config.item_interp_duration);

        let target = interp
            .anchor
            .and_then(|index| destinations.offset(index))
            .map(|offset| camera.to_world(offset))
            .unwrap_or(Vec3::ZERO);

        let height = curves.item_z.sample(elapsed);
        let start = interp.start_location;
        transform.translation = Vec3::new(
            interp_to(transform.translation.x, target.x, delta, config.item_interp_speed),
            start.y + height * (target.y - start.y),
            interp_to(transform.translation.z, target.z, delta, config.item_interp_speed),
        );
        transform.rotation = Quat::from_rotation_y(camera.yaw() + interp.initial_yaw_offset);

        if let Some(scale_curve) = &curves.item_scale {
            transform.scale = Vec3::splat(scale_curve.sample(elapsed));
        }

        if !interp.timer.finished() {
            continue;
        }

        // === Finish ===
        if let Some(index) = interp.anchor {
            destinations.release(index);
        }
        outline.locked = false;
        outline.enabled = false;
        glow.disable_glow();
        transform.scale = Vec3::ONE;
        unhighlight_slot(interp.character, &mut inventory, &mut highlights);

        arrived.write(ItemArrived {
            item: entity,
            character: interp.character,
        });
        commands.entity(entity).remove::<ItemInterp>();

        log(&format!("✅ {} arrived at character {:?}", item.name, interp.character));
    }
}
