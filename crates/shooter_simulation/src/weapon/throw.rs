//! Бросок оружия (drop/swap) + slide пистолета

use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;
use rand::Rng;

use super::components::WeaponSlide;
use crate::config::ShooterConfig;
use crate::item::{GlowMaterial, ItemState, PickupItem, PulseTimer};
use crate::shared::{yaw_of, ShooterCurves};
use crate::{log, DeterministicRng};

/// Наклон импульса вокруг forward (градусы)
const THROW_TILT_DEGREES: f32 = -20.0;
/// Максимальный случайный разворот импульса вокруг up (градусы)
const THROW_MAX_YAW_DEGREES: f32 = 30.0;

/// Оружие падает после броска (физику ведёт host через rapier)
#[derive(Component, Debug, Clone)]
pub struct Falling {
    pub timer: Timer,
}

/// Направление броска: right, наклонённый вокруг forward, + случайный yaw
pub fn throw_direction(transform: &Transform, random_yaw_degrees: f32) -> Vec3 {
    let forward = transform.forward();
    let right = transform.right();

    let tilted = Quat::from_axis_angle(*forward, THROW_TILT_DEGREES.to_radians()) * *right;
    Quat::from_rotation_y(random_yaw_degrees.to_radians()) * tilted
}

/// Выбросить оружие: state = Falling, слот забыт, импульс в конус
pub fn throw_weapon(
    commands: &mut Commands,
    entity: Entity,
    item: &mut PickupItem,
    transform: &mut Transform,
    rng: &mut DeterministicRng,
    config: &ShooterConfig,
) {
    transform.rotation = Quat::from_rotation_y(yaw_of(transform.rotation));

    let random_yaw = rng.rng.gen_range(0.0..THROW_MAX_YAW_DEGREES);
    let impulse = throw_direction(transform, random_yaw) * config.throw_impulse;

    item.state = ItemState::Falling;
    item.slot_index = None;
    item.prompt_visible = false;

    commands.entity(entity).insert((
        Falling {
            timer: Timer::from_seconds(config.throw_weapon_duration, TimerMode::Once),
        },
        ExternalImpulse {
            impulse,
            torque_impulse: Vec3::ZERO,
        },
    ));

    log(&format!("🔫 {} thrown (impulse {:?})", item.name, impulse));
}

/// Падение: держим оружие вертикально, по таймеру → Pickup + pulse
pub fn tick_falling_weapons(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ShooterConfig>,
    mut weapons: Query<(
        Entity,
        &mut PickupItem,
        &mut Falling,
        &mut Transform,
        &mut PulseTimer,
        &mut GlowMaterial,
    )>,
) {
    for (entity, mut item, mut falling, mut transform, mut pulse, mut glow) in weapons.iter_mut() {
        if item.state != ItemState::Falling {
            commands.entity(entity).remove::<(Falling, ExternalImpulse)>();
            continue;
        }

        transform.rotation = Quat::from_rotation_y(yaw_of(transform.rotation));

        if !falling.timer.tick(time.delta()).finished() {
            continue;
        }

        item.state = ItemState::Pickup;
        glow.enable_glow();
        pulse.start(config.pulse_duration);
        commands.entity(entity).remove::<(Falling, ExternalImpulse)>();

        log(&format!("{} settled, back to Pickup", item.name));
    }
}

pub fn tick_weapon_slide(
    time: Res<Time>,
    config: Res<ShooterConfig>,
    curves: Res<ShooterCurves>,
    mut slides: Query<&mut WeaponSlide>,
) {
    for mut slide in slides.iter_mut() {
        let Some(timer) = slide.timer.as_mut() else {
            continue;
        };

        let finished = timer.tick(time.delta()).finished();
        let value = if finished {
            0.0
        } else {
            curves.slide.sample(timer.elapsed_secs())
        };

        slide.displacement = value * config.max_slide_displacement;
        slide.recoil_rotation = value * config.max_recoil_rotation;
        if finished {
            slide.timer = None;
        }
    }
}
