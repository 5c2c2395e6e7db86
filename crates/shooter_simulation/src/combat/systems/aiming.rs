//! Aiming: кнопка прицела, FOV zoom, скорости обзора, разброс прицела

use bevy::prelude::*;

use crate::combat::{Aiming, CombatState, CrosshairSpread, LookRates};
use crate::components::{Dead, Dying, FollowCamera, MovementSample, ShooterCharacter};
use crate::config::ShooterConfig;
use crate::input::{ActionKind, PlayerAction};
use crate::shared::{interp_to, map_range_clamped};

/// Скорости сглаживания факторов разброса (1/s)
const IN_AIR_RISE_SPEED: f32 = 2.25;
const IN_AIR_FALL_SPEED: f32 = 30.0;
const AIM_FACTOR_SPEED: f32 = 30.0;
const SHOOT_FACTOR_SPEED: f32 = 60.0;

pub fn handle_aim_input(
    mut actions: EventReader<PlayerAction>,
    mut characters: Query<(&mut Aiming, &CombatState), (With<ShooterCharacter>, Without<Dying>, Without<Dead>)>,
) {
    for action in actions.read() {
        let Ok((mut aiming, state)) = characters.get_mut(action.character) else {
            continue;
        };

        match action.action {
            ActionKind::AimPressed => {
                aiming.button_pressed = true;
                if state.can_aim() {
                    aiming.active = true;
                }
            }
            ActionKind::AimReleased => {
                aiming.button_pressed = false;
                aiming.stop();
            }
            _ => {}
        }
    }
}

pub fn update_camera_fov(
    time: Res<Time>,
    config: Res<ShooterConfig>,
    mut characters: Query<(&Aiming, &mut FollowCamera)>,
) {
    for (aiming, mut camera) in characters.iter_mut() {
        let target = if aiming.active {
            config.zoomed_fov
        } else {
            config.default_fov
        };

        if camera.fov != target {
            camera.fov = interp_to(camera.fov, target, time.delta_secs(), config.zoom_interp_speed);
        }
    }
}

pub fn update_look_rates(config: Res<ShooterConfig>, mut characters: Query<(&Aiming, &mut LookRates)>) {
    for (aiming, mut rates) in characters.iter_mut() {
        let target = if aiming.active {
            LookRates::aiming(&config)
        } else {
            LookRates::hip(&config)
        };

        if *rates != target {
            *rates = target;
        }
    }
}

pub fn update_crosshair_spread(
    time: Res<Time>,
    config: Res<ShooterConfig>,
    mut characters: Query<(&Aiming, &MovementSample, &mut CrosshairSpread)>,
) {
    let delta = time.delta_secs();

    for (aiming, movement, mut crosshair) in characters.iter_mut() {
        // Velocity factor намеренно без interp_to (остальные три сглаживаются)
        crosshair.velocity =
            map_range_clamped((0.0, config.crosshair_walk_speed), (0.0, 1.0), movement.horizontal_speed());

        crosshair.in_air = if movement.airborne {
            interp_to(crosshair.in_air, 1.0, delta, IN_AIR_RISE_SPEED)
        } else {
            interp_to(crosshair.in_air, 0.0, delta, IN_AIR_FALL_SPEED)
        }
        .clamp(0.0, 1.0);

        let aim_target = if aiming.active { 1.0 } else { 0.0 };
        crosshair.aiming = interp_to(crosshair.aiming, aim_target, delta, AIM_FACTOR_SPEED).clamp(0.0, 1.0);

        let shoot_target = if crosshair.is_shooting() { 1.0 } else { 0.0 };
        crosshair.shooting = interp_to(crosshair.shooting, shoot_target, delta, SHOOT_FACTOR_SPEED).clamp(0.0, 1.0);

        crosshair.spread = crosshair.spread_from_factors(config.crosshair_spread_max);
    }
}
