//! Tests for aiming systems.

#[cfg(test)]
mod tests {
    use super::super::aiming::{handle_aim_input, update_camera_fov, update_crosshair_spread, update_look_rates};
    use crate::combat::{Aiming, CombatState, CrosshairSpread, LookRates};
    use crate::components::{FollowCamera, MovementSample, ShooterCharacter};
    use crate::config::ShooterConfig;
    use crate::input::{ActionKind, PlayerAction};
    use bevy::prelude::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn aim_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(ShooterConfig::default())
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_event::<PlayerAction>()
            .add_systems(
                Update,
                (handle_aim_input, update_camera_fov, update_look_rates, update_crosshair_spread).chain(),
            );
        app
    }

    fn press(app: &mut App, character: Entity, action: ActionKind) {
        app.world_mut().send_event(PlayerAction::new(character, action));
    }

    #[test]
    fn test_aim_zooms_and_slows_look() {
        let mut app = aim_app();
        let character = app.world_mut().spawn(ShooterCharacter).id();

        press(&mut app, character, ActionKind::AimPressed);
        for _ in 0..10 {
            app.update();
        }

        let world = app.world();
        let config = world.resource::<ShooterConfig>();
        assert_eq!(world.get::<FollowCamera>(character).unwrap().fov, config.zoomed_fov);
        assert_eq!(*world.get::<LookRates>(character).unwrap(), LookRates::aiming(config));
    }

    #[test]
    fn test_aim_blocked_while_reloading_but_remembered() {
        let mut app = aim_app();
        let character = app.world_mut().spawn((ShooterCharacter, CombatState::Reloading)).id();

        press(&mut app, character, ActionKind::AimPressed);
        app.update();

        let aiming = app.world().get::<Aiming>(character).unwrap();
        assert!(aiming.button_pressed);
        assert!(!aiming.active);
    }

    #[test]
    fn test_release_restores_hip_rates() {
        let mut app = aim_app();
        let character = app.world_mut().spawn(ShooterCharacter).id();

        press(&mut app, character, ActionKind::AimPressed);
        app.update();
        press(&mut app, character, ActionKind::AimReleased);
        app.update();

        let world = app.world();
        assert!(!world.get::<Aiming>(character).unwrap().active);
        assert_eq!(
            *world.get::<LookRates>(character).unwrap(),
            LookRates::hip(world.resource::<ShooterConfig>())
        );
    }

    #[test]
    fn test_airborne_running_widens_spread() {
        let mut app = aim_app();
        let character = app
            .world_mut()
            .spawn((
                ShooterCharacter,
                MovementSample {
                    velocity: Vec3::new(6.0, 0.0, 0.0),
                    airborne: true,
                },
            ))
            .id();

        for _ in 0..30 {
            app.update();
        }

        let crosshair = app.world().get::<CrosshairSpread>(character).unwrap();
        assert_eq!(crosshair.velocity, 1.0);
        assert!(crosshair.in_air > 0.9 && crosshair.in_air <= 1.0);
        assert!(crosshair.spread > 2.5 && crosshair.spread <= 3.0);
    }

    #[test]
    fn test_velocity_factor_follows_speed_without_smoothing() {
        let mut app = aim_app();
        let character = app
            .world_mut()
            .spawn((
                ShooterCharacter,
                MovementSample {
                    velocity: Vec3::new(0.0, 0.0, 3.0),
                    airborne: false,
                },
            ))
            .id();

        app.update();
        app.update();

        // 3 m/s при walk speed 6 → 0.5 сразу, без interp
        let crosshair = app.world().get::<CrosshairSpread>(character).unwrap();
        assert!((crosshair.velocity - 0.5).abs() < 1e-5);
    }
}
