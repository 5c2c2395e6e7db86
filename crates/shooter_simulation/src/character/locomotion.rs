//! Crouch / jump
//!
//! ECS решает стойку и параметры движения; host применяет их к своему
//! character controller и прыгает по `JumpRequested`.

use bevy::prelude::*;

use crate::components::{Dead, Dying, MovementSample, ShooterCharacter};
use crate::config::ShooterConfig;
use crate::input::{ActionKind, PlayerAction};
use crate::log;
use crate::shared::interp_to;

/// Стойка и производные параметры движения
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Stance {
    pub crouching: bool,
    /// Текущая половина высоты капсулы (сглаживается к целевой)
    pub capsule_half_height: f32,
    pub max_walk_speed: f32,
    pub ground_friction: f32,
}

impl Default for Stance {
    fn default() -> Self {
        Self::standing(&ShooterConfig::default())
    }
}

impl Stance {
    pub fn standing(config: &ShooterConfig) -> Self {
        Self {
            crouching: false,
            capsule_half_height: config.standing_capsule_half_height,
            max_walk_speed: config.base_movement_speed,
            ground_friction: config.base_ground_friction,
        }
    }

    pub fn set_crouching(&mut self, crouching: bool, config: &ShooterConfig) {
        self.crouching = crouching;
        if crouching {
            self.max_walk_speed = config.crouch_movement_speed;
            self.ground_friction = config.crouching_ground_friction;
        } else {
            self.max_walk_speed = config.base_movement_speed;
            self.ground_friction = config.base_ground_friction;
        }
    }

    pub fn target_half_height(&self, config: &ShooterConfig) -> f32 {
        if self.crouching {
            config.crouching_capsule_half_height
        } else {
            config.standing_capsule_half_height
        }
    }
}

/// Host: выполнить прыжок
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpRequested {
    pub character: Entity,
}

pub fn handle_locomotion_input(
    mut actions: EventReader<PlayerAction>,
    mut characters: Query<(&mut Stance, &MovementSample), (With<ShooterCharacter>, Without<Dying>, Without<Dead>)>,
    config: Res<ShooterConfig>,
    mut jumps: EventWriter<JumpRequested>,
) {
    for action in actions.read() {
        let Ok((mut stance, movement)) = characters.get_mut(action.character) else {
            continue;
        };

        match action.action {
            ActionKind::Crouch => {
                if movement.airborne {
                    continue;
                }
                let crouching = !stance.crouching;
                stance.set_crouching(crouching, &config);
                log(&format!("{:?} crouching: {}", action.character, crouching));
            }
            ActionKind::Jump => {
                if stance.crouching {
                    // Прыжок из приседа = встать
                    stance.set_crouching(false, &config);
                } else {
                    jumps.write(JumpRequested {
                        character: action.character,
                    });
                }
            }
            _ => {}
        }
    }
}

pub fn interp_capsule_half_height(
    time: Res<Time>,
    config: Res<ShooterConfig>,
    mut characters: Query<&mut Stance>,
) {
    for mut stance in characters.iter_mut() {
        let target = stance.target_half_height(&config);
        if stance.capsule_half_height != target {
            stance.capsule_half_height = interp_to(
                stance.capsule_half_height,
                target,
                time.delta_secs(),
                config.capsule_interp_speed,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crouch_switches_movement_params() {
        let config = ShooterConfig::default();
        let mut stance = Stance::standing(&config);

        stance.set_crouching(true, &config);
        assert_eq!(stance.max_walk_speed, config.crouch_movement_speed);
        assert_eq!(stance.ground_friction, config.crouching_ground_friction);
        assert_eq!(stance.target_half_height(&config), config.crouching_capsule_half_height);

        stance.set_crouching(false, &config);
        assert_eq!(stance, Stance::standing(&config));
    }
}
