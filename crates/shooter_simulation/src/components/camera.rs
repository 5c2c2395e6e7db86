//! Host-written состояние: камера, дуло/прицел, движение
//!
//! Host обновляет эти компоненты каждый кадр (до `ShooterSet::Notifications`).
//! ECS только читает transform'ы; `FollowCamera::fov` — единственное поле,
//! которое пишет ECS (aim zoom), host применяет его к реальной камере.

use bevy::prelude::*;

/// Камера за плечом персонажа
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct FollowCamera {
    /// World transform камеры (смотрит вдоль local -Z)
    pub transform: Transform,
    /// Текущий FOV (градусы), интерполируется к zoomed/default
    pub fov: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            fov: 90.0,
        }
    }
}

impl FollowCamera {
    pub fn yaw(&self) -> f32 {
        crate::shared::yaw_of(self.transform.rotation)
    }

    /// Camera-local offset → world
    pub fn to_world(&self, offset: Vec3) -> Vec3 {
        self.transform.transform_point(offset)
    }
}

/// Откуда летит пуля и куда смотрит прицел
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AimPoint {
    /// World location сокета дула экипированного оружия
    pub muzzle: Vec3,
    /// Точка под перекрестием (результат трассы host'а из камеры)
    pub crosshair_target: Vec3,
}

/// Сэмпл движения персонажа (для crosshair spread и crouch)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementSample {
    pub velocity: Vec3,
    pub airborne: bool,
}

impl MovementSample {
    /// Горизонтальная скорость (XZ)
    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}
