//! Прицеливание: aim флаги, скорости обзора, разброс прицела

use bevy::prelude::*;

use crate::config::ShooterConfig;

#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Aiming {
    /// Кнопка прицела зажата (re-aim после reload/equip/stun)
    pub button_pressed: bool,
    /// Сейчас целимся (zoom, aiming look rates)
    pub active: bool,
}

impl Aiming {
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Вернуться в прицел, если кнопка всё ещё зажата
    pub fn resume_if_held(&mut self) {
        if self.button_pressed {
            self.active = true;
        }
    }
}

/// Скорости обзора (host применяет к gamepad/mouse input)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LookRates {
    /// Градусы в секунду (gamepad)
    pub turn_rate: f32,
    pub look_up_rate: f32,
    /// Множители мыши
    pub mouse_turn_rate: f32,
    pub mouse_look_up_rate: f32,
}

impl Default for LookRates {
    fn default() -> Self {
        Self::hip(&ShooterConfig::default())
    }
}

impl LookRates {
    pub fn hip(config: &ShooterConfig) -> Self {
        Self {
            turn_rate: config.hip_turn_rate,
            look_up_rate: config.hip_look_up_rate,
            mouse_turn_rate: config.mouse_hip_turn_rate,
            mouse_look_up_rate: config.mouse_hip_look_up_rate,
        }
    }

    pub fn aiming(config: &ShooterConfig) -> Self {
        Self {
            turn_rate: config.aiming_turn_rate,
            look_up_rate: config.aiming_look_up_rate,
            mouse_turn_rate: config.mouse_aiming_turn_rate,
            mouse_look_up_rate: config.mouse_aiming_look_up_rate,
        }
    }
}

/// Разброс прицела
///
/// Каждый фактор ∈ [0, 1]; веса в `spread_from_factors`.
#[derive(Component, Debug, Clone, Default)]
pub struct CrosshairSpread {
    pub velocity: f32,
    pub in_air: f32,
    pub aiming: f32,
    pub shooting: f32,
    /// Итоговый множитель разброса (0..crosshair_spread_max)
    pub spread: f32,
    /// `Some` короткое время после выстрела
    pub shoot_timer: Option<Timer>,
}

/// Веса факторов разброса
pub const BASE_SPREAD: f32 = 0.5;
pub const VELOCITY_WEIGHT: f32 = 1.0;
pub const IN_AIR_WEIGHT: f32 = 2.25;
pub const AIMING_WEIGHT: f32 = 0.6;
pub const SHOOTING_WEIGHT: f32 = 0.3;

impl CrosshairSpread {
    pub fn spread_from_factors(&self, max_spread: f32) -> f32 {
        (BASE_SPREAD + VELOCITY_WEIGHT * self.velocity + IN_AIR_WEIGHT * self.in_air
            - AIMING_WEIGHT * self.aiming
            + SHOOTING_WEIGHT * self.shooting)
            .clamp(0.0, max_spread)
    }

    pub fn start_shooting(&mut self, duration: f32) {
        self.shoot_timer = Some(Timer::from_seconds(duration, TimerMode::Once));
    }

    pub fn is_shooting(&self) -> bool {
        self.shoot_timer.is_some()
    }
}
