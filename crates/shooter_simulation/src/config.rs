//! Gameplay config + data-table parsing
//!
//! `ShooterConfig` — все тайминги и константы персонажа в одном resource.
//! Default = значения, под которые настроены кривые (interp 0.7s, pulse 5s).
//! Host может подменить через RON (`ShooterConfig::from_ron`).

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Ошибка загрузки таблиц/конфига
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to parse {table} RON: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("{table} has duplicate row {row}")]
    DuplicateRow { table: &'static str, row: String },
}

/// Общий RON парсер для таблиц (rarity, weapons, config)
pub(crate) fn parse_ron<T: DeserializeOwned>(table: &'static str, source: &str) -> Result<T, TableError> {
    ron::from_str(source).map_err(|source| TableError::Parse { table, source })
}

/// Константы геймплея (timers, aiming, crouch, стартовые патроны)
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    // === Items ===
    /// Длительность интерполяции предмета к камере (= длина Z кривой)
    pub item_interp_duration: f32,
    /// Скорость горизонтального сглаживания при интерполяции (1/s)
    pub item_interp_speed: f32,
    /// Период pulse таймера (= длина pulse кривой)
    pub pulse_duration: f32,
    /// Базовые значения material каналов (умножаются на кривую)
    pub glow_amount: f32,
    pub fresnel_exponent: f32,
    pub fresnel_reflect_fraction: f32,

    // === Sounds ===
    pub pickup_sound_cooldown: f32,
    pub equip_sound_cooldown: f32,

    // === Weapons ===
    /// Сколько оружие падает до возврата в Pickup
    pub throw_weapon_duration: f32,
    /// Величина импульса при броске (N·s)
    pub throw_impulse: f32,
    /// Slide pistol'а (секунды / max displacement / max recoil degrees)
    pub slide_duration: f32,
    pub max_slide_displacement: f32,
    pub max_recoil_rotation: f32,

    // === Shooting ===
    /// Сколько держится shooting factor прицела после выстрела
    pub crosshair_shoot_duration: f32,
    /// Трасса пули продлевается за точку прицела
    pub trace_extension: f32,
    /// Партиклы попадания в статику мира (host может прислать свои для поверхности)
    pub impact_particles: Option<String>,

    // === Aiming ===
    pub default_fov: f32,
    pub zoomed_fov: f32,
    pub zoom_interp_speed: f32,
    pub hip_turn_rate: f32,
    pub hip_look_up_rate: f32,
    pub aiming_turn_rate: f32,
    pub aiming_look_up_rate: f32,
    pub mouse_hip_turn_rate: f32,
    pub mouse_hip_look_up_rate: f32,
    pub mouse_aiming_turn_rate: f32,
    pub mouse_aiming_look_up_rate: f32,
    /// Максимальный разброс прицела
    pub crosshair_spread_max: f32,
    /// Скорость, при которой velocity factor = 1
    pub crosshair_walk_speed: f32,

    // === Crouch ===
    pub standing_capsule_half_height: f32,
    pub crouching_capsule_half_height: f32,
    pub base_movement_speed: f32,
    pub crouch_movement_speed: f32,
    pub base_ground_friction: f32,
    pub crouching_ground_friction: f32,
    pub capsule_interp_speed: f32,

    // === Ammo ===
    pub starting_9mm_ammo: u32,
    pub starting_ar_ammo: u32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            item_interp_duration: 0.7,
            item_interp_speed: 30.0,
            pulse_duration: 5.0,
            glow_amount: 150.0,
            fresnel_exponent: 3.0,
            fresnel_reflect_fraction: 4.0,

            pickup_sound_cooldown: 0.2,
            equip_sound_cooldown: 0.2,

            throw_weapon_duration: 0.7,
            throw_impulse: 20.0,
            slide_duration: 0.2,
            max_slide_displacement: 4.0,
            max_recoil_rotation: 20.0,

            crosshair_shoot_duration: 0.05,
            trace_extension: 1.25,
            impact_particles: Some("impact".to_string()),

            default_fov: 90.0,
            zoomed_fov: 25.0,
            zoom_interp_speed: 20.0,
            hip_turn_rate: 45.0,
            hip_look_up_rate: 45.0,
            aiming_turn_rate: 20.0,
            aiming_look_up_rate: 20.0,
            mouse_hip_turn_rate: 1.0,
            mouse_hip_look_up_rate: 1.0,
            mouse_aiming_turn_rate: 0.6,
            mouse_aiming_look_up_rate: 0.6,
            crosshair_spread_max: 3.0,
            crosshair_walk_speed: 6.0,

            standing_capsule_half_height: 0.88,
            crouching_capsule_half_height: 0.44,
            base_movement_speed: 6.5,
            crouch_movement_speed: 3.0,
            base_ground_friction: 2.0,
            crouching_ground_friction: 100.0,
            capsule_interp_speed: 20.0,

            starting_9mm_ammo: 85,
            starting_ar_ammo: 120,
        }
    }
}

impl ShooterConfig {
    /// Загрузить из RON (отсутствующие поля = Default)
    pub fn from_ron(source: &str) -> Result<Self, TableError> {
        parse_ron("shooter config", source)
    }
}
