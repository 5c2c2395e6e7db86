//! Weapon data table (RON)
//!
//! Строка таблицы = статы одного `WeaponType`. Отсутствующая строка
//! деградирует к hardcoded дефолту (с warning), чтобы spawn не падал.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::components::{AmmoType, WeaponType};
use crate::config::{parse_ron, TableError};
use crate::logger::log_warning;

/// Строка weapon таблицы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRow {
    pub name: String,
    pub ammo_type: AmmoType,
    /// Патронов в магазине при spawn
    pub starting_ammo: u32,
    pub magazine_capacity: u32,
    /// Выстрелов в секунду
    pub fire_rate: f32,
    pub automatic: bool,
    pub base_damage: f32,
    pub headshot_damage: f32,
    pub reload_montage_section: String,
    pub clip_bone_name: String,
    #[serde(default)]
    pub fire_sound: Option<String>,
    #[serde(default)]
    pub muzzle_flash: Option<String>,
    #[serde(default)]
    pub pickup_sound: Option<String>,
    #[serde(default)]
    pub equip_sound: Option<String>,
}

impl WeaponRow {
    pub fn default_for(weapon_type: WeaponType) -> Self {
        match weapon_type {
            WeaponType::SubmachineGun => Self {
                name: "Submachine Gun".to_string(),
                ammo_type: AmmoType::NineMm,
                starting_ammo: 30,
                magazine_capacity: 30,
                fire_rate: 10.0,
                automatic: true,
                base_damage: 20.0,
                headshot_damage: 40.0,
                reload_montage_section: "Reload SMG".to_string(),
                clip_bone_name: "smg_clip".to_string(),
                fire_sound: Some("smg_fire".to_string()),
                muzzle_flash: Some("muzzle_flash".to_string()),
                pickup_sound: Some("weapon_pickup".to_string()),
                equip_sound: Some("weapon_equip".to_string()),
            },
            WeaponType::AssaultRifle => Self {
                name: "Assault Rifle".to_string(),
                ammo_type: AmmoType::AssaultRifle,
                starting_ammo: 30,
                magazine_capacity: 30,
                fire_rate: 8.0,
                automatic: true,
                base_damage: 25.0,
                headshot_damage: 55.0,
                reload_montage_section: "Reload AR".to_string(),
                clip_bone_name: "ar_clip".to_string(),
                fire_sound: Some("ar_fire".to_string()),
                muzzle_flash: Some("muzzle_flash".to_string()),
                pickup_sound: Some("weapon_pickup".to_string()),
                equip_sound: Some("weapon_equip".to_string()),
            },
            WeaponType::Pistol => Self {
                name: "Pistol".to_string(),
                ammo_type: AmmoType::NineMm,
                starting_ammo: 12,
                magazine_capacity: 12,
                fire_rate: 4.0,
                automatic: false,
                base_damage: 35.0,
                headshot_damage: 75.0,
                reload_montage_section: "Reload Pistol".to_string(),
                clip_bone_name: "pistol_clip".to_string(),
                fire_sound: Some("pistol_fire".to_string()),
                muzzle_flash: Some("muzzle_flash".to_string()),
                pickup_sound: Some("weapon_pickup".to_string()),
                equip_sound: Some("weapon_equip".to_string()),
            },
        }
    }
}

/// Weapon таблица (resource)
#[derive(Resource, Debug, Clone)]
pub struct WeaponTable {
    rows: HashMap<WeaponType, WeaponRow>,
}

impl Default for WeaponTable {
    fn default() -> Self {
        let rows = [WeaponType::SubmachineGun, WeaponType::AssaultRifle, WeaponType::Pistol]
            .into_iter()
            .map(|weapon_type| (weapon_type, WeaponRow::default_for(weapon_type)))
            .collect();
        Self { rows }
    }
}

impl WeaponTable {
    /// RON формат: список `(WeaponType, WeaponRow)`
    pub fn from_ron(source: &str) -> Result<Self, TableError> {
        let entries: Vec<(WeaponType, WeaponRow)> = parse_ron("weapon table", source)?;

        let mut rows = HashMap::new();
        for (weapon_type, row) in entries {
            if rows.insert(weapon_type, row).is_some() {
                return Err(TableError::DuplicateRow {
                    table: "weapon table",
                    row: format!("{:?}", weapon_type),
                });
            }
        }

        Ok(Self { rows })
    }

    pub fn row(&self, weapon_type: WeaponType) -> WeaponRow {
        match self.rows.get(&weapon_type) {
            Some(row) => row.clone(),
            None => {
                log_warning(&format!("⚠️ Weapon table has no row for {:?}, using defaults", weapon_type));
                WeaponRow::default_for(weapon_type)
            }
        }
    }
}
