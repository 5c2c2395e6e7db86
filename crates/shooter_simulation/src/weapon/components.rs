//! Weapon components: Weapon, WeaponSlide, WeaponType, AmmoType

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::table::WeaponRow;

/// Тип патронов (ключ резерва в `AmmoReserves`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AmmoType {
    NineMm,
    AssaultRifle,
}

/// Тип оружия (ключ `WeaponTable`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum WeaponType {
    SubmachineGun,
    AssaultRifle,
    Pistol,
}

/// Огнестрельное оружие
///
/// Инвариант: 0 ≤ ammo ≤ magazine_capacity
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub weapon_type: WeaponType,
    pub ammo_type: AmmoType,
    /// Патроны в магазине
    pub ammo: u32,
    pub magazine_capacity: u32,
    /// Выстрелов в секунду
    pub fire_rate: f32,
    /// Стреляет пока зажата кнопка
    pub automatic: bool,
    pub base_damage: f32,
    pub headshot_damage: f32,
    /// Секция reload монтажа для этого оружия
    pub reload_montage_section: String,
    /// Кость магазина (host цепляет её к руке между GrabClip/ReleaseClip)
    pub clip_bone_name: String,
    pub fire_sound: Option<String>,
    pub muzzle_flash: Option<String>,
    /// Магазин сейчас в руке (GrabClip → ReleaseClip)
    pub moving_clip: bool,
}

impl Weapon {
    pub fn from_row(weapon_type: WeaponType, row: &WeaponRow) -> Self {
        Self {
            weapon_type,
            ammo_type: row.ammo_type,
            ammo: row.starting_ammo.min(row.magazine_capacity),
            magazine_capacity: row.magazine_capacity,
            fire_rate: row.fire_rate,
            automatic: row.automatic,
            base_damage: row.base_damage,
            headshot_damage: row.headshot_damage,
            reload_montage_section: row.reload_montage_section.clone(),
            clip_bone_name: row.clip_bone_name.clone(),
            fire_sound: row.fire_sound.clone(),
            muzzle_flash: row.muzzle_flash.clone(),
            moving_clip: false,
        }
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    pub fn decrement_ammo(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }

    /// Сколько не хватает до полного магазина
    pub fn missing_ammo(&self) -> u32 {
        self.magazine_capacity.saturating_sub(self.ammo)
    }

    pub fn is_clip_full(&self) -> bool {
        self.ammo >= self.magazine_capacity
    }

    /// Добавляет патроны в магазин (больше вместимости — баг вызывающего)
    pub fn reload_ammo(&mut self, amount: u32) {
        debug_assert!(
            self.ammo + amount <= self.magazine_capacity,
            "reload over magazine capacity: {} + {} > {}",
            self.ammo,
            amount,
            self.magazine_capacity
        );
        self.ammo = (self.ammo + amount).min(self.magazine_capacity);
    }

    /// Интервал между выстрелами (секунды)
    pub fn fire_interval(&self) -> f32 {
        1.0 / self.fire_rate.max(f32::EPSILON)
    }
}

/// Slide + recoil пистолета после выстрела (чистая косметика)
#[derive(Component, Debug, Clone, Default)]
pub struct WeaponSlide {
    /// `Some` пока slide в движении
    pub timer: Option<Timer>,
    /// Смещение slide вдоль ствола (0..max_slide_displacement)
    pub displacement: f32,
    /// Подброс ствола (градусы, 0..max_recoil_rotation)
    pub recoil_rotation: f32,
}

impl WeaponSlide {
    pub fn start(&mut self, duration: f32) {
        self.timer = Some(Timer::from_seconds(duration, TimerMode::Once));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smg() -> Weapon {
        Weapon::from_row(WeaponType::SubmachineGun, &WeaponRow::default_for(WeaponType::SubmachineGun))
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut weapon = smg();
        weapon.ammo = 1;
        weapon.decrement_ammo();
        weapon.decrement_ammo();

        assert_eq!(weapon.ammo, 0);
        assert!(!weapon.has_ammo());
    }

    #[test]
    fn test_reload_fills_missing() {
        let mut weapon = smg();
        weapon.ammo = 5;
        let missing = weapon.missing_ammo();
        weapon.reload_ammo(missing);

        assert!(weapon.is_clip_full());
        assert_eq!(weapon.missing_ammo(), 0);
    }

    #[test]
    #[should_panic(expected = "reload over magazine capacity")]
    #[cfg(debug_assertions)]
    fn test_reload_over_capacity_asserts() {
        let mut weapon = smg();
        weapon.ammo = weapon.magazine_capacity;
        weapon.reload_ammo(1);
    }

    #[test]
    fn test_fire_interval_from_rate() {
        let mut weapon = smg();
        weapon.fire_rate = 10.0;
        assert!((weapon.fire_interval() - 0.1).abs() < 1e-6);
    }
}
