//! Side effects для host'а (ECS → engine)
//!
//! Звуки, партиклы, монтажи — fire-and-forget. ECS не знает, есть ли ассет:
//! `None` ключ = эффект пропускается ещё здесь, host получает только валидные.

use bevy::prelude::*;

/// Анимационный монтаж персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Montage {
    HipFire,
    Reload,
    Equip,
    HitReact,
    Death,
}

/// Event: host должен проиграть эффект
#[derive(Event, Debug, Clone, PartialEq)]
pub enum Effect {
    /// 2D звук (pickup/equip/fire)
    PlaySound { sound: String },

    /// Монтаж на персонаже (секция внутри монтажа)
    PlayMontage {
        entity: Entity,
        montage: Montage,
        section: String,
    },

    /// Одноразовые партиклы в точке
    SpawnParticles { effect: String, location: Vec3 },

    /// Дымный след пули muzzle → end
    Beam { start: Vec3, end: Vec3 },
}

impl Effect {
    /// Звук из опционального ассета (нет ассета → нет эффекта)
    pub fn sound(sound: Option<&str>) -> Option<Self> {
        sound.map(|sound| Effect::PlaySound {
            sound: sound.to_string(),
        })
    }

    pub fn montage(entity: Entity, montage: Montage, section: impl Into<String>) -> Self {
        Effect::PlayMontage {
            entity,
            montage,
            section: section.into(),
        }
    }
}
