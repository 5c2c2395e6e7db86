//! Базовые компоненты персонажа: ShooterCharacter, Vitals, статус смерти

use bevy::prelude::*;

use crate::character::Stance;
use crate::combat::{Aiming, CombatState, CrosshairSpread, FireTrigger, LookRates};
use crate::components::{
    AimPoint, AmmoReserves, FollowCamera, InterpDestinations, Inventory, MovementSample,
    OverlappedItems, SoundCooldowns,
};

/// Персонаж, который подбирает предметы и стреляет (игрок)
///
/// Всё состояние контроллера висит на этом же entity через Required Components.
/// `AmmoReserves` по умолчанию пустой — стартовые патроны кладёт
/// `character::shooter_character_bundle`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    Vitals,
    Inventory,
    AmmoReserves,
    InterpDestinations,
    OverlappedItems,
    SoundCooldowns,
    CombatState,
    FireTrigger,
    Aiming,
    CrosshairSpread,
    LookRates,
    Stance,
    FollowCamera,
    AimPoint,
    MovementSample
)]
pub struct ShooterCharacter;

/// Здоровье + параметры реакции на урон
///
/// Инвариант: 0 ≤ health ≤ max_health
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    /// Вероятность stun при получении урона (0..1)
    pub chance_to_be_stunned: f32,
    /// Множитель урона в голову (применяется получателем)
    pub headshot_multiplier: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            chance_to_be_stunned: 0.25,
            headshot_multiplier: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Снимает здоровье (clamp к 0), возвращает новое значение
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
        self.health
    }

    /// Добавляет здоровье (clamp к max_health). Мёртвых не лечит
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() {
            return self.health;
        }
        self.health = (self.health + amount.max(0.0)).clamp(0.0, self.max_health);
        self.health
    }
}

/// Здоровье кончилось, играет death montage (input игнорируется)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dying;

/// Death montage доиграл — персонаж выключен из активной симуляции
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;
