//! Inventory контроллера: слоты, резерв патронов, точки интерполяции
//!
//! Контроллер (персонаж) владеет слотами по `Entity`; предметы ссылаются
//! на контроллер только через `ItemInterp::character`.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::ShooterConfig;
use crate::weapon::AmmoType;

/// Количество слотов inventory (слот 0 = стартовое оружие, F)
pub const INVENTORY_CAPACITY: usize = 6;

/// Слоты предметов + индекс экипированного оружия
///
/// Экипированное оружие остаётся в своём слоте (`equipped` указывает на него),
/// поэтому один entity никогда не лежит в двух местах.
#[derive(Component, Debug, Clone, Default)]
pub struct Inventory {
    pub slots: [Option<Entity>; INVENTORY_CAPACITY],
    pub equipped: Option<usize>,
    /// Подсвеченная иконка (свободный слот под focused предмет)
    pub highlighted: Option<usize>,
}

impl Inventory {
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.first_empty_slot().is_none()
    }

    pub fn item_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn get(&self, slot: usize) -> Option<Entity> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn slot_of(&self, item: Entity) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(item))
    }

    pub fn equipped_weapon(&self) -> Option<Entity> {
        self.equipped.and_then(|slot| self.get(slot))
    }
}

/// Резерв патронов по типу (≥ 0)
#[derive(Component, Debug, Clone, Default)]
pub struct AmmoReserves {
    reserves: HashMap<AmmoType, u32>,
}

impl AmmoReserves {
    /// Стартовый резерв (9mm / assault rifle из config)
    pub fn from_config(config: &ShooterConfig) -> Self {
        let mut reserves = Self::default();
        reserves.set(AmmoType::NineMm, config.starting_9mm_ammo);
        reserves.set(AmmoType::AssaultRifle, config.starting_ar_ammo);
        reserves
    }

    pub fn get(&self, ammo_type: AmmoType) -> u32 {
        self.reserves.get(&ammo_type).copied().unwrap_or(0)
    }

    pub fn set(&mut self, ammo_type: AmmoType, amount: u32) {
        self.reserves.insert(ammo_type, amount);
    }

    pub fn add(&mut self, ammo_type: AmmoType, amount: u32) -> u32 {
        let total = self.get(ammo_type).saturating_add(amount);
        self.reserves.insert(ammo_type, total);
        total
    }

    /// Забирает до `amount`, возвращает сколько реально забрано
    pub fn take(&mut self, ammo_type: AmmoType, amount: u32) -> u32 {
        let available = self.get(ammo_type);
        let taken = available.min(amount);
        self.reserves.insert(ammo_type, available - taken);
        taken
    }
}

/// Какой пул точек интерполяции использует предмет
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnchorPool {
    /// Точка 0 (перед камерой, для оружия)
    Weapon,
    /// Точки 1.. (общие для патронов и прочего, балансируются по занятости)
    Shared,
}

/// Точка перед камерой, куда летит подобранный предмет
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct InterpAnchor {
    /// Camera-local offset (камера смотрит вдоль -Z)
    pub offset: Vec3,
    /// Сколько предметов сейчас летят в эту точку
    pub item_count: u32,
}

impl InterpAnchor {
    pub fn new(offset: Vec3) -> Self {
        Self {
            offset,
            item_count: 0,
        }
    }
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct InterpDestinations {
    pub anchors: Vec<InterpAnchor>,
}

impl Default for InterpDestinations {
    fn default() -> Self {
        Self {
            anchors: vec![
                InterpAnchor::new(Vec3::new(0.0, -0.1, -1.2)),
                InterpAnchor::new(Vec3::new(-0.6, 0.4, -2.0)),
                InterpAnchor::new(Vec3::new(0.6, 0.4, -2.0)),
                InterpAnchor::new(Vec3::new(-0.6, 0.0, -2.0)),
                InterpAnchor::new(Vec3::new(0.6, 0.0, -2.0)),
                InterpAnchor::new(Vec3::new(-0.6, -0.4, -2.0)),
                InterpAnchor::new(Vec3::new(0.6, -0.4, -2.0)),
            ],
        }
    }
}

impl InterpDestinations {
    /// Выбор точки: оружие → 0; остальные → наименее занятая из 1.. (tie → меньший индекс)
    pub fn select(&self, pool: AnchorPool) -> Option<usize> {
        match pool {
            AnchorPool::Weapon => (!self.anchors.is_empty()).then_some(0),
            AnchorPool::Shared => self
                .anchors
                .iter()
                .enumerate()
                .skip(1)
                .min_by_key(|(index, anchor)| (anchor.item_count, *index))
                .map(|(index, _)| index),
        }
    }

    pub fn acquire(&mut self, index: usize) {
        if let Some(anchor) = self.anchors.get_mut(index) {
            anchor.item_count += 1;
        }
    }

    pub fn release(&mut self, index: usize) {
        if let Some(anchor) = self.anchors.get_mut(index) {
            anchor.item_count = anchor.item_count.saturating_sub(1);
        }
    }

    pub fn offset(&self, index: usize) -> Option<Vec3> {
        self.anchors.get(index).map(|anchor| anchor.offset)
    }
}

/// Сколько pickup-сфер сейчас перекрывают персонажа + focus трассы
///
/// `count` — plain signed счётчик: begin/end overlap всегда парные, clamp
/// спрятал бы рассинхрон (он логируется в конце кадра).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct OverlappedItems {
    pub count: i32,
    /// Предмет под прицелом в этом кадре
    pub focused: Option<Entity>,
    /// Предмет под прицелом в прошлом кадре (для снятия prompt/outline)
    pub last_focused: Option<Entity>,
}

impl OverlappedItems {
    pub fn increment(&mut self, delta: i32) {
        self.count += delta;
    }

    pub fn should_trace_for_items(&self) -> bool {
        self.count > 0
    }
}

/// Cooldown звуков pickup/equip (не спамить при подборе пачки предметов)
///
/// `Some(timer)` = звук недавно играл, повтор подавлен до окончания таймера.
#[derive(Component, Debug, Clone, Default)]
pub struct SoundCooldowns {
    pub pickup: Option<Timer>,
    pub equip: Option<Timer>,
}

impl SoundCooldowns {
    pub fn should_play_pickup_sound(&self) -> bool {
        self.pickup.is_none()
    }

    pub fn should_play_equip_sound(&self) -> bool {
        self.equip.is_none()
    }

    pub fn start_pickup_sound_timer(&mut self, duration: f32) {
        self.pickup = Some(Timer::from_seconds(duration, TimerMode::Once));
    }

    pub fn start_equip_sound_timer(&mut self, duration: f32) {
        self.equip = Some(Timer::from_seconds(duration, TimerMode::Once));
    }

    /// Pickup звук под cooldown политикой (forced играет всегда и таймер не трогает)
    pub fn try_play_pickup_sound(&mut self, force: bool, cooldown: f32) -> bool {
        if force {
            return true;
        }
        if !self.should_play_pickup_sound() {
            return false;
        }
        self.start_pickup_sound_timer(cooldown);
        true
    }

    pub fn try_play_equip_sound(&mut self, force: bool, cooldown: f32) -> bool {
        if force {
            return true;
        }
        if !self.should_play_equip_sound() {
            return false;
        }
        self.start_equip_sound_timer(cooldown);
        true
    }

    /// Тикает оба таймера, истёкшие сбрасываются в `None`
    pub fn tick(&mut self, delta: std::time::Duration) {
        for slot in [&mut self.pickup, &mut self.equip] {
            if let Some(timer) = slot.as_mut() {
                if timer.tick(delta).finished() {
                    *slot = None;
                }
            }
        }
    }
}
