//! Pickup item components
//!
//! Один `PickupItem` на любой подбираемый предмет. Вид предмета — tagged
//! `ItemKind`, поведение по виду — через `ItemBehavior` (не через наследование).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::AnchorPool;
use crate::weapon::AmmoType;

/// Редкость предмета (порядок = ценность)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum ItemRarity {
    Damaged,
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl ItemRarity {
    pub const ALL: [ItemRarity; 5] = [
        ItemRarity::Damaged,
        ItemRarity::Common,
        ItemRarity::Uncommon,
        ItemRarity::Rare,
        ItemRarity::Legendary,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Жизненный цикл предмета
///
/// Pickup → EquipInterping → (PickedUp | Equipped) → Falling → Pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ItemState {
    /// Лежит в мире, пульсирует, можно подобрать
    #[default]
    Pickup,
    /// Брошен, падает под физикой
    Falling,
    /// Летит к камере
    EquipInterping,
    /// В руках
    Equipped,
    /// В inventory (невидим)
    PickedUp,
}

/// Вид предмета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ItemKind {
    Ammo { ammo_type: AmmoType },
    Weapon,
    Misc,
}

/// Конфигурация collision/visibility/physics, выведенная из state
///
/// Host применяет её к своим коллайдерам и мешу; руками не выставляется.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct ItemProperties {
    pub visible: bool,
    /// Сфера overlap'а для pickup prompt
    pub overlap_area_enabled: bool,
    /// Collision box блокирует трассу прицела (focus)
    pub blocks_item_trace: bool,
    /// Малая сфера автосбора (только патроны)
    pub collect_sphere_enabled: bool,
    /// Меш симулирует физику и сталкивается со статикой мира
    pub physics_enabled: bool,
    pub gravity_enabled: bool,
}

/// Capability interface предмета (dispatch по виду, не по глубине иерархии)
pub trait ItemBehavior {
    /// Пул точек интерполяции
    fn anchor_pool(&self) -> AnchorPool;

    /// Hook перехода состояния: конфигурация collision/visibility/physics
    fn properties(&self, state: ItemState) -> ItemProperties;

    /// Подбирается сразу при overlap (без кнопки Select)
    fn collects_on_overlap(&self) -> bool;
}

impl ItemBehavior for ItemKind {
    fn anchor_pool(&self) -> AnchorPool {
        match self {
            ItemKind::Weapon => AnchorPool::Weapon,
            ItemKind::Ammo { .. } | ItemKind::Misc => AnchorPool::Shared,
        }
    }

    fn properties(&self, state: ItemState) -> ItemProperties {
        let collects = self.collects_on_overlap();
        match state {
            ItemState::Pickup => ItemProperties {
                visible: true,
                overlap_area_enabled: true,
                blocks_item_trace: true,
                collect_sphere_enabled: collects,
                physics_enabled: false,
                gravity_enabled: false,
            },
            ItemState::Falling => ItemProperties {
                visible: true,
                physics_enabled: true,
                gravity_enabled: true,
                ..default()
            },
            ItemState::EquipInterping | ItemState::Equipped => ItemProperties {
                visible: true,
                ..default()
            },
            ItemState::PickedUp => ItemProperties::default(),
        }
    }

    fn collects_on_overlap(&self) -> bool {
        matches!(self, ItemKind::Ammo { .. })
    }
}

/// Подбираемый предмет
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, ItemProperties, GlowMaterial, ItemOutline, PulseTimer)]
pub struct PickupItem {
    pub name: String,
    pub kind: ItemKind,
    pub rarity: ItemRarity,
    pub state: ItemState,
    /// Количество (патроны в пачке; для прочего 1)
    pub count: u32,
    /// Слот inventory (None пока не подобран)
    pub slot_index: Option<usize>,
    /// UI флаг: inventory полон на момент focus/подбора
    pub inventory_full: bool,
    /// Виден ли pickup widget
    pub prompt_visible: bool,
    pub pickup_sound: Option<String>,
    pub equip_sound: Option<String>,
}

impl PickupItem {
    pub fn new(name: impl Into<String>, kind: ItemKind, rarity: ItemRarity) -> Self {
        Self {
            name: name.into(),
            kind,
            rarity,
            state: ItemState::Pickup,
            count: 1,
            slot_index: None,
            inventory_full: false,
            prompt_visible: false,
            pickup_sound: None,
            equip_sound: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }

    pub fn with_sounds(mut self, pickup: Option<String>, equip: Option<String>) -> Self {
        self.pickup_sound = pickup;
        self.equip_sound = equip;
        self
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon)
    }

    pub fn properties(&self) -> ItemProperties {
        self.kind.properties(self.state)
    }
}

/// Параметры dynamic material instance (glow + fresnel)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GlowMaterial {
    pub glow_amount: f32,
    pub fresnel_exponent: f32,
    pub fresnel_reflect_fraction: f32,
    /// 0 = glow включён, 1 = выключен
    pub glow_blend_alpha: f32,
    /// Цвет свечения (из rarity)
    pub glow_color: [f32; 4],
}

impl Default for GlowMaterial {
    fn default() -> Self {
        Self {
            glow_amount: 0.0,
            fresnel_exponent: 0.0,
            fresnel_reflect_fraction: 0.0,
            glow_blend_alpha: 0.0,
            glow_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl GlowMaterial {
    pub fn enable_glow(&mut self) {
        self.glow_blend_alpha = 0.0;
    }

    pub fn disable_glow(&mut self) {
        self.glow_blend_alpha = 1.0;
    }

    pub fn is_glowing(&self) -> bool {
        self.glow_blend_alpha < 1.0
    }

    pub fn set_channels(&mut self, channels: Vec3) {
        self.glow_amount = channels.x;
        self.fresnel_exponent = channels.y;
        self.fresnel_reflect_fraction = channels.z;
    }
}

/// Custom-depth outline (подсветка предмета под прицелом)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ItemOutline {
    pub enabled: bool,
    /// Во время интерполяции focus не может переключать outline
    pub locked: bool,
}

impl ItemOutline {
    /// Переключение из focus логики (игнорируется пока locked)
    pub fn request(&mut self, enabled: bool) {
        if !self.locked {
            self.enabled = enabled;
        }
    }
}

/// Repeating таймер pulse кривой (`None` = пульс остановлен)
#[derive(Component, Debug, Clone, Default)]
pub struct PulseTimer(pub Option<Timer>);

impl PulseTimer {
    pub fn start(&mut self, duration: f32) {
        self.0 = Some(Timer::from_seconds(duration, TimerMode::Repeating));
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }

    pub fn is_running(&self) -> bool {
        self.0.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapons_use_weapon_anchor() {
        assert_eq!(ItemKind::Weapon.anchor_pool(), AnchorPool::Weapon);
        assert_eq!(
            ItemKind::Ammo { ammo_type: AmmoType::NineMm }.anchor_pool(),
            AnchorPool::Shared
        );
        assert_eq!(ItemKind::Misc.anchor_pool(), AnchorPool::Shared);
    }

    #[test]
    fn test_only_ammo_has_collect_sphere_in_pickup() {
        let ammo = ItemKind::Ammo { ammo_type: AmmoType::AssaultRifle };

        assert!(ammo.properties(ItemState::Pickup).collect_sphere_enabled);
        assert!(!ammo.properties(ItemState::EquipInterping).collect_sphere_enabled);
        assert!(!ItemKind::Weapon.properties(ItemState::Pickup).collect_sphere_enabled);
    }

    #[test]
    fn test_state_properties() {
        let falling = ItemKind::Weapon.properties(ItemState::Falling);
        assert!(falling.physics_enabled && falling.gravity_enabled && falling.visible);
        assert!(!falling.overlap_area_enabled);

        let picked_up = ItemKind::Misc.properties(ItemState::PickedUp);
        assert!(!picked_up.visible);
        assert!(!picked_up.blocks_item_trace);
    }

    #[test]
    fn test_locked_outline_ignores_focus() {
        let mut outline = ItemOutline { enabled: true, locked: true };
        outline.request(false);
        assert!(outline.enabled);

        outline.locked = false;
        outline.request(false);
        assert!(!outline.enabled);
    }
}
