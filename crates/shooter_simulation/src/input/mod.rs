//! Player input (Host → ECS)
//!
//! Host биндит клавиши/кнопки и шлёт `PlayerAction`. Каждый домен читает
//! свои действия сам (fire/aim/reload → combat, select/equip/drop → inventory,
//! crouch/jump → character). Dying/Dead персонажи input игнорируют.

use bevy::prelude::*;

/// Действие игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ActionKind {
    FirePressed,
    FireReleased,
    AimPressed,
    AimReleased,
    Reload,
    /// Подобрать предмет под прицелом
    Select,
    /// Клавиши 1–5 → слоты 1–5
    EquipSlot(usize),
    /// F → слот 0
    EquipFirstSlot,
    DropWeapon,
    Crouch,
    Jump,
}

impl ActionKind {
    /// Слот inventory для equip действий
    pub fn equip_slot(self) -> Option<usize> {
        match self {
            ActionKind::EquipFirstSlot => Some(0),
            ActionKind::EquipSlot(slot) => Some(slot),
            _ => None,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAction {
    pub character: Entity,
    pub action: ActionKind,
}

impl PlayerAction {
    pub fn new(character: Entity, action: ActionKind) -> Self {
        Self { character, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equip_slot_mapping() {
        assert_eq!(ActionKind::EquipFirstSlot.equip_slot(), Some(0));
        assert_eq!(ActionKind::EquipSlot(3).equip_slot(), Some(3));
        assert_eq!(ActionKind::Reload.equip_slot(), None);
    }
}
