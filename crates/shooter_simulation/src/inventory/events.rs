//! Inventory events
//!
//! Host → ECS: overlap begin/end, результат трассы прицела по предметам.
//! ECS → Host (UI): смена экипированного слота, подсветка иконки, итог подбора.

use bevy::prelude::*;

/// Host: pickup-сфера предмета начала/закончила перекрывать персонажа
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemOverlapChanged {
    pub item: Entity,
    pub character: Entity,
    pub began: bool,
}

/// Host: что под перекрестием в этом кадре (шлётся пока `should_trace_for_items`)
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemTraceResult {
    pub character: Entity,
    pub item: Option<Entity>,
}

/// UI: экипированный слот сменился (`old = None` — раньше ничего не было)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventorySlotEquipped {
    pub character: Entity,
    pub old: Option<usize>,
    pub new: usize,
}

/// UI: подсветить/погасить иконку слота
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightInventoryIcon {
    pub character: Entity,
    pub slot: usize,
    pub start_animation: bool,
}

/// Итог `get_pickup_item`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// Положен в свободный слот
    Stored { slot: usize },
    /// Положен в слот и сразу экипирован (рук было пусто)
    Equipped { slot: usize },
    /// Патроны ушли в резерв, entity удалён
    AmmoAdded { total: u32 },
    /// Заменил экипированное оружие (старое выброшено)
    Swapped { slot: usize, dropped: Entity },
    /// Места нет: предмет скрыт, слот не выделен
    InventoryFull,
}

/// UI/тесты: предмет долетел и обработан контроллером
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPickedUp {
    pub character: Entity,
    pub item: Entity,
    pub outcome: PickupOutcome,
}
