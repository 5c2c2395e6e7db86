//! Подсветка иконки свободного слота под focused предмет

use bevy::prelude::*;

use super::events::HighlightInventoryIcon;
use crate::components::Inventory;

/// Подсвечивает первый свободный слот (нет свободного → ничего)
pub fn highlight_empty_slot(
    character: Entity,
    inventory: &mut Inventory,
    highlights: &mut EventWriter<HighlightInventoryIcon>,
) {
    let Some(slot) = inventory.first_empty_slot() else {
        return;
    };

    highlights.write(HighlightInventoryIcon {
        character,
        slot,
        start_animation: true,
    });
    inventory.highlighted = Some(slot);
}

pub fn unhighlight_slot(
    character: Entity,
    inventory: &mut Inventory,
    highlights: &mut EventWriter<HighlightInventoryIcon>,
) {
    let Some(slot) = inventory.highlighted.take() else {
        return;
    };

    highlights.write(HighlightInventoryIcon {
        character,
        slot,
        start_animation: false,
    });
}
