//! Rarity table → косметика предмета (цвета, звёзды, stencil, множитель урона)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::components::ItemRarity;
use crate::config::{parse_ron, TableError};
use crate::logger::log_warning;

/// Слотов под звёзды в UI (индекс 0 не используется)
pub const STAR_SLOTS: usize = 6;

/// Строка rarity таблицы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityRow {
    pub glow_color: [f32; 4],
    pub light_color: [f32; 4],
    pub dark_color: [f32; 4],
    pub number_of_stars: u8,
    pub custom_depth_stencil: i32,
    pub damage_multiplier: f32,
}

impl RarityRow {
    pub fn default_for(rarity: ItemRarity) -> Self {
        let (glow_color, light_color, dark_color, stencil, damage_multiplier) = match rarity {
            ItemRarity::Damaged => ([0.5, 0.5, 0.5, 1.0], [0.6, 0.6, 0.6, 1.0], [0.2, 0.2, 0.2, 1.0], 250, 0.8),
            ItemRarity::Common => ([0.9, 0.9, 0.9, 1.0], [1.0, 1.0, 1.0, 1.0], [0.3, 0.3, 0.3, 1.0], 251, 1.0),
            ItemRarity::Uncommon => ([0.2, 0.9, 0.2, 1.0], [0.4, 1.0, 0.4, 1.0], [0.05, 0.3, 0.05, 1.0], 252, 1.1),
            ItemRarity::Rare => ([0.2, 0.4, 1.0, 1.0], [0.4, 0.6, 1.0, 1.0], [0.05, 0.1, 0.4, 1.0], 253, 1.25),
            ItemRarity::Legendary => ([1.0, 0.6, 0.1, 1.0], [1.0, 0.8, 0.3, 1.0], [0.4, 0.2, 0.0, 1.0], 254, 1.5),
        };

        Self {
            glow_color,
            light_color,
            dark_color,
            number_of_stars: rarity.index() as u8 + 1,
            custom_depth_stencil: stencil,
            damage_multiplier,
        }
    }
}

/// Rarity таблица (resource)
#[derive(Resource, Debug, Clone)]
pub struct RarityTable {
    rows: HashMap<ItemRarity, RarityRow>,
}

impl Default for RarityTable {
    fn default() -> Self {
        let rows = ItemRarity::ALL
            .into_iter()
            .map(|rarity| (rarity, RarityRow::default_for(rarity)))
            .collect();
        Self { rows }
    }
}

impl RarityTable {
    /// RON формат: список `(ItemRarity, RarityRow)`
    pub fn from_ron(source: &str) -> Result<Self, TableError> {
        let entries: Vec<(ItemRarity, RarityRow)> = parse_ron("rarity table", source)?;

        let mut rows = HashMap::new();
        for (rarity, row) in entries {
            if rows.insert(rarity, row).is_some() {
                return Err(TableError::DuplicateRow {
                    table: "rarity table",
                    row: format!("{:?}", rarity),
                });
            }
        }

        Ok(Self { rows })
    }

    /// Косметика для spawn (отсутствующая строка → default)
    pub fn visuals(&self, rarity: ItemRarity) -> RarityVisuals {
        let row = match self.rows.get(&rarity) {
            Some(row) => row.clone(),
            None => {
                log_warning(&format!("⚠️ Rarity table has no row for {:?}, using defaults", rarity));
                RarityRow::default_for(rarity)
            }
        };

        RarityVisuals {
            glow_color: row.glow_color,
            light_color: row.light_color,
            dark_color: row.dark_color,
            number_of_stars: row.number_of_stars,
            custom_depth_stencil: row.custom_depth_stencil,
            damage_multiplier: row.damage_multiplier,
            active_stars: active_stars(rarity),
        }
    }
}

/// Косметика rarity, снятая с таблицы один раз при spawn
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RarityVisuals {
    pub glow_color: [f32; 4],
    pub light_color: [f32; 4],
    pub dark_color: [f32; 4],
    pub number_of_stars: u8,
    pub custom_depth_stencil: i32,
    pub damage_multiplier: f32,
    /// Горящие звёзды pickup widget'а (индекс 0 не используется)
    pub active_stars: [bool; STAR_SLOTS],
}

impl Default for RarityVisuals {
    fn default() -> Self {
        RarityTable::default().visuals(ItemRarity::default())
    }
}

/// Rarity с индексом N зажигает звёзды 1..=N+1
pub fn active_stars(rarity: ItemRarity) -> [bool; STAR_SLOTS] {
    let lit = rarity.index() + 1;
    std::array::from_fn(|star| star >= 1 && star <= lit)
}
