//! Shooter Simulation Core
//!
//! Headless ECS-симуляция third-person shooter'а на Bevy 0.16.
//!
//! HOST / CORE split:
//! - ECS = gameplay rules (подбор предметов, inventory, combat state machine, таймеры)
//! - Host = рендер, анимации, физика, raycast'ы, звук, UI
//!
//! Host → ECS: `PlayerAction`, overlap/trace/anim notify/bullet trace события,
//! `FollowCamera` / `AimPoint` / `MovementSample` компоненты каждый кадр.
//! ECS → Host: `Effect`, `BulletTraceRequest`, UI события, derived компоненты.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod character;
pub mod combat;
pub mod components;
pub mod config;
pub mod effects;
pub mod input;
pub mod inventory;
pub mod item;
pub mod logger;
pub mod shared;
pub mod weapon;

// Re-export базовых типов для удобства
pub use character::{shooter_character_bundle, spawn_shooter_character, CharacterPlugin, JumpRequested, Stance};
pub use combat::{
    AnimNotify, AnimNotifyKind, BulletHit, BulletTraceRequest, BulletTraceResult, CharacterDied, CombatPlugin,
    CombatState, CombatTrigger, DamageEvent,
};
pub use components::*;
pub use config::{ShooterConfig, TableError};
pub use effects::{Effect, Montage};
pub use input::{ActionKind, PlayerAction};
pub use inventory::{InventoryPlugin, ItemOverlapChanged, ItemPickedUp, ItemTraceResult, PickupOutcome};
pub use item::{ItemKind, ItemPlugin, ItemRarity, ItemState, PickupItem, RarityTable};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use weapon::{AmmoType, Weapon, WeaponPlugin, WeaponTable, WeaponType};

/// Порядок систем внутри кадра (Update)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShooterSet {
    /// Host notifications (overlaps, traces, anim notifies, bullet results, damage)
    Notifications,
    /// `PlayerAction`
    Input,
    /// Fire/cooldown/slide/falling таймеры
    Timers,
    /// Интерполяция предметов, подбор, pulse/glow
    Items,
    /// FOV, look rates, crosshair, capsule
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Host мог подложить свои config/таблицы до plugin'а
        if !app.world().contains_resource::<ShooterConfig>() {
            app.init_resource::<ShooterConfig>();
        }
        if !app.world().contains_resource::<WeaponTable>() {
            app.init_resource::<WeaponTable>();
        }
        if !app.world().contains_resource::<RarityTable>() {
            app.init_resource::<RarityTable>();
        }
        if !app.world().contains_resource::<shared::ShooterCurves>() {
            app.init_resource::<shared::ShooterCurves>();
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_event::<PlayerAction>()
            .add_event::<Effect>()
            .configure_sets(
                Update,
                (
                    ShooterSet::Notifications,
                    ShooterSet::Input,
                    ShooterSet::Timers,
                    ShooterSet::Items,
                    ShooterSet::Presentation,
                )
                    .chain(),
            )
            .add_plugins((ItemPlugin, WeaponPlugin, InventoryPlugin, CombatPlugin, CharacterPlugin));
    }
}

/// Детерминистичный RNG resource (seeded): stun rolls, разброс броска оружия
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Загружает таблицы/config из RON; ошибка → warning и дефолты
pub fn load_data_tables(app: &mut App, config: Option<&str>, weapons: Option<&str>, rarities: Option<&str>) {
    if let Some(source) = config {
        match ShooterConfig::from_ron(source) {
            Ok(config) => {
                app.insert_resource(config);
            }
            Err(err) => log_warning(&format!("⚠️ {err}, using default config")),
        }
    }
    if let Some(source) = weapons {
        match WeaponTable::from_ron(source) {
            Ok(table) => {
                app.insert_resource(table);
            }
            Err(err) => log_warning(&format!("⚠️ {err}, using default weapon table")),
        }
    }
    if let Some(source) = rarities {
        match RarityTable::from_ron(source) {
            Ok(table) => {
                app.insert_resource(table);
            }
            Err(err) => log_warning(&format!("⚠️ {err}, using default rarity table")),
        }
    }
}
