//! ECS Components персонажа-стрелка
//!
//! Организация по доменам:
//! - actor: маркер персонажа, здоровье и статус смерти (ShooterCharacter, Vitals, Dying, Dead)
//! - camera: host-written состояние камеры и прицела (FollowCamera, AimPoint, MovementSample)
//! - inventory: слоты, патроны, точки интерполяции, overlap счётчик, sound cooldowns

pub mod actor;
pub mod camera;
pub mod inventory;

// Re-exports для удобного импорта
pub use actor::*;
pub use camera::*;
pub use inventory::*;
