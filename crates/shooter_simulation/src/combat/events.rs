//! Combat events
//!
//! ECS → Host: `BulletTraceRequest` (host делает raycast), `CharacterDied`.
//! Host → ECS: `BulletTraceResult`, `AnimNotify` (montage notifies), `DamageEvent`.
//! ECS internal: `ReloadRequest` (auto-reload после пустого магазина / подбора патронов).

use bevy::prelude::*;

/// Host: raycast пули от дула
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BulletTraceRequest {
    pub shooter: Entity,
    pub weapon: Entity,
    pub origin: Vec3,
    /// Нормализованное направление (дуло → точка прицела)
    pub direction: Vec3,
    pub max_distance: f32,
}

/// Попадание пули
#[derive(Debug, Clone, PartialEq)]
pub struct BulletHit {
    pub location: Vec3,
    /// Задетый актор (None = статика мира)
    pub actor: Option<Entity>,
    pub headshot: bool,
    /// Партиклы поверхности от host'а (None = дефолтные impact партиклы)
    pub surface_particles: Option<String>,
}

/// Host: результат `BulletTraceRequest`
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BulletTraceResult {
    pub shooter: Entity,
    pub weapon: Entity,
    /// Конец трассы, если ничего не задели
    pub end: Vec3,
    pub hit: Option<BulletHit>,
}

/// Урон по персонажу
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub target: Entity,
    pub instigator: Option<Entity>,
    pub amount: f32,
    pub headshot: bool,
}

/// Персонаж умер (шлётся ровно один раз)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterDied {
    pub entity: Entity,
    pub instigator: Option<Entity>,
}

/// Montage notify от host'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimNotifyKind {
    GrabClip,
    ReleaseClip,
    FinishReloading,
    FinishEquipping,
    EndStun,
    FinishDeath,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimNotify {
    pub character: Entity,
    pub notify: AnimNotifyKind,
}

/// Попытка перезарядки (те же проверки, что у кнопки Reload)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadRequest {
    pub character: Entity,
}
