//! Fire systems
//!
//! Кнопка огня → `FireTrigger` (Input), выстрел и fire interval (Timers),
//! результат трассы пули → beam/impact/урон (Notifications).

use bevy::prelude::*;

use crate::combat::{
    BulletTraceRequest, BulletTraceResult, CombatState, CombatTrigger, CrosshairSpread, DamageEvent,
    FireTrigger, ReloadRequest,
};
use crate::components::{AimPoint, Dead, Dying, Inventory, ShooterCharacter, Vitals};
use crate::config::ShooterConfig;
use crate::effects::{Effect, Montage};
use crate::input::{ActionKind, PlayerAction};
use crate::item::RarityVisuals;
use crate::weapon::{Weapon, WeaponSlide, WeaponType};
use crate::{log, log_error};

/// Секция hip fire монтажа
const HIP_FIRE_SECTION: &str = "StartFire";

pub fn handle_fire_input(
    mut actions: EventReader<PlayerAction>,
    mut characters: Query<&mut FireTrigger, (With<ShooterCharacter>, Without<Dying>, Without<Dead>)>,
) {
    for action in actions.read() {
        let Ok(mut trigger) = characters.get_mut(action.character) else {
            continue;
        };

        match action.action {
            ActionKind::FirePressed => trigger.press(),
            ActionKind::FireReleased => trigger.release(),
            _ => {}
        }
    }
}

/// Fire interval + выстрелы (по нажатию и автоматический refire)
pub fn update_trigger(
    time: Res<Time>,
    config: Res<ShooterConfig>,
    mut characters: Query<
        (
            Entity,
            &mut FireTrigger,
            &mut CombatState,
            &Inventory,
            &AimPoint,
            &mut CrosshairSpread,
        ),
        (With<ShooterCharacter>, Without<Dying>, Without<Dead>),
    >,
    mut weapons: Query<(&mut Weapon, &mut WeaponSlide)>,
    mut effects: EventWriter<Effect>,
    mut traces: EventWriter<BulletTraceRequest>,
    mut reloads: EventWriter<ReloadRequest>,
) {
    for (character, mut trigger, mut state, inventory, aim, mut crosshair) in characters.iter_mut() {
        let shoot_finished = crosshair
            .shoot_timer
            .as_mut()
            .is_some_and(|timer| timer.tick(time.delta()).finished());
        if shoot_finished {
            crosshair.shoot_timer = None;
        }

        let mut wants_fire = trigger.take_request();
        let equipped = inventory.equipped_weapon();

        let interval_elapsed = trigger
            .fire_timer
            .as_mut()
            .is_some_and(|timer| timer.tick(time.delta()).finished());
        if interval_elapsed {
            trigger.fire_timer = None;

            // Stun посреди интервала: переход не существует, refire нет
            if state.apply(CombatTrigger::FireTimerElapsed) {
                if let Some((weapon, _)) = equipped.and_then(|entity| weapons.get(entity).ok()) {
                    if !weapon.has_ammo() {
                        reloads.write(ReloadRequest { character });
                    } else if trigger.fire_button_pressed && weapon.automatic {
                        wants_fire = true;
                    }
                }
            }
        }

        if !wants_fire {
            continue;
        }

        let Some(weapon_entity) = equipped else {
            continue;
        };
        let Ok((mut weapon, mut slide)) = weapons.get_mut(weapon_entity) else {
            log_error(&format!("Equipped {:?} is not a weapon", weapon_entity));
            continue;
        };

        fire_weapon(
            character,
            weapon_entity,
            &mut weapon,
            &mut slide,
            &mut trigger,
            &mut state,
            &mut crosshair,
            aim,
            &config,
            &mut effects,
            &mut traces,
        );
    }
}

/// Один выстрел (Unoccupied + патрон в магазине, иначе ничего)
pub fn fire_weapon(
    character: Entity,
    weapon_entity: Entity,
    weapon: &mut Weapon,
    slide: &mut WeaponSlide,
    trigger: &mut FireTrigger,
    state: &mut CombatState,
    crosshair: &mut CrosshairSpread,
    aim: &AimPoint,
    config: &ShooterConfig,
    effects: &mut EventWriter<Effect>,
    traces: &mut EventWriter<BulletTraceRequest>,
) -> bool {
    if !state.can_fire() || !weapon.has_ammo() {
        return false;
    }

    if let Some(effect) = Effect::sound(weapon.fire_sound.as_deref()) {
        effects.write(effect);
    }
    if let Some(flash) = &weapon.muzzle_flash {
        effects.write(Effect::SpawnParticles {
            effect: flash.clone(),
            location: aim.muzzle,
        });
    }

    let to_target = aim.crosshair_target - aim.muzzle;
    traces.write(BulletTraceRequest {
        shooter: character,
        weapon: weapon_entity,
        origin: aim.muzzle,
        direction: to_target.normalize_or_zero(),
        max_distance: to_target.length() * config.trace_extension,
    });

    effects.write(Effect::montage(character, Montage::HipFire, HIP_FIRE_SECTION));

    weapon.decrement_ammo();
    crosshair.start_shooting(config.crosshair_shoot_duration);

    *state = CombatState::FireTimerInProgress;
    trigger.start_fire_timer(weapon.fire_interval());

    if weapon.weapon_type == WeaponType::Pistol {
        slide.start(config.slide_duration);
    }

    log(&format!(
        "💥 {:?} fired {:?} ({}/{} left)",
        character, weapon.weapon_type, weapon.ammo, weapon.magazine_capacity
    ));
    true
}

/// Результат трассы: beam, impact партиклы, урон по актору
pub fn handle_bullet_trace_results(
    mut results: EventReader<BulletTraceResult>,
    shooters: Query<&AimPoint>,
    weapons: Query<(&Weapon, Option<&RarityVisuals>)>,
    targets: Query<(), With<Vitals>>,
    config: Res<ShooterConfig>,
    mut effects: EventWriter<Effect>,
    mut damage: EventWriter<DamageEvent>,
) {
    for result in results.read() {
        let Ok(aim) = shooters.get(result.shooter) else {
            log_error(&format!("Bullet trace for unknown shooter {:?}", result.shooter));
            continue;
        };

        let end = result.hit.as_ref().map_or(result.end, |hit| hit.location);
        effects.write(Effect::Beam { start: aim.muzzle, end });

        let Some(hit) = &result.hit else {
            continue;
        };

        let victim = hit
            .actor
            .filter(|actor| *actor != result.shooter && targets.contains(*actor));

        let Some(target) = victim else {
            let particles = hit.surface_particles.clone().or_else(|| config.impact_particles.clone());
            if let Some(effect) = particles {
                effects.write(Effect::SpawnParticles {
                    effect,
                    location: hit.location,
                });
            }
            continue;
        };

        let Ok((weapon, rarity)) = weapons.get(result.weapon) else {
            log_error(&format!("Bullet trace from unknown weapon {:?}", result.weapon));
            continue;
        };

        let base = if hit.headshot {
            weapon.headshot_damage
        } else {
            weapon.base_damage
        };
        let multiplier = rarity.map_or(1.0, |rarity| rarity.damage_multiplier);

        damage.write(DamageEvent {
            target,
            instigator: Some(result.shooter),
            amount: base * multiplier,
            headshot: hit.headshot,
        });
    }
}
