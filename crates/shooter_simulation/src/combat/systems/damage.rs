//! Damage, stun и смерть
//!
//! Урон приходит `DamageEvent` (от пули или от host'а: враги, окружение).
//! Смерть ровно один раз: `Dying` + `CharacterDied`, дальше урон игнорируется;
//! FinishDeath notify переводит в `Dead`.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::{Aiming, AnimNotify, AnimNotifyKind, CharacterDied, CombatState, DamageEvent};
use crate::components::{Dead, Dying, Vitals};
use crate::effects::{Effect, Montage};
use crate::{log, log_error, DeterministicRng};

const HIT_REACT_SECTION: &str = "HitReactFront";
const DEATH_SECTION: &str = "Death";

pub fn apply_damage(
    mut commands: Commands,
    mut events: EventReader<DamageEvent>,
    mut targets: Query<(
        &mut Vitals,
        Option<&mut CombatState>,
        Option<&mut Aiming>,
        Has<Dying>,
        Has<Dead>,
    )>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: EventWriter<Effect>,
    mut died: EventWriter<CharacterDied>,
) {
    for event in events.read() {
        let Ok((mut vitals, state, aiming, dying, dead)) = targets.get_mut(event.target) else {
            log_error(&format!("Damage to entity {:?} without Vitals", event.target));
            continue;
        };

        // Insert Dying отложен до sync point: второе событие в кадре видит health = 0
        if dying || dead || !vitals.is_alive() {
            continue;
        }

        let amount = if event.headshot {
            event.amount * vitals.headshot_multiplier
        } else {
            event.amount
        };
        let health = vitals.take_damage(amount);

        log(&format!(
            "🩸 {:?} took {:.1} damage{} → {:.1}/{:.1}",
            event.target,
            amount,
            if event.headshot { " (headshot)" } else { "" },
            health,
            vitals.max_health
        ));

        if health <= 0.0 {
            commands.entity(event.target).insert(Dying);
            effects.write(Effect::montage(event.target, Montage::Death, DEATH_SECTION));
            died.write(CharacterDied {
                entity: event.target,
                instigator: event.instigator,
            });
            log(&format!("💀 {:?} died", event.target));
            continue;
        }

        // Stun только у актора со state machine (манекены и пр. просто теряют здоровье)
        let Some(mut state) = state else {
            continue;
        };
        if rng.rng.gen::<f32>() < vitals.chance_to_be_stunned {
            *state = CombatState::Stunned;
            // Прицел возвращается на EndStun, если кнопка всё ещё зажата
            if let Some(mut aiming) = aiming {
                aiming.stop();
            }
            effects.write(Effect::montage(event.target, Montage::HitReact, HIT_REACT_SECTION));
            log(&format!("💫 {:?} stunned", event.target));
        }
    }
}

/// Death montage доиграл → Dead
pub fn handle_finish_death(
    mut commands: Commands,
    mut notifies: EventReader<AnimNotify>,
    dying: Query<(), With<Dying>>,
) {
    for event in notifies.read() {
        if event.notify != AnimNotifyKind::FinishDeath || !dying.contains(event.character) {
            continue;
        }

        commands.entity(event.character).remove::<Dying>().insert(Dead);
        log(&format!("{:?} removed from active simulation", event.character));
    }
}
