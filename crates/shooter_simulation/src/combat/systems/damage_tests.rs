//! Tests for damage systems.

#[cfg(test)]
mod tests {
    use super::super::damage::{apply_damage, handle_finish_death};
    use crate::combat::{Aiming, AnimNotify, AnimNotifyKind, CharacterDied, CombatState, DamageEvent};
    use crate::components::{Dead, Dying, Vitals};
    use crate::effects::{Effect, Montage};
    use crate::DeterministicRng;
    use bevy::prelude::*;

    fn damage_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(DeterministicRng::new(7))
            .add_event::<DamageEvent>()
            .add_event::<CharacterDied>()
            .add_event::<AnimNotify>()
            .add_event::<Effect>()
            .add_systems(Update, (apply_damage, handle_finish_death).chain());
        app
    }

    fn spawn_target(app: &mut App, health: f32, stun_chance: f32) -> Entity {
        let mut vitals = Vitals::new(100.0);
        vitals.health = health;
        vitals.chance_to_be_stunned = stun_chance;
        app.world_mut().spawn((vitals, CombatState::default())).id()
    }

    fn hit(target: Entity, amount: f32, headshot: bool) -> DamageEvent {
        DamageEvent {
            target,
            instigator: None,
            amount,
            headshot,
        }
    }

    #[test]
    fn test_headshot_multiplier_applied_by_receiver() {
        let mut app = damage_app();
        let target = spawn_target(&mut app, 100.0, 0.0);
        app.world_mut().get_mut::<Vitals>(target).unwrap().headshot_multiplier = 2.0;

        app.world_mut().send_event(hit(target, 20.0, true));
        app.update();

        assert_eq!(app.world().get::<Vitals>(target).unwrap().health, 60.0);
    }

    #[test]
    fn test_certain_stun_enters_stunned() {
        let mut app = damage_app();
        let target = spawn_target(&mut app, 100.0, 1.0);

        app.world_mut().send_event(hit(target, 10.0, false));
        app.update();

        assert_eq!(*app.world().get::<CombatState>(target).unwrap(), CombatState::Stunned);

        let effects = app.world().resource::<Events<Effect>>();
        let mut cursor = effects.get_cursor();
        assert!(cursor.read(effects).any(|effect| matches!(
            effect,
            Effect::PlayMontage { montage: Montage::HitReact, .. }
        )));
    }

    #[test]
    fn test_stun_drops_aim_but_keeps_button_state() {
        let mut app = damage_app();
        let target = spawn_target(&mut app, 100.0, 1.0);
        app.world_mut().entity_mut(target).insert(Aiming {
            button_pressed: true,
            active: true,
        });

        app.world_mut().send_event(hit(target, 10.0, false));
        app.update();

        let aiming = app.world().get::<Aiming>(target).unwrap();
        assert!(!aiming.active);
        assert!(aiming.button_pressed);
    }

    #[test]
    fn test_two_lethal_hits_in_one_frame_die_once() {
        let mut app = damage_app();
        let target = spawn_target(&mut app, 30.0, 0.0);

        app.world_mut().send_event(hit(target, 40.0, false));
        app.world_mut().send_event(hit(target, 40.0, false));
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Vitals>(target).unwrap().health, 0.0);
        assert!(world.get::<Dying>(target).is_some());

        let died = world.resource::<Events<CharacterDied>>();
        assert_eq!(died.get_cursor().read(died).count(), 1);
    }

    #[test]
    fn test_finish_death_marks_dead() {
        let mut app = damage_app();
        let target = spawn_target(&mut app, 10.0, 0.0);

        app.world_mut().send_event(hit(target, 50.0, false));
        app.update();
        app.world_mut().send_event(AnimNotify {
            character: target,
            notify: AnimNotifyKind::FinishDeath,
        });
        app.update();

        let world = app.world();
        assert!(world.get::<Dead>(target).is_some());
        assert!(world.get::<Dying>(target).is_none());
    }

    #[test]
    fn test_finish_death_ignored_while_alive() {
        let mut app = damage_app();
        let target = spawn_target(&mut app, 100.0, 0.0);

        app.world_mut().send_event(AnimNotify {
            character: target,
            notify: AnimNotifyKind::FinishDeath,
        });
        app.update();

        assert!(app.world().get::<Dead>(target).is_none());
    }
}
