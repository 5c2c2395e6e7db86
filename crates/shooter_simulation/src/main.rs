//! Headless симуляция shooter'а
//!
//! Скриптовый сценарий без рендера: подбор патронов, стрельба до пустого
//! магазина с auto-reload, подбор пистолета, смена оружия, бросок, урон.
//! `ScriptedHost` играет роль движка: отвечает notifies на монтажи и
//! результатами трасс на `BulletTraceRequest`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use shooter_simulation::item::ammo_bundle;
use shooter_simulation::weapon::weapon_bundle;
use shooter_simulation::*;

const FRAME: Duration = Duration::from_millis(16);

/// Notify, который host пришлёт через `delay` секунд
struct PendingNotify {
    delay: f32,
    notify: AnimNotify,
}

#[derive(Resource, Default)]
struct ScriptedHost {
    pending: Vec<PendingNotify>,
    target: Option<Entity>,
}

fn montage_notifies(montage: Montage) -> &'static [(f32, AnimNotifyKind)] {
    match montage {
        Montage::Reload => &[
            (0.3, AnimNotifyKind::GrabClip),
            (0.8, AnimNotifyKind::ReleaseClip),
            (1.0, AnimNotifyKind::FinishReloading),
        ],
        Montage::Equip => &[(0.4, AnimNotifyKind::FinishEquipping)],
        Montage::HitReact => &[(0.5, AnimNotifyKind::EndStun)],
        Montage::Death => &[(1.2, AnimNotifyKind::FinishDeath)],
        Montage::HipFire => &[],
    }
}

fn scripted_host(
    time: Res<Time>,
    mut host: ResMut<ScriptedHost>,
    mut effects: EventReader<Effect>,
    mut traces: EventReader<BulletTraceRequest>,
    mut notifies: EventWriter<AnimNotify>,
    mut results: EventWriter<BulletTraceResult>,
) {
    for effect in effects.read() {
        if let Effect::PlayMontage { entity, montage, .. } = effect {
            for (delay, notify) in montage_notifies(*montage) {
                host.pending.push(PendingNotify {
                    delay: *delay,
                    notify: AnimNotify {
                        character: *entity,
                        notify: *notify,
                    },
                });
            }
        }
    }

    let delta = time.delta_secs();
    let mut due = Vec::new();
    host.pending.retain_mut(|pending| {
        pending.delay -= delta;
        if pending.delay <= 0.0 {
            due.push(pending.notify);
            false
        } else {
            true
        }
    });
    notifies.write_batch(due);

    let target = host.target;
    for trace in traces.read() {
        let end = trace.origin + trace.direction * trace.max_distance;
        results.write(BulletTraceResult {
            shooter: trace.shooter,
            weapon: trace.weapon,
            end,
            hit: target.map(|actor| BulletHit {
                location: end,
                actor: Some(actor),
                headshot: false,
                surface_particles: None,
            }),
        });
    }
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn send(app: &mut App, character: Entity, action: ActionKind) {
    app.world_mut().send_event(PlayerAction::new(character, action));
}

fn main() {
    let seed = 42;
    log_info(&format!("Starting shooter headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    load_data_tables(
        &mut app,
        None,
        Some(include_str!("../data/weapons.ron")),
        Some(include_str!("../data/item_rarity.ron")),
    );
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .init_resource::<ScriptedHost>()
        .add_systems(Update, scripted_host.before(ShooterSet::Notifications));

    let (player, _) = spawn_shooter_character(app.world_mut(), Transform::IDENTITY, Some(WeaponType::SubmachineGun));
    let dummy = app.world_mut().spawn((Vitals::new(500.0), Transform::from_xyz(0.0, 0.0, -10.0))).id();
    app.world_mut().resource_mut::<ScriptedHost>().target = Some(dummy);

    if let Some(mut aim) = app.world_mut().get_mut::<AimPoint>(player) {
        aim.muzzle = Vec3::new(0.3, 1.4, -0.5);
        aim.crosshair_target = Vec3::new(0.0, 1.0, -10.0);
    }

    let weapons = app.world().resource::<WeaponTable>().clone();
    let rarities = app.world().resource::<RarityTable>().clone();
    let ammo = app
        .world_mut()
        .spawn(ammo_bundle(AmmoType::NineMm, 30, &rarities, Transform::from_xyz(1.0, 0.0, 1.0)))
        .id();
    let pistol = app
        .world_mut()
        .spawn(weapon_bundle(
            &weapons,
            &rarities,
            WeaponType::Pistol,
            ItemRarity::Rare,
            Transform::from_xyz(-1.0, 0.0, 1.0),
        ))
        .id();

    run_frames(&mut app, 2);

    // 1. Патроны: overlap → автосбор
    app.world_mut().send_event(ItemOverlapChanged {
        item: ammo,
        character: player,
        began: true,
    });
    run_frames(&mut app, 60);
    app.world_mut().send_event(ItemOverlapChanged {
        item: ammo,
        character: player,
        began: false,
    });

    // 2. Зажать огонь, пока магазин не опустеет (auto-reload ответит notify'ями)
    send(&mut app, player, ActionKind::FirePressed);
    run_frames(&mut app, 240);
    send(&mut app, player, ActionKind::FireReleased);
    run_frames(&mut app, 90);

    // 3. Пистолет: overlap + trace + Select
    app.world_mut().send_event(ItemOverlapChanged {
        item: pistol,
        character: player,
        began: true,
    });
    app.world_mut().send_event(ItemTraceResult {
        character: player,
        item: Some(pistol),
    });
    run_frames(&mut app, 1);
    send(&mut app, player, ActionKind::Select);
    run_frames(&mut app, 60);
    app.world_mut().send_event(ItemOverlapChanged {
        item: pistol,
        character: player,
        began: false,
    });

    // 4. Переключиться на пистолет и выбросить его
    send(&mut app, player, ActionKind::EquipSlot(1));
    run_frames(&mut app, 40);
    send(&mut app, player, ActionKind::DropWeapon);
    run_frames(&mut app, 60);

    // 5. Урон до смерти
    for _ in 0..3 {
        app.world_mut().send_event(DamageEvent {
            target: player,
            instigator: Some(dummy),
            amount: 40.0,
            headshot: false,
        });
        run_frames(&mut app, 40);
    }
    run_frames(&mut app, 90);

    let world = app.world();
    let health = world.get::<Vitals>(dummy).map(|vitals| vitals.health).unwrap_or_default();
    let reserve = world
        .get::<AmmoReserves>(player)
        .map(|reserves| reserves.get(AmmoType::NineMm))
        .unwrap_or_default();
    log_info(&format!(
        "Simulation complete: dummy health {:.1}, player 9mm reserve {}, player dead: {}",
        health,
        reserve,
        world.get::<Dead>(player).is_some()
    ));
}
