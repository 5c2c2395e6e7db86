//! Pulse/glow таймер + derived item properties
//!
//! Pickup: repeating pulse таймер → pulse кривая → material каналы.
//! EquipInterping: каналы из interp pulse кривой по таймеру интерполяции.
//! Остальные состояния: нули.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{GravityScale, RigidBody};

use super::components::{GlowMaterial, ItemProperties, ItemState, PickupItem, PulseTimer};
use super::interp::ItemInterp;
use super::rarity::RarityVisuals;
use crate::config::ShooterConfig;
use crate::shared::ShooterCurves;

/// Новый предмет в мире: цвет свечения из rarity, glow on, pulse запущен
pub fn init_spawned_items(
    config: Res<ShooterConfig>,
    mut items: Query<(&PickupItem, &mut PulseTimer, &mut GlowMaterial, Option<&RarityVisuals>), Added<PickupItem>>,
) {
    for (item, mut pulse, mut glow, visuals) in items.iter_mut() {
        if let Some(visuals) = visuals {
            glow.glow_color = visuals.glow_color;
        }

        if item.state == ItemState::Pickup {
            glow.enable_glow();
            pulse.start(config.pulse_duration);
        }
    }
}

/// State → collision/visibility/physics (+ rapier body для падения)
pub fn sync_item_properties(
    mut commands: Commands,
    mut items: Query<(Entity, Ref<PickupItem>, &mut ItemProperties)>,
) {
    for (entity, item, mut properties) in items.iter_mut() {
        if !item.is_changed() {
            continue;
        }

        let derived = item.properties();
        if *properties == derived && !item.is_added() {
            continue;
        }
        *properties = derived;

        let body = if derived.physics_enabled {
            RigidBody::Dynamic
        } else {
            RigidBody::Fixed
        };
        let gravity = if derived.gravity_enabled { 1.0 } else { 0.0 };
        commands.entity(entity).insert((body, GravityScale(gravity)));
    }
}

pub fn update_item_glow(
    time: Res<Time>,
    config: Res<ShooterConfig>,
    curves: Res<ShooterCurves>,
    mut items: Query<(&PickupItem, &mut PulseTimer, &mut GlowMaterial, Option<&ItemInterp>)>,
) {
    for (item, mut pulse, mut glow, interp) in items.iter_mut() {
        let channels = match (item.state, interp) {
            (ItemState::Pickup, _) => match pulse.0.as_mut() {
                Some(timer) => {
                    timer.tick(time.delta());
                    curves.pulse.sample(timer.elapsed_secs())
                }
                None => Vec3::ZERO,
            },
            (ItemState::EquipInterping, Some(interp)) => curves.interp_pulse.sample(interp.elapsed()),
            _ => Vec3::ZERO,
        };

        glow.set_channels(
            channels
                * Vec3::new(
                    config.glow_amount,
                    config.fresnel_exponent,
                    config.fresnel_reflect_fraction,
                ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use std::time::Duration;

    fn glow_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(ShooterConfig::default())
            .insert_resource(ShooterCurves::default())
            .add_systems(Update, (init_spawned_items, update_item_glow).chain());
        app
    }

    #[test]
    fn test_pickup_item_pulses() {
        let mut app = glow_app();
        app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(Duration::from_millis(500)));

        let item = app
            .world_mut()
            .spawn(PickupItem::new("Crate", ItemKind::Misc, Default::default()))
            .id();

        app.update();
        app.update();

        let world = app.world();
        assert!(world.get::<PulseTimer>(item).unwrap().is_running());
        let glow = world.get::<GlowMaterial>(item).unwrap();
        assert!(glow.glow_amount > 0.0);
        assert!(glow.is_glowing());
    }

    #[test]
    fn test_picked_up_item_has_zero_channels() {
        let mut app = glow_app();

        let item = app
            .world_mut()
            .spawn(PickupItem::new("Crate", ItemKind::Misc, Default::default()).with_state(ItemState::PickedUp))
            .id();

        app.update();

        let world = app.world();
        assert!(!world.get::<PulseTimer>(item).unwrap().is_running());
        assert_eq!(world.get::<GlowMaterial>(item).unwrap().glow_amount, 0.0);
    }
}
