//! Damageable entity lifecycle: damage intake, healing, death, and drops.
//!
//! The ordering in here is a compatibility contract with the rest of the
//! game: hurt feedback fires before the health mutation, and the `Damaged`
//! event fires even for a lethal hit, after death processing has run.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::components::{
    DropImpulse, DropKind, DropSpec, DropTable, Dying, FeedbackProfile, Health, HealthPickup,
    Hurtbox, MoneyPickup,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::feedback::FeedbackSink;
use crate::queries;
use crate::spawning;

/// Result of a damage or heal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Applied; the entity survived with this much health left.
    Applied { remaining: i32 },
    /// Applied and lethal; the entity died and left the world.
    Killed,
    /// Missing entity, mismatched tag, or mid-death - nothing changed.
    Ignored,
}

/// A damage-carrying contact delivered by the collision layer.
#[derive(Debug, Clone)]
pub struct TriggerContact {
    pub tag: String,
    pub damage: i32,
    pub source_position: Vec2,
}

/// Apply damage to an entity.
///
/// Fixed order: hurt feedback, then the health mutation, then death
/// processing if health went non-positive, then the `Damaged` event. The
/// event fires even for a lethal hit, after the entity already left the
/// world; observers must treat the id as possibly stale.
pub fn take_damage(
    world: &mut World,
    entity: Entity,
    amount: i32,
    rng: &mut impl Rng,
    feedback: &mut impl FeedbackSink,
    events: &mut EventQueue,
) -> DamageResult {
    if world.get::<&Health>(entity).is_err() || world.get::<&Dying>(entity).is_ok() {
        return DamageResult::Ignored;
    }
    let position = queries::get_entity_position(world, entity).unwrap_or(Vec2::ZERO);

    // Hurt feedback comes before the health mutation.
    if let Ok(profile) = world.get::<&FeedbackProfile>(entity) {
        if let Some(sound) = profile.hurt_sound {
            feedback.play_sound(sound);
        }
        for effect in &profile.hurt_particles {
            feedback.spawn_particles(*effect, position);
        }
        if profile.attack_fx {
            let quarter_turns: u8 = rng.gen_range(0..4);
            feedback.spawn_attack_fx(position, quarter_turns);
        }
    }

    let remaining = {
        let Ok(mut health) = world.get::<&mut Health>(entity) else {
            return DamageResult::Ignored;
        };
        health.current -= amount;
        health.current
    };

    if remaining <= 0 {
        die(world, entity, rng, feedback, events);
    }

    // The generic notification fires last, lethal or not.
    events.push(GameEvent::Damaged {
        entity,
        amount,
        remaining,
    });

    if remaining <= 0 {
        DamageResult::Killed
    } else {
        DamageResult::Applied { remaining }
    }
}

/// Heal an entity. Health may exceed `max` and stays there; nothing in the
/// damage lifecycle clamps it back down.
pub fn heal(world: &mut World, entity: Entity, amount: i32) -> DamageResult {
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return DamageResult::Ignored;
    };
    health.current += amount;
    DamageResult::Applied {
        remaining: health.current,
    }
}

/// Run death processing for an entity: death feedback, drop
/// materialization, collection events, removal from the world.
///
/// Only the first call does anything; repeat calls return false.
pub fn die(
    world: &mut World,
    entity: Entity,
    rng: &mut impl Rng,
    feedback: &mut impl FeedbackSink,
    events: &mut EventQueue,
) -> bool {
    if world.get::<&Dying>(entity).is_ok() {
        return false;
    }
    if world.insert_one(entity, Dying).is_err() {
        return false;
    }

    let position = queries::get_entity_position(world, entity).unwrap_or(Vec2::ZERO);

    let (death_sound, death_particles) = world
        .get::<&FeedbackProfile>(entity)
        .map(|profile| (profile.death_sound, profile.death_particles))
        .unwrap_or((None, None));
    if let Some(sound) = death_sound {
        feedback.play_sound(sound);
    }
    if let Some(effect) = death_particles {
        feedback.spawn_particles(effect, position);
    }

    // Materialize drops while the death position is still known.
    let drops = world
        .get::<&DropTable>(entity)
        .map(|table| table.0.clone())
        .unwrap_or_default();
    spawn_drops(world, &drops, position, rng);

    // For pickups, dying is being collected.
    let money = world.get::<&MoneyPickup>(entity).map(|p| p.value).ok();
    if let Some(value) = money {
        events.push(GameEvent::MoneyCollected { entity, value });
    }
    let restore = world.get::<&HealthPickup>(entity).map(|p| p.amount).ok();
    if let Some(amount) = restore {
        events.push(GameEvent::HealthCollected { entity, amount });
    }

    events.push(GameEvent::Died { entity, position });

    let _ = world.despawn(entity);
    true
}

/// Materialize a drop table at a position. Every pickup gets a fresh random
/// lateral-plus-upward launch impulse for the physics layer to consume.
pub fn spawn_drops(world: &mut World, drops: &[DropSpec], position: Vec2, rng: &mut impl Rng) {
    for spec in drops {
        for _ in 0..spec.amount {
            let pickup = match spec.kind {
                DropKind::Money { value } => spawning::spawn_money_pickup(world, value, position),
                DropKind::Health { amount } => {
                    spawning::spawn_health_pickup(world, amount, position)
                }
            };
            let direction = Vec2::new(rng.gen_range(-1.0..=1.0), 1.0);
            let _ = world.insert_one(pickup, DropImpulse(direction * DROP_FORCE));
        }
    }
}

/// Deliver a collision contact to an entity. Only a contact whose tag
/// matches the entity's trigger tag causes damage; everything else leaves
/// the entity untouched.
pub fn apply_trigger_contact(
    world: &mut World,
    entity: Entity,
    contact: &TriggerContact,
    rng: &mut impl Rng,
    feedback: &mut impl FeedbackSink,
    events: &mut EventQueue,
) -> DamageResult {
    let blood_splash = {
        let Ok(hurtbox) = world.get::<&Hurtbox>(entity) else {
            return DamageResult::Ignored;
        };
        match &hurtbox.trigger_tag {
            Some(tag) if *tag == contact.tag => hurtbox.blood_splash,
            _ => return DamageResult::Ignored,
        }
    };

    // Capture the position now; a lethal hit despawns the entity.
    let position = queries::get_entity_position(world, entity).unwrap_or(contact.source_position);

    let result = take_damage(world, entity, contact.damage, rng, feedback, events);
    if result == DamageResult::Ignored {
        return result;
    }

    if contact.tag == PLAYER_ATTACK_TAG {
        feedback.camera_shake();
    }
    if blood_splash {
        let direction = (position - contact.source_position).normalize_or_zero();
        feedback.spawn_blood_splash(position, direction);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;
    use crate::feedback::test_support::{FeedbackCall, RecordingFeedback};
    use crate::feedback::{NullFeedback, ParticleId, SfxId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn spawn_dummy(world: &mut World, max_health: i32) -> Entity {
        world.spawn((
            Position::new(0.0, 0.0),
            Health::new(max_health),
            Hurtbox {
                trigger_tag: Some(PLAYER_ATTACK_TAG.to_string()),
                radius: DEFAULT_HURTBOX_RADIUS,
                blood_splash: false,
            },
        ))
    }

    #[test]
    fn test_take_damage_reduces_health() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = spawn_dummy(&mut world, 100);

        let result = take_damage(
            &mut world,
            entity,
            30,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        assert_eq!(result, DamageResult::Applied { remaining: 70 });
        assert_eq!(world.get::<&Health>(entity).unwrap().current, 70);
    }

    #[test]
    fn test_take_damage_on_missing_entity_is_ignored() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = spawn_dummy(&mut world, 10);
        world.despawn(entity).unwrap();

        let result = take_damage(
            &mut world,
            entity,
            5,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        assert_eq!(result, DamageResult::Ignored);
        assert!(events.is_empty());
    }

    #[test]
    fn test_lethal_damage_removes_entity() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = spawn_dummy(&mut world, 10);

        let result = take_damage(
            &mut world,
            entity,
            10,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        assert_eq!(result, DamageResult::Killed);
        assert!(!world.contains(entity));
    }

    #[test]
    fn test_damaged_event_fires_after_death() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = spawn_dummy(&mut world, 10);

        take_damage(
            &mut world,
            entity,
            15,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        let batch: Vec<GameEvent> = events.drain().collect();
        assert_eq!(batch.len(), 2);
        assert!(matches!(batch[0], GameEvent::Died { entity: e, .. } if e == entity));
        assert!(matches!(
            batch[1],
            GameEvent::Damaged {
                entity: e,
                amount: 15,
                remaining: -5,
            } if e == entity
        ));
    }

    #[test]
    fn test_die_runs_only_once() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = spawn_dummy(&mut world, 10);
        world
            .insert_one(
                entity,
                DropTable(vec![DropSpec {
                    kind: DropKind::Money { value: 5 },
                    amount: 3,
                }]),
            )
            .unwrap();

        assert!(die(
            &mut world,
            entity,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events
        ));
        assert!(!die(
            &mut world,
            entity,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events
        ));

        let deaths = events
            .drain()
            .filter(|event| matches!(event, GameEvent::Died { .. }))
            .count();
        assert_eq!(deaths, 1);
        // One death's worth of drops, not two.
        assert_eq!(world.query::<&MoneyPickup>().iter().count(), 3);
    }

    #[test]
    fn test_heal_is_not_clamped_to_max() {
        let mut world = World::new();
        let entity = spawn_dummy(&mut world, 100);

        let result = heal(&mut world, entity, 50);

        assert_eq!(result, DamageResult::Applied { remaining: 150 });
        let health = world.get::<&Health>(entity).unwrap();
        assert_eq!(health.current, 150);
        assert_eq!(health.max, 100);
    }

    #[test]
    fn test_drops_materialize_exact_quantities() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = world.spawn((
            Position::new(4.0, 2.0),
            Health::new(1),
            DropTable(vec![
                DropSpec {
                    kind: DropKind::Money { value: 5 },
                    amount: 3,
                },
                DropSpec {
                    kind: DropKind::Health { amount: 20 },
                    amount: 1,
                },
            ]),
        ));

        take_damage(
            &mut world,
            entity,
            1,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        let money: Vec<i32> = world
            .query::<&MoneyPickup>()
            .iter()
            .map(|(_, pickup)| pickup.value)
            .collect();
        assert_eq!(money, vec![5, 5, 5]);
        assert_eq!(world.query::<&HealthPickup>().iter().count(), 1);

        // Each drop launches with a fresh impulse: sideways spread, fixed lift.
        for (_, (impulse, pos)) in world.query::<(&DropImpulse, &Position)>().iter() {
            assert_eq!(impulse.0.y, DROP_FORCE);
            assert!(impulse.0.x.abs() <= DROP_FORCE);
            assert_eq!(pos.0, Vec2::new(4.0, 2.0));
        }
    }

    #[test]
    fn test_trigger_contact_matching_tag_damages() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = spawn_dummy(&mut world, 100);
        let contact = TriggerContact {
            tag: PLAYER_ATTACK_TAG.to_string(),
            damage: 25,
            source_position: Vec2::ZERO,
        };

        let result = apply_trigger_contact(
            &mut world,
            entity,
            &contact,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        assert_eq!(result, DamageResult::Applied { remaining: 75 });
    }

    #[test]
    fn test_trigger_contact_mismatched_tag_is_ignored() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = spawn_dummy(&mut world, 100);
        let contact = TriggerContact {
            tag: ENEMY_ATTACK_TAG.to_string(),
            damage: 25,
            source_position: Vec2::ZERO,
        };

        let result = apply_trigger_contact(
            &mut world,
            entity,
            &contact,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        assert_eq!(result, DamageResult::Ignored);
        assert_eq!(world.get::<&Health>(entity).unwrap().current, 100);
        assert!(events.is_empty());
    }

    #[test]
    fn test_unset_trigger_tag_matches_nothing() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let entity = world.spawn((
            Position::new(0.0, 0.0),
            Health::new(50),
            Hurtbox {
                trigger_tag: None,
                radius: DEFAULT_HURTBOX_RADIUS,
                blood_splash: false,
            },
        ));
        let contact = TriggerContact {
            tag: PLAYER_ATTACK_TAG.to_string(),
            damage: 10,
            source_position: Vec2::ZERO,
        };

        let via_contact = apply_trigger_contact(
            &mut world,
            entity,
            &contact,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );
        assert_eq!(via_contact, DamageResult::Ignored);

        // Scripted damage still works without a tag.
        let direct = take_damage(
            &mut world,
            entity,
            10,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );
        assert_eq!(direct, DamageResult::Applied { remaining: 40 });
    }

    #[test]
    fn test_hurt_feedback_fires_in_configured_order() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut feedback = RecordingFeedback::default();
        let entity = world.spawn((
            Position::new(1.0, 2.0),
            Health::new(100),
            FeedbackProfile {
                hurt_sound: Some(SfxId(1)),
                death_sound: None,
                hurt_particles: vec![ParticleId(2), ParticleId(3)],
                death_particles: None,
                attack_fx: true,
            },
        ));

        take_damage(
            &mut world,
            entity,
            5,
            &mut test_rng(),
            &mut feedback,
            &mut events,
        );

        let position = Vec2::new(1.0, 2.0);
        assert_eq!(feedback.calls.len(), 4);
        assert_eq!(feedback.calls[0], FeedbackCall::Sound(SfxId(1)));
        assert_eq!(
            feedback.calls[1],
            FeedbackCall::Particles(ParticleId(2), position)
        );
        assert_eq!(
            feedback.calls[2],
            FeedbackCall::Particles(ParticleId(3), position)
        );
        assert!(
            matches!(feedback.calls[3], FeedbackCall::AttackFx(pos, turns) if pos == position && turns < 4)
        );
    }

    #[test]
    fn test_death_feedback_plays_sound_and_particles() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut feedback = RecordingFeedback::default();
        let entity = world.spawn((
            Position::new(0.0, 0.0),
            Health::new(1),
            FeedbackProfile {
                hurt_sound: None,
                death_sound: Some(SfxId(9)),
                hurt_particles: Vec::new(),
                death_particles: Some(ParticleId(4)),
                attack_fx: false,
            },
        ));

        take_damage(
            &mut world,
            entity,
            1,
            &mut test_rng(),
            &mut feedback,
            &mut events,
        );

        assert_eq!(feedback.calls[0], FeedbackCall::Sound(SfxId(9)));
        assert_eq!(
            feedback.calls[1],
            FeedbackCall::Particles(ParticleId(4), Vec2::ZERO)
        );
    }

    #[test]
    fn test_player_attack_contact_shakes_camera() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut feedback = RecordingFeedback::default();
        let entity = spawn_dummy(&mut world, 100);
        let contact = TriggerContact {
            tag: PLAYER_ATTACK_TAG.to_string(),
            damage: 10,
            source_position: Vec2::ZERO,
        };

        apply_trigger_contact(
            &mut world,
            entity,
            &contact,
            &mut test_rng(),
            &mut feedback,
            &mut events,
        );

        assert_eq!(
            feedback.count(|call| matches!(call, FeedbackCall::CameraShake)),
            1
        );
    }

    #[test]
    fn test_blood_splash_points_away_from_source() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut feedback = RecordingFeedback::default();
        let entity = world.spawn((
            Position::new(2.0, 0.0),
            Health::new(100),
            Hurtbox {
                trigger_tag: Some(ENEMY_ATTACK_TAG.to_string()),
                radius: DEFAULT_HURTBOX_RADIUS,
                blood_splash: true,
            },
        ));
        let contact = TriggerContact {
            tag: ENEMY_ATTACK_TAG.to_string(),
            damage: 10,
            source_position: Vec2::ZERO,
        };

        apply_trigger_contact(
            &mut world,
            entity,
            &contact,
            &mut test_rng(),
            &mut feedback,
            &mut events,
        );

        assert_eq!(
            feedback.calls.last(),
            Some(&FeedbackCall::BloodSplash(
                Vec2::new(2.0, 0.0),
                Vec2::new(1.0, 0.0)
            ))
        );
        // Enemy hits do not shake the camera.
        assert_eq!(
            feedback.count(|call| matches!(call, FeedbackCall::CameraShake)),
            0
        );
    }

    #[test]
    fn test_money_pickup_death_is_collection() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let pickup = spawning::spawn_money_pickup(&mut world, 7, Vec2::new(3.0, 1.0));
        let contact = TriggerContact {
            tag: PLAYER_BODY_TAG.to_string(),
            damage: PICKUP_TOUCH_DAMAGE,
            source_position: Vec2::new(3.0, 1.0),
        };

        let result = apply_trigger_contact(
            &mut world,
            pickup,
            &contact,
            &mut test_rng(),
            &mut NullFeedback,
            &mut events,
        );

        assert_eq!(result, DamageResult::Killed);
        assert!(!world.contains(pickup));

        let batch: Vec<GameEvent> = events.drain().collect();
        assert!(matches!(
            batch[0],
            GameEvent::MoneyCollected { entity, value: 7 } if entity == pickup
        ));
        assert!(matches!(batch[1], GameEvent::Died { .. }));
        assert!(matches!(batch[2], GameEvent::Damaged { .. }));
    }
}
