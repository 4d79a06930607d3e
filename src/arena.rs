//! Arena driver - fixed-step simulation of bosses, contacts, and pickups.
//!
//! The host engine owns rendering and input; it hands the arena a time step
//! each frame and gets back the batch of events that step produced.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use tracing::warn;

use crate::components::{Boss, ContactDamage, Hurtbox, Lifetime, Position, Wallet};
use crate::events::{EventQueue, GameEvent};
use crate::feedback::FeedbackSink;
use crate::queries;
use crate::systems;
use crate::systems::boss::BossContext;
use crate::systems::damage::{self, TriggerContact};

/// Owns the world and advances the whole simulation one step at a time.
pub struct Arena {
    pub world: World,
    pub events: EventQueue,
    pub time: f32,
    player: Entity,
}

impl Arena {
    pub fn new(world: World, player: Entity) -> Self {
        Self {
            world,
            events: EventQueue::new(),
            time: 0.0,
            player,
        }
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Arm a boss so its idle machine opens the fight on the next tick.
    /// Returns false if the entity is not a boss.
    pub fn activate_boss_fight(&mut self, boss: Entity) -> bool {
        let Ok(mut params) = self.world.get::<&mut Boss>(boss) else {
            return false;
        };
        params.fight_activated = true;
        true
    }

    /// Advance the simulation by `dt` seconds and return the events the step
    /// produced, in the order they fired.
    pub fn tick(&mut self, dt: f32, feedback: &mut impl FeedbackSink) -> Vec<GameEvent> {
        let mut rng = rand::thread_rng();
        self.tick_with(dt, feedback, &mut rng)
    }

    /// `tick` with a caller-supplied rng.
    pub fn tick_with(
        &mut self,
        dt: f32,
        feedback: &mut impl FeedbackSink,
        rng: &mut impl Rng,
    ) -> Vec<GameEvent> {
        puffin::profile_function!();

        self.time += dt;

        let ctx = BossContext {
            dt,
            player_target: queries::player_target(&self.world),
        };
        for (boss, error) in systems::tick_bosses(&mut self.world, ctx, &mut self.events) {
            warn!(?boss, %error, "boss tick failed");
        }

        self.update_contacts(rng, feedback);
        self.expire_lifetimes(dt);

        self.drain_events()
    }

    /// Sweep every damage-carrying contact against every hurtbox in range.
    /// A contact damages a given entity at most once over its lifetime, so a
    /// strike that spans several ticks lands a single hit and the player's
    /// permanent body contact collects each pickup exactly once.
    fn update_contacts(&mut self, rng: &mut impl Rng, feedback: &mut impl FeedbackSink) {
        let sources: Vec<(Entity, Vec2, String, i32, f32)> = self
            .world
            .query::<(&Position, &ContactDamage)>()
            .iter()
            .map(|(id, (pos, contact))| {
                (id, pos.0, contact.tag.clone(), contact.amount, contact.radius)
            })
            .collect();

        for (source, source_pos, tag, amount, radius) in sources {
            // Struck entries for despawned entities are stale; drop them so
            // a permanent contact like the player's body stays bounded.
            if let Ok(mut contact) = self.world.get::<&mut ContactDamage>(source) {
                contact.struck.retain(|entity| self.world.contains(*entity));
            }

            let mut overlapping = Vec::new();
            for (target, (pos, hurtbox)) in self.world.query::<(&Position, &Hurtbox)>().iter() {
                if target == source {
                    continue;
                }
                if pos.0.distance(source_pos) <= radius + hurtbox.radius {
                    overlapping.push(target);
                }
            }

            for target in overlapping {
                // The source may have died earlier in this same sweep.
                let first_touch = match self.world.get::<&mut ContactDamage>(source) {
                    Ok(mut contact) => {
                        if contact.struck.contains(&target) {
                            false
                        } else {
                            contact.struck.push(target);
                            true
                        }
                    }
                    Err(_) => false,
                };
                if !first_touch {
                    continue;
                }

                let contact = TriggerContact {
                    tag: tag.clone(),
                    damage: amount,
                    source_position: source_pos,
                };
                damage::apply_trigger_contact(
                    &mut self.world,
                    target,
                    &contact,
                    rng,
                    feedback,
                    &mut self.events,
                );
            }
        }
    }

    /// Age timed entities and remove the ones whose lifetime ran out.
    fn expire_lifetimes(&mut self, dt: f32) {
        let mut expired = Vec::new();
        for (id, lifetime) in self.world.query_mut::<&mut Lifetime>() {
            lifetime.0 -= dt;
            if lifetime.0 <= 0.0 {
                expired.push(id);
            }
        }
        for id in expired {
            let _ = self.world.despawn(id);
        }
    }

    /// Drain the queue, apply the events that feed back into the world, and
    /// hand the batch to the caller.
    fn drain_events(&mut self) -> Vec<GameEvent> {
        let batch: Vec<GameEvent> = self.events.drain().collect();
        for event in &batch {
            match event {
                GameEvent::MoneyCollected { value, .. } => {
                    if let Ok(mut wallet) = self.world.get::<&mut Wallet>(self.player) {
                        wallet.receive(*value);
                    }
                }
                GameEvent::HealthCollected { amount, .. } => {
                    damage::heal(&mut self.world, self.player, *amount);
                }
                _ => {}
            }
        }
        batch
    }
}
