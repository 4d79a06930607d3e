//! Boss combat behavior.
//!
//! Each boss runs a tagged-variant state machine re-evaluated once per
//! tick. The evaluation call is both the decision and the step: facing
//! flips, chase movement, and strike spawning happen inside it. Countdowns
//! live in the `BossBrain` record, so re-entering a state resumes the
//! previous timer unless a transition reset it on the way out.

use glam::Vec2;
use hecs::{Entity, World};
use thiserror::Error;

use crate::components::{Boss, BossBrain, BossState, Facing, Position};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::spawning;

/// Precondition violations raised by a boss evaluation. The driver logs
/// these and keeps ticking other entities.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BossTickError {
    #[error("boss {boss:?} is mid-fight but has no player target")]
    MissingPlayerTarget { boss: Entity },
    #[error("entity {entity:?} is missing its boss components")]
    NotABoss { entity: Entity },
}

/// Per-tick context handed to every boss by the driver.
#[derive(Debug, Clone, Copy)]
pub struct BossContext {
    pub dt: f32,
    pub player_target: Option<Vec2>,
}

/// A melee strike the state machine wants materialized this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeRequest {
    pub position: Vec2,
}

/// Re-evaluate every boss in the world. One boss failing does not stop the
/// others; failures are returned for the driver to log.
pub fn tick_bosses(
    world: &mut World,
    ctx: BossContext,
    events: &mut EventQueue,
) -> Vec<(Entity, BossTickError)> {
    puffin::profile_function!();

    let bosses: Vec<Entity> = world.query::<&Boss>().iter().map(|(id, _)| id).collect();

    let mut failures = Vec::new();
    for boss in bosses {
        if let Err(error) = tick_boss(world, boss, ctx, events) {
            failures.push((boss, error));
        }
    }
    failures
}

/// Run one boss's decision step for this tick.
pub fn tick_boss(
    world: &mut World,
    boss: Entity,
    ctx: BossContext,
    events: &mut EventQueue,
) -> Result<(), BossTickError> {
    // Copy the machine's inputs out of the world; evaluation runs on plain
    // data and the results are written back afterwards.
    let params = match world.get::<&Boss>(boss) {
        Ok(b) => (*b).clone(),
        Err(_) => return Err(BossTickError::NotABoss { entity: boss }),
    };
    let mut brain = match world.get::<&BossBrain>(boss) {
        Ok(b) => (*b).clone(),
        Err(_) => return Err(BossTickError::NotABoss { entity: boss }),
    };
    let mut position = match world.get::<&Position>(boss) {
        Ok(p) => p.0,
        Err(_) => return Err(BossTickError::NotABoss { entity: boss }),
    };
    let mut facing = match world.get::<&Facing>(boss) {
        Ok(f) => *f,
        Err(_) => return Err(BossTickError::NotABoss { entity: boss }),
    };

    let strike = evaluate(
        &mut brain,
        &params,
        boss,
        &mut position,
        &mut facing,
        ctx,
        events,
    )?;

    if let Ok(mut stored) = world.get::<&mut BossBrain>(boss) {
        *stored = brain;
    }
    if let Ok(mut stored) = world.get::<&mut Position>(boss) {
        stored.0 = position;
    }
    if let Ok(mut stored) = world.get::<&mut Facing>(boss) {
        *stored = facing;
    }

    if let Some(request) = strike {
        spawning::spawn_strike(
            world,
            request.position,
            ENEMY_ATTACK_TAG,
            params.attack_damage,
            params.attack_reach,
            STRIKE_LIFETIME,
        );
    }

    Ok(())
}

/// One evaluation step over plain data: mutates the brain, pose, and event
/// queue, and returns a strike request when the swing connects this tick.
pub fn evaluate(
    brain: &mut BossBrain,
    params: &Boss,
    boss: Entity,
    position: &mut Vec2,
    facing: &mut Facing,
    ctx: BossContext,
    events: &mut EventQueue,
) -> Result<Option<StrikeRequest>, BossTickError> {
    let current = brain.state;
    let mut strike = None;

    let next = match current {
        BossState::Idle => idle_step(brain, params, boss, *position, facing, ctx, events)?,
        BossState::Intro => intro_step(brain, params, ctx.dt),
        BossState::ChasePlayer => chase_step(params, boss, position, facing, ctx)?,
        BossState::Attack => {
            let (next, request) = attack_step(brain, params, *position, facing, ctx.dt);
            strike = request;
            next
        }
    };

    if next != current {
        events.push(GameEvent::BossStateChanged { boss, state: next });
    }
    brain.state = next;

    Ok(strike)
}

/// Idle waits out the pre-fight arena and paces the mid-fight rhythm.
fn idle_step(
    brain: &mut BossBrain,
    params: &Boss,
    boss: Entity,
    position: Vec2,
    facing: &mut Facing,
    ctx: BossContext,
    events: &mut EventQueue,
) -> Result<BossState, BossTickError> {
    if params.fight_activated && !brain.fight_in_progress {
        events.push(GameEvent::PlayerDetected { boss });
        return Ok(BossState::Intro);
    }

    if brain.fight_in_progress {
        let target = ctx
            .player_target
            .ok_or(BossTickError::MissingPlayerTarget { boss })?;
        brain.idle_time -= ctx.dt;
        if brain.idle_time > 0.0 {
            facing.face_toward(position.x, target.x);
            return Ok(BossState::Idle);
        }
        brain.idle_time = BOSS_IDLE_PAUSE;
        return Ok(BossState::ChasePlayer);
    }

    Ok(BossState::Idle)
}

/// Intro is a fixed-length cinematic pause; its end starts the fight proper.
fn intro_step(brain: &mut BossBrain, params: &Boss, dt: f32) -> BossState {
    brain.intro_time -= dt;
    if brain.intro_time > 0.0 {
        return BossState::Intro;
    }
    brain.intro_time = params.intro_duration;
    brain.fight_in_progress = true;
    BossState::Idle
}

/// Chase closes the gap, never overshooting the target.
fn chase_step(
    params: &Boss,
    boss: Entity,
    position: &mut Vec2,
    facing: &mut Facing,
    ctx: BossContext,
) -> Result<BossState, BossTickError> {
    let target = ctx
        .player_target
        .ok_or(BossTickError::MissingPlayerTarget { boss })?;
    facing.face_toward(position.x, target.x);

    let to_target = target - *position;
    let distance = to_target.length();
    if distance <= params.attack_range {
        return Ok(BossState::Attack);
    }

    let step = (params.chase_speed * ctx.dt).min(distance);
    *position += to_target / distance * step;
    Ok(BossState::ChasePlayer)
}

/// Attack is a committed swing: it needs no target, and the hit spawns
/// exactly once, when the countdown first crosses the strike time.
fn attack_step(
    brain: &mut BossBrain,
    params: &Boss,
    position: Vec2,
    facing: &Facing,
    dt: f32,
) -> (BossState, Option<StrikeRequest>) {
    brain.attack_time -= dt;

    let mut strike = None;
    if !brain.has_struck && brain.attack_time <= params.attack_strike_time {
        brain.has_struck = true;
        let offset = Vec2::new(facing.direction_x() * params.attack_reach, 0.0);
        strike = Some(StrikeRequest {
            position: position + offset,
        });
    }

    if brain.attack_time > 0.0 {
        return (BossState::Attack, strike);
    }
    brain.attack_time = params.attack_duration;
    brain.has_struck = false;
    (BossState::Idle, strike)
}
