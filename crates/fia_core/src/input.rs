//! Pointer input mapped to game actions.
//!
//! - **Down:** moves the player marker to the pointer and fires at the boss.
//! - **Move:** moves the player marker only.
//! - **Up:** ignored.
//!
//! Only one pointer is tracked; there is no debouncing or gesture handling.

use glam::Vec2;

use crate::combat::{AttackOutcome, Combatant, SkipReason};
use crate::world::{SharedWorld, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Vec2::new(x, y),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, x, y)
    }
}

/// Apply a pointer event under the world lock. Returns the attack outcome for
/// `Down` events.
pub fn on_pointer_event(world: &SharedWorld, event: PointerEvent) -> Option<AttackOutcome> {
    world.with(|w| apply_pointer_event(w, event))
}

pub fn apply_pointer_event(world: &mut World, event: PointerEvent) -> Option<AttackOutcome> {
    match event.kind {
        PointerKind::Down => {
            world.pointer = event.position;
            Some(attack_enemy(world))
        }
        PointerKind::Move => {
            world.pointer = event.position;
            None
        }
        PointerKind::Up => None,
    }
}

fn attack_enemy(world: &mut World) -> AttackOutcome {
    if !world.enemy.is_alive() {
        log::info!("{} has already been defeated", world.enemy.name());
        return AttackOutcome::Skipped(SkipReason::TargetDefeated);
    }
    world.player.attack(&mut world.enemy)
}
