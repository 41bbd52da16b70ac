//! Session state shared between the platform event thread and the loop
//! thread.
//!
//! The loop thread never renders while holding the lock: it runs `update`,
//! copies a [`FrameSnapshot`] and releases the lock before drawing. Pointer
//! events lock the same cell, so a snapshot always reflects a whole event.
//!
//! Window metrics live here too. Only the event thread may query the window
//! (on some platforms the query is forwarded to the main thread and blocks),
//! so it records size and scale factor in [`Viewport`] and the renderer reads
//! the copy carried by each snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use crate::combat::{Combatant, Enemy, Health, Player};

/// Where the player marker sits before the first touch.
pub const INITIAL_POINTER: Vec2 = Vec2::new(100.0, 100.0);

/// Physical surface size and scale factor as last reported by the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale_factor: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Minimized windows report a zero-sized area; there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub enemy: Enemy,
    pub pointer: Vec2,
    pub viewport: Viewport,
    pub ticks: u64,
}

impl World {
    pub fn new(player: Player, enemy: Enemy) -> Self {
        Self {
            player,
            enemy,
            pointer: INITIAL_POINTER,
            viewport: Viewport::default(),
            ticks: 0,
        }
    }

    /// Per-tick simulation. Movement follows the pointer directly and the
    /// boss does not act yet, so only the tick counter advances.
    pub fn update(&mut self) {
        self.ticks += 1;
    }

    pub fn snapshot(&self, stats: FrameStats) -> FrameSnapshot {
        FrameSnapshot {
            player_name: self.player.name().to_string(),
            player_health: self.player.health(),
            weapon_name: self.player.equipped().map(|w| w.name.clone()),
            enemy_name: self.enemy.name().to_string(),
            enemy_health: self.enemy.health(),
            enemy_alive: self.enemy.is_alive(),
            pointer: self.pointer,
            viewport: self.viewport,
            stats,
        }
    }
}

/// Timing readout attached to each frame for the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub tick: u64,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
    pub overruns: u64,
}

/// Everything the renderer needs for one frame, owned.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub player_name: String,
    pub player_health: Health,
    pub weapon_name: Option<String>,
    pub enemy_name: String,
    pub enemy_health: Health,
    pub enemy_alive: bool,
    pub pointer: Vec2,
    pub viewport: Viewport,
    pub stats: FrameStats,
}

impl FrameSnapshot {
    pub fn weapon_label(&self) -> &str {
        self.weapon_name.as_deref().unwrap_or("none")
    }
}

/// Cloneable handle to the lock-guarded [`World`].
#[derive(Debug, Clone)]
pub struct SharedWorld {
    inner: Arc<Mutex<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(Mutex::new(world)),
        }
    }

    /// Lock the world. A panic on another thread while holding the lock does
    /// not invalidate plain game state, so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, World> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut World) -> T) -> T {
        let mut guard = self.lock();
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Weapon;

    fn sample_world() -> World {
        World::new(Player::new("Henrik", 250), Enemy::new("Giant Boss", 450))
    }

    #[test]
    fn snapshot_without_weapon_reports_none() {
        let world = sample_world();
        let snapshot = world.snapshot(FrameStats::default());
        assert_eq!(snapshot.weapon_label(), "none");
        assert_eq!(snapshot.player_health.to_string(), "250/250");
        assert!(snapshot.enemy_alive);
        assert_eq!(snapshot.pointer, INITIAL_POINTER);
    }

    #[test]
    fn snapshot_is_detached_from_world() {
        let mut world = sample_world();
        world.player.equip(Arc::new(Weapon::new("AK-47", 40)));
        let before = world.snapshot(FrameStats::default());

        world.player.attack(&mut world.enemy);
        world.pointer = Vec2::new(5.0, 6.0);

        assert_eq!(before.enemy_health.current(), 450);
        assert_eq!(before.weapon_label(), "AK-47");
        let after = world.snapshot(FrameStats::default());
        assert_eq!(after.enemy_health.current(), 410);
        assert_eq!(after.pointer, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn snapshot_carries_recorded_viewport() {
        let mut world = sample_world();
        assert!(world.snapshot(FrameStats::default()).viewport.is_empty());

        world.viewport = Viewport::new(1080, 1920, 2.0);
        let frame = world.snapshot(FrameStats::default());
        assert_eq!(frame.viewport.size(), (1080, 1920));
        assert_eq!(frame.viewport.scale_factor, 2.0);
        assert!(!frame.viewport.is_empty());
    }

    #[test]
    fn update_only_advances_ticks() {
        let mut world = sample_world();
        world.update();
        world.update();
        assert_eq!(world.ticks, 2);
        assert_eq!(world.enemy.health().current(), 450);
        assert_eq!(world.pointer, INITIAL_POINTER);
    }

    #[test]
    fn shared_world_survives_poisoning() {
        let shared = SharedWorld::new(sample_world());
        let clone = shared.clone();
        let result = std::thread::spawn(move || {
            let _guard = clone.lock();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());

        shared.with(|w| w.pointer = Vec2::new(1.0, 2.0));
        assert_eq!(shared.lock().pointer, Vec2::new(1.0, 2.0));
    }
}
