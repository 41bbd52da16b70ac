//! Characters, weapons and damage resolution.
//!
//! Health is an unsigned counter clamped to `[0, max]`. A character is alive
//! while its current health is above zero; once it reaches zero it stays dead,
//! since nothing in the game restores health.
//!
//! Invalid actions (attacking without a weapon, shooting a defeated boss) are
//! not errors. They come back as an [`AttackOutcome::Skipped`] with a reason
//! and a log line, and the session keeps running.

use std::fmt;
use std::sync::Arc;

/// Immutable weapon definition. Shared between the catalog and whoever has it
/// equipped, so it is handed around as `Arc<Weapon>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    pub name: String,
    pub damage: u32,
    /// Mythic-tier weapon.
    pub special: bool,
    pub explosive: bool,
}

impl Weapon {
    pub fn new(name: &str, damage: u32) -> Self {
        Self {
            name: name.to_string(),
            damage,
            special: false,
            explosive: false,
        }
    }

    pub fn mythic(name: &str, damage: u32) -> Self {
        Self {
            name: name.to_string(),
            damage,
            special: true,
            explosive: true,
        }
    }

    /// Apply this weapon's damage to `target`. There is no guard against a
    /// dead target: the health clamp already makes that a no-op.
    pub fn fire(&self, target: &mut dyn Combatant) {
        log::debug!("{} fires at {}", self.name, target.name());
        target.take_damage(self.damage);
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Full health.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(self) -> u32 {
        self.current
    }

    pub fn max(self) -> u32 {
        self.max
    }

    pub fn is_depleted(self) -> bool {
        self.current == 0
    }

    /// Subtract `amount`, saturating at zero.
    pub fn apply_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Fraction of health left in `[0, 1]`, for health bars.
    pub fn fraction(self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// Anything that can be shot at.
pub trait Combatant {
    fn name(&self) -> &str;
    fn health(&self) -> Health;
    fn take_damage(&mut self, amount: u32);

    fn is_alive(&self) -> bool {
        !self.health().is_depleted()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoWeapon,
    TargetDefeated,
}

impl SkipReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::NoWeapon => "no weapon equipped",
            Self::TargetDefeated => "target already defeated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitReport {
    pub weapon: Arc<Weapon>,
    pub damage: u32,
    pub target_health: Health,
    /// This hit took the target from alive to dead.
    pub lethal: bool,
}

/// Result of an attack command. Skips are expected gameplay states, not
/// failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackOutcome {
    Hit(HitReport),
    Skipped(SkipReason),
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    health: Health,
    equipped: Option<Arc<Weapon>>,
}

impl Player {
    pub fn new(name: &str, max_health: u32) -> Self {
        Self {
            name: name.to_string(),
            health: Health::new(max_health),
            equipped: None,
        }
    }

    pub fn equipped(&self) -> Option<&Arc<Weapon>> {
        self.equipped.as_ref()
    }

    /// Replace whatever is equipped. There is no inventory; the previous
    /// weapon is simply dropped from the player.
    pub fn equip(&mut self, weapon: Arc<Weapon>) {
        log::debug!("{} equipped {}", self.name, weapon.name);
        self.equipped = Some(weapon);
    }

    /// Fire the equipped weapon at `target`. Without a weapon this is a
    /// logged no-op.
    pub fn attack(&self, target: &mut dyn Combatant) -> AttackOutcome {
        let Some(weapon) = &self.equipped else {
            log::warn!("{} has no weapon equipped", self.name);
            return AttackOutcome::Skipped(SkipReason::NoWeapon);
        };

        let was_alive = target.is_alive();
        weapon.fire(target);
        let target_health = target.health();
        AttackOutcome::Hit(HitReport {
            weapon: Arc::clone(weapon),
            damage: weapon.damage,
            target_health,
            lethal: was_alive && target_health.is_depleted(),
        })
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> Health {
        self.health
    }

    fn take_damage(&mut self, amount: u32) {
        self.health.apply_damage(amount);
        log::debug!(
            "{} takes {} damage, health left {}",
            self.name,
            amount,
            self.health
        );
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    name: String,
    health: Health,
}

impl Enemy {
    pub fn new(name: &str, max_health: u32) -> Self {
        Self {
            name: name.to_string(),
            health: Health::new(max_health),
        }
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> Health {
        self.health
    }

    fn take_damage(&mut self, amount: u32) {
        self.health.apply_damage(amount);
        log::debug!(
            "{} (enemy) takes {} damage, health left {}",
            self.name,
            amount,
            self.health
        );
        if self.health.is_depleted() {
            log::info!("{} is down", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ak47() -> Arc<Weapon> {
        Arc::new(Weapon::new("AK-47", 40))
    }

    #[test]
    fn new_characters_start_at_full_health() {
        let player = Player::new("Henrik", 250);
        assert_eq!(player.health().current(), 250);
        assert_eq!(player.health().max(), 250);
        assert!(player.is_alive());
        assert!(player.equipped().is_none());
    }

    #[test]
    fn health_stays_within_bounds_for_any_damage() {
        for amount in [0u32, 1, 39, 40, 449, 450, 451, 10_000, u32::MAX] {
            let mut enemy = Enemy::new("Boss", 450);
            enemy.take_damage(amount);
            let health = enemy.health();
            assert!(health.current() <= health.max());
            assert_eq!(enemy.is_alive(), health.current() > 0);
        }
    }

    #[test]
    fn zero_damage_changes_nothing() {
        let mut enemy = Enemy::new("Boss", 450);
        enemy.take_damage(0);
        assert_eq!(enemy.health().current(), 450);
    }

    #[test]
    fn death_is_idempotent() {
        let mut enemy = Enemy::new("Boss", 100);
        enemy.take_damage(150);
        assert_eq!(enemy.health().current(), 0);
        assert!(!enemy.is_alive());

        enemy.take_damage(25);
        assert_eq!(enemy.health().current(), 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn equip_is_last_write_wins() {
        let mut player = Player::new("Henrik", 250);
        player.equip(ak47());
        player.equip(Arc::new(Weapon::new("MP5", 28)));
        assert_eq!(player.equipped().map(|w| w.name.as_str()), Some("MP5"));

        let mut enemy = Enemy::new("Boss", 450);
        player.attack(&mut enemy);
        assert_eq!(enemy.health().current(), 422);
    }

    #[test]
    fn boss_fight_scenario() {
        let mut player = Player::new("Henrik", 250);
        let mut boss = Enemy::new("Giant Boss", 450);
        player.equip(ak47());

        let outcome = player.attack(&mut boss);
        assert!(outcome.is_hit());
        assert_eq!(boss.health().current(), 410);
        assert!(boss.is_alive());

        let mut lethal_hits = 0;
        while boss.is_alive() {
            if let AttackOutcome::Hit(report) = player.attack(&mut boss) {
                if report.lethal {
                    lethal_hits += 1;
                }
            }
        }
        assert_eq!(lethal_hits, 1);
        assert_eq!(boss.health().current(), 0);

        // Firing on a dead target still goes through but cannot go negative.
        match player.attack(&mut boss) {
            AttackOutcome::Hit(report) => {
                assert!(!report.lethal);
                assert_eq!(report.target_health.current(), 0);
            }
            other => panic!("expected a hit, got {:?}", other),
        }
        assert_eq!(boss.health().current(), 0);
        assert!(!boss.is_alive());
    }

    #[test]
    fn attack_without_weapon_is_a_reported_no_op() {
        let player = Player::new("Henrik", 250);
        let mut boss = Enemy::new("Giant Boss", 450);
        let outcome = player.attack(&mut boss);
        assert_eq!(outcome, AttackOutcome::Skipped(SkipReason::NoWeapon));
        assert_eq!(boss.health().current(), 450);
    }

    #[test]
    fn weapon_fire_applies_its_damage() {
        let weapon = Weapon::mythic("Thunder", 90);
        assert!(weapon.special && weapon.explosive);
        let mut player = Player::new("Henrik", 250);
        weapon.fire(&mut player);
        assert_eq!(player.health().current(), 160);
    }

    #[test]
    fn health_display_and_fraction() {
        let mut health = Health::new(200);
        health.apply_damage(50);
        assert_eq!(health.to_string(), "150/200");
        assert!((health.fraction() - 0.75).abs() < f32::EPSILON);
        assert_eq!(Health::new(0).fraction(), 0.0);
    }
}
