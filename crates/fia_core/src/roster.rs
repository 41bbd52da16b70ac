//! Weapon catalog and session setup.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::combat::{Enemy, Player, Weapon};
use crate::config::SessionConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("starting weapon '{0}' is not in the weapon catalog")]
    UnknownWeapon(String),
}

/// Read-only mapping from weapon key to weapon, built once per session.
#[derive(Debug, Clone)]
pub struct WeaponCatalog {
    weapons: HashMap<String, Arc<Weapon>>,
}

impl WeaponCatalog {
    pub fn get(&self, key: &str) -> Option<&Arc<Weapon>> {
        self.weapons.get(key)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Keys in sorted order, so listings are stable.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.weapons.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

pub fn build_weapon_catalog() -> WeaponCatalog {
    let entries = [
        ("famas", Weapon::new("Famas", 35)),
        ("ak47", Weapon::new("AK-47", 40)),
        ("m4a1", Weapon::new("M4A1", 30)),
        ("vector", Weapon::new("Vector", 25)),
        ("mp5", Weapon::new("MP5", 28)),
        ("mp40", Weapon::new("MP40", 27)),
        ("rayito", Weapon::mythic("Rayito", 70)),
        ("thunder", Weapon::mythic("Thunder", 90)),
    ];

    let weapons = entries
        .into_iter()
        .map(|(key, weapon)| (key.to_string(), Arc::new(weapon)))
        .collect();
    WeaponCatalog { weapons }
}

/// Create the player (armed with the configured starting weapon) and the boss.
pub fn init_session(
    catalog: &WeaponCatalog,
    config: &SessionConfig,
) -> Result<(Player, Enemy), SessionError> {
    let weapon = catalog
        .get(&config.starting_weapon)
        .ok_or_else(|| SessionError::UnknownWeapon(config.starting_weapon.clone()))?;

    let mut player = Player::new(&config.player_name, config.player_max_health);
    player.equip(Arc::clone(weapon));
    let boss = Enemy::new(&config.boss_name, config.boss_max_health);

    log::info!(
        "Session ready: {} ({} hp, {}) vs {} ({} hp)",
        config.player_name,
        config.player_max_health,
        weapon.name,
        config.boss_name,
        config.boss_max_health
    );
    Ok((player, boss))
}
