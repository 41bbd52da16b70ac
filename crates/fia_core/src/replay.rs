//! Scripted pointer input for deterministic session runs.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::combat::AttackOutcome;
use crate::input::{apply_pointer_event, PointerEvent, PointerKind};
use crate::world::World;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read pointer script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse pointer script {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("pointer script validation failed: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct PointerScript {
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ScriptedEvent {
    pub kind: ScriptedKind,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScriptedKind {
    Down,
    Move,
    Up,
}

impl From<ScriptedKind> for PointerKind {
    fn from(kind: ScriptedKind) -> Self {
        match kind {
            ScriptedKind::Down => PointerKind::Down,
            ScriptedKind::Move => PointerKind::Move,
            ScriptedKind::Up => PointerKind::Up,
        }
    }
}

impl PointerScript {
    pub fn expanded_events(&self) -> Vec<PointerEvent> {
        let mut out = Vec::new();
        for event in &self.events {
            for _ in 0..event.repeat.max(1) {
                out.push(PointerEvent::new(event.kind.into(), event.x, event.y));
            }
        }
        out
    }

    /// Feed every event to `world` in order, collecting attack outcomes.
    pub fn replay(&self, world: &mut World) -> Vec<AttackOutcome> {
        self.expanded_events()
            .into_iter()
            .filter_map(|event| apply_pointer_event(world, event))
            .collect()
    }
}

pub fn load_pointer_script(path: &Path) -> Result<PointerScript, ReplayError> {
    let raw = fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let script: PointerScript =
        serde_json::from_str(&raw).map_err(|source| ReplayError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate_script(&script)?;
    Ok(script)
}

fn validate_script(script: &PointerScript) -> Result<(), ReplayError> {
    if script.events.is_empty() {
        return Err(ReplayError::Invalid("events list is empty".to_string()));
    }
    for (i, event) in script.events.iter().enumerate() {
        if !event.x.is_finite() || !event.y.is_finite() {
            return Err(ReplayError::Invalid(format!(
                "event {i} has a non-finite position"
            )));
        }
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Combatant, SkipReason};
    use crate::config::SessionConfig;
    use crate::roster::{build_weapon_catalog, init_session};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "fia_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn default_world() -> World {
        let catalog = build_weapon_catalog();
        let (player, boss) = init_session(&catalog, &SessionConfig::default()).expect("session");
        World::new(player, boss)
    }

    #[test]
    fn script_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "events": [
                { "kind": "move", "x": 10.0, "y": 20.0, "repeat": 3 },
                { "kind": "down", "x": 15.0, "y": 25.0 },
                { "kind": "up", "x": 15.0, "y": 25.0 }
              ]
            }"#,
        )
        .expect("write script file");

        let script = load_pointer_script(&path).expect("script should load");
        let events = script.expanded_events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[3].kind, PointerKind::Down);
        assert_eq!(events[4].kind, PointerKind::Up);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_script_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "events": [] }"#).expect("write script file");
        let err = load_pointer_script(&path).expect_err("empty script should fail");
        assert!(matches!(err, ReplayError::Invalid(_)));
        assert!(err.to_string().contains("events list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let path = temp_file_path("bad_kind");
        fs::write(
            &path,
            r#"{ "events": [{ "kind": "pinch", "x": 0.0, "y": 0.0 }] }"#,
        )
        .expect("write script file");
        let err = load_pointer_script(&path).expect_err("unknown kind should fail");
        assert!(matches!(err, ReplayError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse pointer script"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_script_reports_path() {
        let path = temp_file_path("missing");
        let err = load_pointer_script(&path).expect_err("missing file should fail");
        match &err {
            ReplayError::Read { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("expected a read error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let script = PointerScript {
            events: vec![ScriptedEvent {
                kind: ScriptedKind::Move,
                x: f32::NAN,
                y: 0.0,
                repeat: 1,
            }],
        };
        let err = validate_script(&script).expect_err("NaN position should fail");
        assert_eq!(
            err.to_string(),
            "pointer script validation failed: event 0 has a non-finite position"
        );
    }

    #[test]
    fn tapping_defeats_the_boss_then_skips() {
        // 450 hp / 40 per AK-47 shot: twelve taps to defeat, the thirteenth is skipped.
        let script: PointerScript = serde_json::from_str(
            r#"{
              "events": [
                { "kind": "move", "x": 300.0, "y": 500.0, "repeat": 4 },
                { "kind": "down", "x": 320.0, "y": 480.0, "repeat": 13 }
              ]
            }"#,
        )
        .expect("inline script");

        let mut world = default_world();
        let outcomes = script.replay(&mut world);
        assert_eq!(outcomes.len(), 13);
        assert_eq!(outcomes.iter().filter(|o| o.is_hit()).count(), 12);
        assert_eq!(
            outcomes.last(),
            Some(&AttackOutcome::Skipped(SkipReason::TargetDefeated))
        );
        assert!(!world.enemy.is_alive());
        assert_eq!(world.enemy.health().current(), 0);
        assert_eq!(world.pointer, glam::Vec2::new(320.0, 480.0));
    }

    #[test]
    fn replay_is_deterministic() {
        let script: PointerScript = serde_json::from_str(
            r#"{ "events": [{ "kind": "down", "x": 1.0, "y": 2.0, "repeat": 5 }] }"#,
        )
        .expect("inline script");

        let mut a = default_world();
        let mut b = default_world();
        assert_eq!(script.replay(&mut a), script.replay(&mut b));
        assert_eq!(a.enemy.health(), b.enemy.health());
    }
}
