pub mod combat;
pub mod config;
pub mod game_loop;
pub mod input;
pub mod replay;
pub mod roster;
pub mod time;
pub mod world;

pub use combat::{AttackOutcome, Combatant, Enemy, Health, Player, SkipReason, Weapon};
pub use game_loop::{FrameRenderer, GameLoop, LoopError};
pub use input::{on_pointer_event, PointerEvent, PointerKind};
pub use world::{FrameSnapshot, FrameStats, SharedWorld, Viewport, World};
