//! Mover implementations: who, or what, picks the cell.

mod agent;
mod human;
mod scripted;
mod simple_ai;

pub use agent::AgentMover;
pub use human::HumanMover;
pub use scripted::ScriptedMover;
pub use simple_ai::{SimpleAi, pick_move};
