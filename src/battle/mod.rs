//! The central module for the battle engine.

pub mod action;
pub mod combatant;
pub mod field;
pub mod party;
pub mod runner;
pub mod view;

use thiserror::Error;

/// Fatal setup mistakes. These indicate a caller bug and abort battle
/// construction rather than degrade into a half-built fight.
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("a party must be comprised of exactly three combatants, got {0}")]
    PartySize(usize),
}
