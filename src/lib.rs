// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod battle;
pub mod catalog;
pub mod constants;

// Convenient re-exports for frequently used types.
pub use battle::combatant::{Attributes, Combatant, Slot, TargetChoice};
pub use battle::field::{Battlefield, CombatantRef, PartyId};
pub use battle::party::Party;
pub use battle::runner::{
    AiPolicy, BattleEnd, BattleEvent, BattleRunner, SelectionPoll, TargetCommand,
};
pub use battle::BattleError;
pub use catalog::{Catalog, CatalogError, CharacterRecord};
