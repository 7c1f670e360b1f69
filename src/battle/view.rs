//! Display-ready fragments handed to the presentation layer.
//!
//! The engine never renders anything itself: it supplies ordered card lists
//! and strings, and the consumer composes the actual board (the image layer
//! stacks `art_path`s in order and tints defeated cards).

use std::time::Duration;

use crate::battle::combatant::{Combatant, TargetChoice};
use crate::battle::field::PartyId;
use crate::battle::party::Party;

/// One card as the renderer needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub hp: String,
    pub art_path: String,
    pub defeated: bool,
}

pub fn card_view(card: &Combatant) -> CardView {
    CardView {
        name: card.name.clone(),
        hp: card.hp_string(),
        art_path: card.art_path.clone(),
        defeated: card.is_defeated(),
    }
}

/// Ordered [front, back1, back2] board for one party.
pub fn party_board(party: &Party) -> Vec<CardView> {
    party.combatants().iter().map(card_view).collect()
}

pub fn party_header(nickname: &str, side: PartyId) -> String {
    match side {
        PartyId::A => format!(":red_circle::red_circle: **{nickname}'s Party** :red_circle::red_circle:"),
        PartyId::B => format!(":blue_circle::blue_circle: **{nickname} Party** :blue_circle::blue_circle:"),
    }
}

pub fn divider() -> String {
    ":black_small_square:".repeat(14) + "\n"
}

pub fn vs_divider() -> String {
    let edge = ":black_small_square:".repeat(7) + "\n";
    let middle = format!(
        "{}:vs:{}\n",
        ":black_small_square:".repeat(3),
        ":black_small_square:".repeat(3)
    );
    format!("{edge}{middle}{edge}")
}

pub fn turn_order_header() -> String {
    ":timer: **TURN ORDER:**".to_string()
}

pub fn selection_prompt(window: Duration) -> String {
    format!(
        "You have {} seconds to input your attack commands [!oc 1|2|3 front|back].",
        window.as_secs()
    )
}

pub fn selection_ack(card_name: &str, owner_nickname: &str, destination: TargetChoice) -> String {
    let line = match destination {
        TargetChoice::Frontline => "frontline",
        TargetChoice::Backline => "backline",
    };
    format!("**{card_name} ({owner_nickname})** is set to attack the {line}!")
}

pub fn timeout_notice(window: Duration) -> String {
    format!("{} second timeout has been reached.", window.as_secs())
}

pub fn new_turn_banner() -> String {
    format!("{}__**NEW TURN**__\n{}", divider(), divider())
}

pub fn winner_banner(owner_nickname: &str) -> String {
    format!(":trophy: **{owner_nickname} wins the battle!**")
}
