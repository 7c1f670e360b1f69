//! A side's three-card formation and its per-round bookkeeping.

use rand::prelude::IteratorRandom;
use rand::Rng;

use crate::battle::combatant::{Combatant, Slot};
use crate::battle::BattleError;
use crate::constants::{HP_LINE_SPACING, PARTY_SIZE};

/// Exactly one combatant occupies each of the three slots at all times.
/// Slots may swap occupants during reformation but are never duplicated or
/// left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub owner_nickname: String,
    /// None for the AI-controlled side.
    pub owner_id: Option<String>,
    combatants: Vec<Combatant>,
}

impl Party {
    /// Builds a party from exactly three pre-built cards, stamping owner
    /// identity and slot positions onto each.
    pub fn new(
        cards: Vec<Combatant>,
        owner_nickname: &str,
        owner_id: Option<&str>,
    ) -> Result<Self, BattleError> {
        if cards.len() != PARTY_SIZE {
            return Err(BattleError::PartySize(cards.len()));
        }
        let mut party = Self {
            owner_nickname: owner_nickname.to_string(),
            owner_id: owner_id.map(str::to_string),
            combatants: cards,
        };
        for card in &mut party.combatants {
            card.set_owner(owner_nickname, owner_id);
        }
        party.sync_positions();
        Ok(party)
    }

    pub fn get(&self, slot: Slot) -> &Combatant {
        &self.combatants[slot.index()]
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut Combatant {
        &mut self.combatants[slot.index()]
    }

    /// Ordered [front, back1, back2]; display and turn-order seeding rely on
    /// this ordering.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// True once every card has either picked a target or is out of the fight.
    pub fn is_selection_done(&self) -> bool {
        self.combatants
            .iter()
            .all(|c| c.is_defeated() || c.target.is_some())
    }

    pub fn is_defeated(&self) -> bool {
        self.combatants.iter().all(|c| c.is_defeated())
    }

    /// Uniformly random living slot, or None when the whole party is down.
    /// Never collapses "none alive" into the front slot; a defeated card must
    /// not become a valid attack target.
    pub fn random_living_slot(&self, rng: &mut impl Rng) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|&slot| !self.get(slot).is_defeated())
            .choose(rng)
    }

    /// Random living backline slot. Falls back to the front slot when both
    /// backliners are down, even if the front is down too; callers resolving
    /// an attack re-validate whatever this returns.
    pub fn random_backline_slot(&self, rng: &mut impl Rng) -> Slot {
        let back1_down = self.get(Slot::Back1).is_defeated();
        let back2_down = self.get(Slot::Back2).is_defeated();
        match (back1_down, back2_down) {
            (true, true) => Slot::Front,
            (true, false) => Slot::Back2,
            (false, true) => Slot::Back1,
            (false, false) => {
                if rng.random_bool(0.5) {
                    Slot::Back1
                } else {
                    Slot::Back2
                }
            }
        }
    }

    /// Swaps the occupants of two slots. Assigning a card to an occupied slot
    /// always swaps rather than overwrites, so every slot keeps exactly one
    /// occupant.
    pub fn swap(&mut self, a: Slot, b: Slot) {
        self.combatants.swap(a.index(), b.index());
        self.sync_positions();
    }

    /// End-of-round maintenance: clears spent targets, marks cards at 0 HP as
    /// formally defeated, and promotes the first living backliner (back1
    /// before back2) when the front has fallen. Defeated cards are never
    /// promoted. Running this twice without intervening damage is a no-op.
    pub fn update(&mut self) {
        for card in &mut self.combatants {
            card.clear_target();
            if card.is_defeated() {
                card.set_defeated();
            }
        }
        if self.get(Slot::Front).is_defeated() {
            if !self.get(Slot::Back1).is_defeated() {
                self.swap(Slot::Front, Slot::Back1);
            } else if !self.get(Slot::Back2).is_defeated() {
                self.swap(Slot::Front, Slot::Back2);
            }
        }
    }

    /// All three HP readouts on one line, spaced to match the board art.
    pub fn hp_line(&self) -> String {
        let spacing = " ".repeat(HP_LINE_SPACING);
        let readouts: Vec<String> = self.combatants.iter().map(|c| c.hp_string()).collect();
        readouts.join(&spacing) + "\n"
    }

    fn sync_positions(&mut self) {
        for (slot, card) in Slot::ALL.into_iter().zip(self.combatants.iter_mut()) {
            card.position = slot;
        }
    }
}
