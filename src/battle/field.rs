//! The per-battle arena: both parties, the turn queue, and the action queue.

use rand::Rng;

use crate::battle::action::Action;
use crate::battle::combatant::{Combatant, Slot};
use crate::battle::party::Party;

/// Which side of the field a party occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyId {
    A,
    B,
}

impl PartyId {
    pub fn index(self) -> usize {
        match self {
            PartyId::A => 0,
            PartyId::B => 1,
        }
    }

    pub fn opposing(self) -> PartyId {
        match self {
            PartyId::A => PartyId::B,
            PartyId::B => PartyId::A,
        }
    }
}

/// Handle to one combatant on the field. Valid for the round it was computed
/// in: the turn and action queues are rebuilt every round, before any
/// reformation can move a card between slots, so every path that resolves a
/// handle observes the same underlying card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatantRef {
    pub party: PartyId,
    pub slot: Slot,
}

pub struct Battlefield {
    parties: [Party; 2],
    turn_queue: Vec<CombatantRef>,
    action_queue: Vec<Action>,
}

impl Battlefield {
    pub fn new(party_a: Party, party_b: Party) -> Self {
        Self {
            parties: [party_a, party_b],
            turn_queue: Vec::new(),
            action_queue: Vec::new(),
        }
    }

    pub fn party(&self, id: PartyId) -> &Party {
        &self.parties[id.index()]
    }

    pub fn party_mut(&mut self, id: PartyId) -> &mut Party {
        &mut self.parties[id.index()]
    }

    /// Index form kept for callers addressing parties as 0/1. Any other index
    /// is a caller bug and fails loudly.
    pub fn get_party(&self, index: usize) -> &Party {
        assert!(index < 2, "invalid get_party index: {index}");
        &self.parties[index]
    }

    pub fn combatant(&self, handle: CombatantRef) -> &Combatant {
        self.party(handle.party).get(handle.slot)
    }

    pub fn combatant_mut(&mut self, handle: CombatantRef) -> &mut Combatant {
        self.party_mut(handle.party).get_mut(handle.slot)
    }

    /// The enemy side is decided by owner identity, not by where the acting
    /// card happens to be stored.
    pub fn opposing_party_of(&self, actor: CombatantRef) -> PartyId {
        if self.combatant(actor).owner_id == self.parties[0].owner_id {
            PartyId::B
        } else {
            PartyId::A
        }
    }

    /// Most recently computed speed ordering.
    pub fn turn_queue(&self) -> &[CombatantRef] {
        &self.turn_queue
    }

    /// Orders all six cards fastest first and drops any card defeated at
    /// computation time. LUCK breaks speed ties; remaining ties keep the
    /// stable party-A-then-B slot order rather than a coin flip, so turn
    /// order is reproducible.
    pub fn calculate_turns(&mut self) -> Vec<CombatantRef> {
        let mut order: Vec<CombatantRef> = [PartyId::A, PartyId::B]
            .into_iter()
            .flat_map(|party| Slot::ALL.into_iter().map(move |slot| CombatantRef { party, slot }))
            .collect();
        order.sort_by(|x, y| {
            let (cx, cy) = (self.combatant(*x), self.combatant(*y));
            cy.attributes
                .spd
                .cmp(&cx.attributes.spd)
                .then(cy.attributes.luck.cmp(&cx.attributes.luck))
        });
        order.retain(|handle| !self.combatant(*handle).is_defeated());
        self.turn_queue = order.clone();
        order
    }

    /// Appends to the action queue. No de-duplication or cap; the round loop
    /// adds at most one action per living card per round.
    pub fn add(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    pub fn pending_actions(&self) -> usize {
        self.action_queue.len()
    }

    /// Runs every queued action in insertion order, then prunes the ones
    /// whose turn counter has run out. The two passes let a future multi-turn
    /// ability stay queued across an evaluation while single-turn attacks are
    /// consumed immediately.
    pub fn evaluate(&mut self, rng: &mut impl Rng) -> String {
        let mut queue = std::mem::take(&mut self.action_queue);
        let mut output = String::new();
        for action in &mut queue {
            action.evaluate(self, rng);
            output.push_str(action.result());
        }
        queue.retain(|action| action.turns_remaining() != 0);
        self.action_queue = queue;
        output
    }

    /// Victory check. Party A is examined first, so a simultaneous double
    /// defeat deterministically reports party B as the winner.
    pub fn winner(&self) -> Option<PartyId> {
        if self.party(PartyId::A).is_defeated() {
            Some(PartyId::B)
        } else if self.party(PartyId::B).is_defeated() {
            Some(PartyId::A)
        } else {
            None
        }
    }
}
