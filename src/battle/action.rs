//! One-shot battle actions and the closed set of abilities they dispatch.

use rand::Rng;

use crate::battle::combatant::Slot;
use crate::battle::field::{Battlefield, CombatantRef};

/// Every ability the engine knows. New kinds (status effects, multi-turn or
/// area abilities) slot in here without touching the battlefield or the
/// round loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    BasicAttack,
}

impl Ability {
    /// Evaluations the action stays queued for after the one it runs in.
    fn initial_turns(self) -> u8 {
        match self {
            Ability::BasicAttack => 0,
        }
    }
}

/// Binds an acting card to a chosen target slot and an ability for one round.
/// Created fresh when a living card's turn comes up, discarded once its turn
/// counter runs out.
#[derive(Debug, Clone)]
pub struct Action {
    actor: CombatantRef,
    target_slot: Slot,
    ability: Ability,
    result: String,
    turns_remaining: u8,
}

impl Action {
    pub fn new(actor: CombatantRef, target_slot: Slot, ability: Ability) -> Self {
        Self {
            actor,
            target_slot,
            ability,
            result: String::new(),
            turns_remaining: ability.initial_turns(),
        }
    }

    /// Human-readable outcome of the last evaluation; empty when the action
    /// had nothing to do.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn turns_remaining(&self) -> u8 {
        self.turns_remaining
    }

    pub(crate) fn evaluate(&mut self, field: &mut Battlefield, rng: &mut impl Rng) {
        match self.ability {
            Ability::BasicAttack => self.basic_attack(field, rng),
        }
    }

    fn basic_attack(&mut self, field: &mut Battlefield, rng: &mut impl Rng) {
        self.result.clear();

        // Clone to avoid mutable/immutable borrow overlap between attacker
        // and victim; the attacker's state is read-only during a strike.
        let actor = field.combatant(self.actor).clone();
        if actor.is_defeated() {
            return;
        }

        let enemy = field.opposing_party_of(self.actor);
        let mut target_slot = self.target_slot;
        if field.party(enemy).get(target_slot).is_defeated() {
            // First pick is already down; re-roll among the living.
            match field.party(enemy).random_living_slot(rng) {
                Some(slot) => target_slot = slot,
                // Whole enemy party is down. Nothing to hit, nothing to say.
                None => return,
            }
        }

        let header = format!(
            "**{}:** {} ({})",
            actor.owner_nickname,
            actor.name,
            actor.hp_string()
        );
        let victim = field.combatant_mut(CombatantRef {
            party: enemy,
            slot: target_slot,
        });
        let felled = actor.attack(victim);
        if felled {
            victim.set_defeated();
        }
        let verb = if felled { "defeats" } else { "strikes" };
        self.result = format!(
            "{} {} {} ({}) with {} damage!\n",
            header,
            verb,
            victim.name,
            victim.hp_string(),
            actor.attributes.atk
        );
    }
}
