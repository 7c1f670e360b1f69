//! Drives a battlefield through the round state machine.
//!
//! One battle is one sequential loop: turn order, player target selection,
//! AI targeting, resolution, victory check, reformation. The only suspension
//! point is the selection phase, which blocks on the command channel with a
//! timeout; the engine does no work while suspended and consumes exactly one
//! command per resume.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info};

use crate::battle::action::{Ability, Action};
use crate::battle::combatant::{Slot, TargetChoice};
use crate::battle::field::{Battlefield, CombatantRef, PartyId};
use crate::battle::view::{self, CardView};
use crate::constants::SELECTION_TIMEOUT_SECS;

/// A parsed targeting intent from the player's chat channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCommand {
    /// 1-based card position as typed by the player.
    pub actor_slot: usize,
    pub destination: TargetChoice,
}

impl TargetCommand {
    /// Parses the `!oc N front|back` command shape. Anything else is not a
    /// targeting command and yields None.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        if words.next()? != "!oc" {
            return None;
        }
        let actor_slot: usize = words.next()?.parse().ok()?;
        let destination = match words.next()? {
            "front" => TargetChoice::Frontline,
            "back" => TargetChoice::Backline,
            _ => return None,
        };
        if words.next().is_some() || !(1..=3).contains(&actor_slot) {
            return None;
        }
        Some(Self {
            actor_slot,
            destination,
        })
    }
}

/// Outcome of one blocking wait on the command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPoll {
    /// A valid command, resolved to an internal slot.
    Received {
        slot: Slot,
        destination: TargetChoice,
    },
    /// Malformed or aimed at a defeated card; silently dropped and the wait
    /// window keeps running.
    Ignored,
    TimedOut,
}

/// How the AI side picks its targets each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiPolicy {
    #[default]
    AlwaysFront,
    RandomLiving,
}

/// Terminal state of a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEnd {
    Winner {
        party: PartyId,
        owner_nickname: String,
    },
    /// Selection timed out; the battle ends with no declared winner.
    Aborted,
}

/// Display-ready happenings, relayed to whatever renders the battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Board {
        party: PartyId,
        header: String,
        cards: Vec<CardView>,
    },
    TurnOrder {
        header: String,
        cards: Vec<CardView>,
    },
    SelectionPrompt(String),
    SelectionAck(String),
    RoundResults(String),
    RoundDivider(String),
    Timeout(String),
    Winner(String),
}

pub struct BattleRunner {
    field: Battlefield,
    commands: mpsc::Receiver<TargetCommand>,
    events: mpsc::UnboundedSender<BattleEvent>,
    pub ai_policy: AiPolicy,
    /// Window the player gets per targeting command.
    pub selection_timeout: Duration,
    rng: StdRng,
}

impl BattleRunner {
    /// Party A is the player-controlled side fed by `commands`; party B is
    /// driven by `ai_policy`.
    pub fn new(
        field: Battlefield,
        commands: mpsc::Receiver<TargetCommand>,
        events: mpsc::UnboundedSender<BattleEvent>,
    ) -> Self {
        Self {
            field,
            commands,
            events,
            ai_policy: AiPolicy::default(),
            selection_timeout: Duration::from_secs(SELECTION_TIMEOUT_SECS),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Fixed RNG seed, for reproducible battles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Runs rounds until one party falls or the player walks away.
    pub async fn run(mut self) -> BattleEnd {
        let mut round: u32 = 1;
        loop {
            info!(target: "battle", round, "computing turn order");
            let order = self.field.calculate_turns();
            self.emit_boards(&order);

            if !self.collect_player_selections().await {
                let _ = self.events.send(BattleEvent::Timeout(view::timeout_notice(
                    self.selection_timeout,
                )));
                info!(target: "battle", round, "selection timed out; battle aborted");
                return BattleEnd::Aborted;
            }

            self.assign_ai_targets();

            let results = self.resolve_round(&order);
            let _ = self.events.send(BattleEvent::RoundResults(results));

            if let Some(winner) = self.field.winner() {
                let owner_nickname = self.field.party(winner).owner_nickname.clone();
                let _ = self
                    .events
                    .send(BattleEvent::Winner(view::winner_banner(&owner_nickname)));
                info!(target: "battle", round, winner = %owner_nickname, "battle over");
                return BattleEnd::Winner {
                    party: winner,
                    owner_nickname,
                };
            }

            self.field.party_mut(PartyId::A).update();
            self.field.party_mut(PartyId::B).update();
            let _ = self
                .events
                .send(BattleEvent::RoundDivider(view::new_turn_banner()));
            round += 1;
        }
    }

    fn emit_boards(&self, order: &[CombatantRef]) {
        let party_a = self.field.party(PartyId::A);
        let _ = self.events.send(BattleEvent::Board {
            party: PartyId::A,
            header: view::party_header(&party_a.owner_nickname, PartyId::A),
            cards: view::party_board(party_a),
        });

        let party_b = self.field.party(PartyId::B);
        let _ = self.events.send(BattleEvent::Board {
            party: PartyId::B,
            header: format!(
                "{}{}",
                view::vs_divider(),
                view::party_header(&party_b.owner_nickname, PartyId::B)
            ),
            cards: view::party_board(party_b),
        });

        let _ = self.events.send(BattleEvent::TurnOrder {
            header: format!("{}{}", view::divider(), view::turn_order_header()),
            cards: order
                .iter()
                .map(|&handle| view::card_view(self.field.combatant(handle)))
                .collect(),
        });
    }

    /// Blocks for the player's targeting commands until the party reports
    /// selection done. Returns false when a wait window expires; the caller
    /// aborts without touching battle state, so no action is ever left half
    /// evaluated and `update()` is safely skipped.
    async fn collect_player_selections(&mut self) -> bool {
        let _ = self.events.send(BattleEvent::SelectionPrompt(
            view::selection_prompt(self.selection_timeout),
        ));
        while !self.field.party(PartyId::A).is_selection_done() {
            let deadline = Instant::now() + self.selection_timeout;
            // One command per window; invalid input does not consume the wait.
            loop {
                match self.poll_selection(deadline).await {
                    SelectionPoll::Received { slot, destination } => {
                        self.apply_selection(slot, destination);
                        break;
                    }
                    SelectionPoll::Ignored => continue,
                    SelectionPoll::TimedOut => return false,
                }
            }
        }
        true
    }

    /// One blocking wait on the command channel, bounded by `deadline`.
    /// A closed channel counts as the player walking away.
    pub async fn poll_selection(&mut self, deadline: Instant) -> SelectionPoll {
        let command = match timeout_at(deadline, self.commands.recv()).await {
            Err(_) | Ok(None) => return SelectionPoll::TimedOut,
            Ok(Some(command)) => command,
        };
        let Some(slot) = Slot::from_command_index(command.actor_slot) else {
            debug!(target: "battle.select", actor_slot = command.actor_slot, "out-of-range slot ignored");
            return SelectionPoll::Ignored;
        };
        if self.field.party(PartyId::A).get(slot).is_defeated() {
            debug!(target: "battle.select", actor_slot = command.actor_slot, "defeated card ignored");
            return SelectionPoll::Ignored;
        }
        SelectionPoll::Received {
            slot,
            destination: command.destination,
        }
    }

    fn apply_selection(&mut self, slot: Slot, destination: TargetChoice) {
        let card = self.field.party_mut(PartyId::A).get_mut(slot);
        card.set_target(destination);
        let ack = view::selection_ack(&card.name, &card.owner_nickname, destination);
        let _ = self.events.send(BattleEvent::SelectionAck(ack));
    }

    /// Synchronously hands every living AI card a target.
    fn assign_ai_targets(&mut self) {
        for slot in Slot::ALL {
            if self.field.party(PartyId::B).get(slot).is_defeated() {
                continue;
            }
            let destination = match self.ai_policy {
                AiPolicy::AlwaysFront => TargetChoice::Frontline,
                AiPolicy::RandomLiving => {
                    let enemy = self.field.party(PartyId::A);
                    let backline_up = !enemy.get(Slot::Back1).is_defeated()
                        || !enemy.get(Slot::Back2).is_defeated();
                    if backline_up && self.rng.random_bool(0.5) {
                        TargetChoice::Backline
                    } else {
                        TargetChoice::Frontline
                    }
                }
            };
            let card = self.field.party_mut(PartyId::B).get_mut(slot);
            card.set_target(destination);
            let ack = view::selection_ack(&card.name, &card.owner_nickname, destination);
            let _ = self.events.send(BattleEvent::SelectionAck(ack));
        }
    }

    /// Builds one action per living card in turn order, then evaluates the
    /// whole queue. Backline choices resolve through the opposing party's
    /// random-backline lookup at construction time.
    fn resolve_round(&mut self, order: &[CombatantRef]) -> String {
        for &handle in order {
            let card = self.field.combatant(handle);
            if card.is_defeated() {
                continue;
            }
            let Some(choice) = card.target else { continue };
            let enemy = self.field.opposing_party_of(handle);
            let target_slot = match choice {
                TargetChoice::Frontline => Slot::Front,
                TargetChoice::Backline => {
                    self.field.party(enemy).random_backline_slot(&mut self.rng)
                }
            };
            self.field
                .add(Action::new(handle, target_slot, Ability::BasicAttack));
        }
        self.field.evaluate(&mut self.rng)
    }
}
