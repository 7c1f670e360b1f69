mod common;

use common::card;
use oc_arena::battle::action::{Ability, Action};
use oc_arena::{Battlefield, CombatantRef, Party, PartyId, Slot};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field_with(
    x: [(&'static str, i32, i32, i32, i32); 3],
    y: [(&'static str, i32, i32, i32, i32); 3],
) -> Battlefield {
    let build = |cards: [(&'static str, i32, i32, i32, i32); 3], nick: &str, id: Option<&str>| {
        Party::new(
            cards
                .iter()
                .map(|&(name, hp, atk, spd, luck)| card(name, hp, atk, spd, luck))
                .collect(),
            nick,
            id,
        )
        .unwrap()
    };
    Battlefield::new(
        build(x, "OwnerA", Some("100")),
        build(y, "OwnerB", None),
    )
}

fn basic_attack(actor: CombatantRef, target_slot: Slot) -> Action {
    Action::new(actor, target_slot, Ability::BasicAttack)
}

const A_FRONT: CombatantRef = CombatantRef {
    party: PartyId::A,
    slot: Slot::Front,
};

#[test]
fn damage_floors_at_zero() {
    let attacker = card("Hammer", 10, 100, 1, 1);
    let mut victim = card("Glass", 5, 1, 1, 1);
    let felled = attacker.attack(&mut victim);
    assert!(felled);
    assert_eq!(victim.attributes.hp, 0);
}

#[test]
fn defeated_attacker_is_a_soft_noop() {
    let attacker = card("Fallen", 0, 100, 1, 1);
    let mut victim = card("Lucky", 30, 1, 1, 1);
    assert!(!attacker.attack(&mut victim));
    assert!(!attacker.attack(&mut victim));
    assert_eq!(victim.attributes.hp, 30);
}

#[test]
fn dex_shows_base_stats_after_damage() {
    let attacker = card("Hammer", 10, 4, 1, 1);
    let mut victim = card("Tank", 40, 1, 1, 1);
    attacker.attack(&mut victim);
    assert_eq!(victim.attributes.hp, 36);

    let (_, dex) = victim.generate_dex_string();
    assert!(dex.contains("HP: 40"));
    let (_, stats) = victim.show_current_stats();
    assert!(stats.contains("HP: 36 / 40"));
}

#[test]
fn turn_order_is_fastest_first_and_skips_the_dead() {
    let mut field = field_with(
        [("A1", 50, 10, 12, 1), ("A2", 30, 5, 8, 1), ("A3", 20, 5, 7, 1)],
        [("B1", 40, 8, 10, 1), ("B2", 20, 6, 9, 1), ("B3", 0, 6, 20, 1)],
    );
    let order = field.calculate_turns();
    assert_eq!(order.len(), 5);
    let names: Vec<&str> = order
        .iter()
        .map(|&h| field.combatant(h).name.as_str())
        .collect();
    assert_eq!(names, vec!["A1", "B1", "B2", "A2", "A3"]);
    assert_eq!(field.turn_queue(), order.as_slice());
}

#[test]
fn luck_breaks_speed_ties() {
    let mut field = field_with(
        [("A1", 50, 10, 10, 2), ("A2", 30, 5, 8, 1), ("A3", 20, 5, 7, 1)],
        [("B1", 40, 8, 10, 9), ("B2", 20, 6, 9, 1), ("B3", 20, 6, 6, 1)],
    );
    let order = field.calculate_turns();
    let first = field.combatant(order[0]);
    assert_eq!(first.name, "B1");
}

#[test]
fn remaining_ties_keep_party_a_first() {
    let mut field = field_with(
        [("A1", 50, 10, 10, 3), ("A2", 30, 5, 8, 1), ("A3", 20, 5, 7, 1)],
        [("B1", 40, 8, 10, 3), ("B2", 20, 6, 9, 1), ("B3", 20, 6, 6, 1)],
    );
    let order = field.calculate_turns();
    assert_eq!(field.combatant(order[0]).name, "A1");
    assert_eq!(field.combatant(order[1]).name, "B1");
}

#[test]
fn single_strike_scenario() {
    // X's front acts first on Y's front: 40 - 10 leaves exactly 30, nobody down.
    let mut field = field_with(
        [("X1", 50, 10, 12, 1), ("X2", 30, 5, 8, 1), ("X3", 20, 5, 7, 1)],
        [("Y1", 40, 8, 10, 1), ("Y2", 20, 6, 9, 1), ("Y3", 20, 6, 6, 1)],
    );
    let order = field.calculate_turns();
    assert_eq!(field.combatant(order[0]).name, "X1");

    field.add(basic_attack(A_FRONT, Slot::Front));
    let mut rng = StdRng::seed_from_u64(3);
    let text = field.evaluate(&mut rng);

    let y_front = field.party(PartyId::B).get(Slot::Front);
    assert_eq!(y_front.attributes.hp, 30);
    assert!(!y_front.is_defeated());
    assert!(text.contains("**OwnerA:** X1 (50/50) strikes Y1 (30/40) with 10 damage!"));
    assert!(field
        .party(PartyId::A)
        .combatants()
        .iter()
        .chain(field.party(PartyId::B).combatants())
        .all(|c| !c.is_defeated()));
}

#[test]
fn killing_blow_marks_defeat_and_leaves_the_turn_queue() {
    let mut field = field_with(
        [("X1", 50, 10, 12, 1), ("X2", 30, 5, 8, 1), ("X3", 20, 5, 7, 1)],
        [("Y1", 5, 8, 10, 1), ("Y2", 20, 6, 9, 1), ("Y3", 20, 6, 6, 1)],
    );
    field.calculate_turns();
    field.add(basic_attack(A_FRONT, Slot::Front));
    let mut rng = StdRng::seed_from_u64(3);
    let text = field.evaluate(&mut rng);

    let y_front = field.party(PartyId::B).get(Slot::Front);
    assert_eq!(y_front.attributes.hp, 0);
    assert!(y_front.is_defeated());
    assert!(!y_front.active);
    assert!(text.contains("defeats Y1 (0/5)"));

    let order = field.calculate_turns();
    assert_eq!(order.len(), 5);
    assert!(order
        .iter()
        .all(|&h| field.combatant(h).name != "Y1"));
}

#[test]
fn defeated_target_rerolls_to_a_living_card() {
    let mut field = field_with(
        [("X1", 50, 10, 12, 1), ("X2", 30, 5, 8, 1), ("X3", 20, 5, 7, 1)],
        [("Y1", 0, 8, 10, 1), ("Y2", 0, 6, 9, 1), ("Y3", 20, 6, 6, 1)],
    );
    field.add(basic_attack(A_FRONT, Slot::Front));
    let mut rng = StdRng::seed_from_u64(3);
    let text = field.evaluate(&mut rng);

    // Only Y3 is alive, so the re-roll must land there.
    assert!(text.contains("strikes Y3 (10/20)"));
    assert_eq!(field.party(PartyId::B).get(Slot::Back2).attributes.hp, 10);
}

#[test]
fn attack_into_a_dead_party_is_an_empty_noop() {
    let mut field = field_with(
        [("X1", 50, 10, 12, 1), ("X2", 30, 5, 8, 1), ("X3", 20, 5, 7, 1)],
        [("Y1", 0, 8, 10, 1), ("Y2", 0, 6, 9, 1), ("Y3", 0, 6, 6, 1)],
    );
    let before = field.party(PartyId::B).clone();
    field.add(basic_attack(A_FRONT, Slot::Front));
    let mut rng = StdRng::seed_from_u64(3);
    let text = field.evaluate(&mut rng);
    assert_eq!(text, "");
    assert_eq!(*field.party(PartyId::B), before);
}

#[test]
fn evaluation_prunes_expired_actions() {
    let mut field = field_with(
        [("X1", 50, 10, 12, 1), ("X2", 30, 5, 8, 1), ("X3", 20, 5, 7, 1)],
        [("Y1", 40, 8, 10, 1), ("Y2", 20, 6, 9, 1), ("Y3", 20, 6, 6, 1)],
    );
    field.add(basic_attack(A_FRONT, Slot::Front));
    assert_eq!(field.pending_actions(), 1);
    let mut rng = StdRng::seed_from_u64(3);
    field.evaluate(&mut rng);
    assert_eq!(field.pending_actions(), 0);
}

#[test]
fn double_defeat_reports_party_b() {
    let mut field = field_with(
        [("X1", 0, 1, 1, 1), ("X2", 0, 1, 1, 1), ("X3", 0, 1, 1, 1)],
        [("Y1", 0, 1, 1, 1), ("Y2", 0, 1, 1, 1), ("Y3", 0, 1, 1, 1)],
    );
    assert_eq!(field.winner(), Some(PartyId::B));

    field = field_with(
        [("X1", 10, 1, 1, 1), ("X2", 0, 1, 1, 1), ("X3", 0, 1, 1, 1)],
        [("Y1", 0, 1, 1, 1), ("Y2", 0, 1, 1, 1), ("Y3", 0, 1, 1, 1)],
    );
    assert_eq!(field.winner(), Some(PartyId::A));

    field = field_with(
        [("X1", 10, 1, 1, 1), ("X2", 0, 1, 1, 1), ("X3", 0, 1, 1, 1)],
        [("Y1", 10, 1, 1, 1), ("Y2", 0, 1, 1, 1), ("Y3", 0, 1, 1, 1)],
    );
    assert_eq!(field.winner(), None);
}

#[test]
#[should_panic(expected = "invalid get_party index")]
fn get_party_rejects_out_of_range_indices() {
    let field = field_with(
        [("X1", 10, 1, 1, 1), ("X2", 10, 1, 1, 1), ("X3", 10, 1, 1, 1)],
        [("Y1", 10, 1, 1, 1), ("Y2", 10, 1, 1, 1), ("Y3", 10, 1, 1, 1)],
    );
    let _ = field.get_party(2);
}
