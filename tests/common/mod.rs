use oc_arena::{Attributes, Combatant, Slot};

/// Bare combatant for engine tests; owner identity gets stamped by the party.
pub fn card(name: &str, hp: i32, atk: i32, spd: i32, luck: i32) -> Combatant {
    let attributes = Attributes {
        hp,
        max_hp: hp,
        atk,
        spd,
        luck,
    };
    Combatant {
        id: 0,
        name: name.to_string(),
        owner_nickname: String::new(),
        owner_id: None,
        stars: 1,
        active: true,
        attributes,
        base: attributes,
        art_path: format!("art/{name}.png"),
        lore: String::new(),
        ability1: 0,
        ability2: 1,
        target: None,
        position: Slot::Front,
    }
}
