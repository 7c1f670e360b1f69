//! A single OC card's battle state: stats, owner identity, target bookkeeping.

use crate::catalog::{Catalog, CatalogError};
use crate::constants::MAX_STARS;

/// The quantitative stats affected by combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub hp: i32,
    pub max_hp: i32,
    pub atk: i32,
    pub spd: i32,
    pub luck: i32,
}

/// Formation slot within a party: 0 front, 1 back-left, 2 back-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Front,
    Back1,
    Back2,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Front, Slot::Back1, Slot::Back2];

    pub fn index(self) -> usize {
        match self {
            Slot::Front => 0,
            Slot::Back1 => 1,
            Slot::Back2 => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    /// 1-based card position as typed in chat commands (`!oc 2 back`).
    pub fn from_command_index(index: usize) -> Option<Slot> {
        Slot::from_index(index.checked_sub(1)?)
    }

    pub fn is_backline(self) -> bool {
        !matches!(self, Slot::Front)
    }
}

/// Where a combatant intends to strike in the coming resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChoice {
    Frontline,
    Backline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    /// Catalog ID this card was built from.
    pub id: u32,
    pub name: String,
    pub owner_nickname: String,
    /// None for AI-controlled combatants.
    pub owner_id: Option<String>,
    pub stars: u8,
    /// Cleared exactly once per defeat; kept separate from HP so a card can
    /// be forced out of the fight without zeroing its HP.
    pub active: bool,
    pub attributes: Attributes,
    /// Snapshot taken at creation, shown on the dex and never touched by combat.
    pub base: Attributes,
    pub art_path: String,
    pub lore: String,
    /// Placeholder ability references carried from the catalog.
    pub ability1: i32,
    pub ability2: i32,
    pub target: Option<TargetChoice>,
    /// Current slot, kept in sync by the owning party.
    pub position: Slot,
}

impl Combatant {
    /// Builds a battle-ready card from catalog data. Unknown IDs surface here
    /// as a reportable error instead of a fault mid-battle.
    pub fn from_catalog(catalog: &Catalog, id: u32) -> Result<Self, CatalogError> {
        let record = catalog.get(id)?;
        let attributes = Attributes {
            hp: record.base_hp,
            max_hp: record.base_hp,
            atk: record.base_attack,
            spd: record.base_speed,
            luck: record.base_luck,
        };
        Ok(Self {
            id,
            name: record.name.clone(),
            owner_nickname: String::new(),
            owner_id: None,
            stars: record.base_stars,
            active: true,
            attributes,
            base: attributes,
            art_path: record.art_path.clone(),
            lore: record.lore.clone(),
            ability1: record.ability1,
            ability2: record.ability2,
            target: None,
            position: Slot::Front,
        })
    }

    /// Stamped by the party that takes this card in.
    pub fn set_owner(&mut self, nickname: &str, owner_id: Option<&str>) {
        self.owner_nickname = nickname.to_string();
        self.owner_id = owner_id.map(str::to_string);
    }

    /// Last write wins; validity of the choice is the caller's problem.
    pub fn set_target(&mut self, choice: TargetChoice) {
        self.target = Some(choice);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Marks the card as formally out of the fight. Idempotent.
    pub fn set_defeated(&mut self) {
        self.active = false;
    }

    pub fn is_defeated(&self) -> bool {
        !self.active || self.attributes.hp <= 0
    }

    /// Applies this card's basic strike to `target`. A defeated attacker is a
    /// soft no-op. Damage floors at 0 HP; returns whether the blow left the
    /// target at exactly 0.
    pub fn attack(&self, target: &mut Combatant) -> bool {
        if self.is_defeated() {
            return false;
        }
        target.attributes.hp = (target.attributes.hp - self.attributes.atk).max(0);
        target.attributes.hp == 0
    }

    pub fn hp_string(&self) -> String {
        format!("{}/{}", self.attributes.hp, self.attributes.max_hp)
    }

    /// Current (post-damage) stats as an (art path, text) pair for display.
    pub fn show_current_stats(&self) -> (String, String) {
        let mut text = String::from("**STATS**\n```CSS\n");
        text.push_str(&format!(
            "HP: {} / {}\n",
            self.attributes.hp, self.attributes.max_hp
        ));
        text.push_str(&format!("Attack: {}\n", self.attributes.atk));
        text.push_str(&format!("Speed: {}\n", self.attributes.spd));
        text.push_str(&format!("Luck: {}\n", self.attributes.luck));
        text.push_str("```\n");
        (self.art_path.clone(), text)
    }

    /// Dex entry built from the immutable base snapshot.
    pub fn generate_dex_string(&self) -> (String, String) {
        let stars = usize::from(self.stars.min(MAX_STARS));
        let stars_line = ":star2:".repeat(stars)
            + &":eight_pointed_black_star:".repeat(usize::from(MAX_STARS) - stars);

        let mut text = format!("**{}**\n{}\n> {}\n", self.name, stars_line, self.lore);
        text.push_str("**BASE STATS**\n```CSS\n");
        text.push_str(&format!("HP: {}\n", self.base.max_hp));
        text.push_str(&format!("Attack: {}\n", self.base.atk));
        text.push_str(&format!("Speed: {}\n", self.base.spd));
        text.push_str(&format!("Luck: {}\n", self.base.luck));
        text.push_str("```\n");
        (self.art_path.clone(), text)
    }
}
