// Central constants for party sizing and round pacing.
pub const PARTY_SIZE: usize = 3;
/// Seconds a player has to enter each targeting command before the battle is called off.
pub const SELECTION_TIMEOUT_SECS: u64 = 60;
/// Star cap shown on dex entries.
pub const MAX_STARS: u8 = 5;
/// Column gap between HP readouts on a party line; matches the board art layout.
pub const HP_LINE_SPACING: usize = 28;
