/// Cards in the Mayor's hand after every draw.
pub const HAND_SIZE: usize = 4;

/// Cards the Mayor must reveal to the advisors each turn.
pub const REVEALS_PER_TURN: usize = 2;

/// Hexes each advisor nominates per turn.
pub const NOMINATIONS_PER_ADVISOR: usize = 2;

/// Facilities of each friendly suit (by reality) that complete the city.
pub const FACILITIES_GOAL: u32 = 10;

/// Seats in a game session.
pub const REQUIRED_PLAYERS: usize = 3;
