use crate::engine::constants::{FACILITIES_GOAL, HAND_SIZE, REVEALS_PER_TURN};

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Deterministic shuffle seed; `None` picks a random one.
    pub seed: Option<u64>,
    /// Rule variant: whether the Mayor gets a CONTROL step between the
    /// reveal and the nominations.
    pub control_enabled: bool,
    pub hand_size: usize,
    pub reveals_per_turn: usize,
    pub facilities_goal: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            control_enabled: false,
            hand_size: HAND_SIZE,
            reveals_per_turn: REVEALS_PER_TURN,
            facilities_goal: FACILITIES_GOAL,
        }
    }
}

impl GameConfig {
    /// Convenience for deterministic tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
