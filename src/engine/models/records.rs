use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::{Card, Suit};
use crate::engine::models::player::{Advisor, Role};

/// One advisor commitment: a frontier hex plus the card the advisor
/// claims is buried there. The claim is what the advisor *says*, which
/// need not match the tile's reality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nomination {
    pub hex: CubeCoord,
    pub claim: Card,
    pub advisor: Advisor,
}

/// The record of one completed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub turn: u32,
    pub card: Card,
    pub hex: CubeCoord,
    pub winning_role: Option<Role>,
    pub winning_claim: Option<Card>,
}

/// Score ledger. Only the mine penalty ever decrements an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub mayor: i32,
    pub industry: i32,
    pub urbanist: i32,
}

impl Scores {
    pub fn apply(&mut self, delta: &ScoreDelta) {
        self.mayor += delta.mayor;
        self.industry += delta.industry;
        self.urbanist += delta.urbanist;
    }

    pub fn get(&self, role: Role) -> i32 {
        match role {
            Role::Mayor => self.mayor,
            Role::Industry => self.industry,
            Role::Urbanist => self.urbanist,
        }
    }
}

/// Per-placement score change, produced by the scoring functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    pub mayor: i32,
    pub industry: i32,
    pub urbanist: i32,
}

impl ScoreDelta {
    pub fn advisor_mut(&mut self, advisor: Advisor) -> &mut i32 {
        match advisor {
            Advisor::Industry => &mut self.industry,
            Advisor::Urbanist => &mut self.urbanist,
        }
    }
}

/// Built-facility tally by reality suit; the Mayor's endgame condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facilities {
    pub hearts: u32,
    pub diamonds: u32,
}

impl Facilities {
    pub fn record(&mut self, reality_suit: Suit) {
        match reality_suit {
            Suit::Hearts => self.hearts += 1,
            Suit::Diamonds => self.diamonds += 1,
            Suit::Spades => {}
        }
    }
}

/// One completed turn, kept for the whole session so clients can reason
/// about past claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn: u32,
    pub revealed: Vec<usize>,
    pub nominations: Vec<Nomination>,
    pub placement: Placement,
    pub reality: Card,
    pub score_delta: ScoreDelta,
}
