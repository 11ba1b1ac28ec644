use rand::prelude::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::{Card, Rank};
use crate::engine::models::player::{Advisor, Role};
use crate::engine::state::{ControlChoice, GameState, Intent, Phase};

/// A synthetic intent source for bot-held seats.
///
/// Bots go through exactly the same intent pipeline as remote players;
/// there is no bot-specific path in the rules. This agent plays legally
/// but naively: it reveals in hand order, skips control, nominates
/// random frontier hexes (telling the truth about half the time), and
/// builds at random.
pub struct BotAgent {
    rng: ChaCha8Rng,
}

impl BotAgent {
    pub fn new(seed: u64) -> Self {
        BotAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Produce the next intent for `role`, or `None` when it is not this
    /// role's move.
    pub fn next_intent(&mut self, state: &GameState, role: Role) -> Option<Intent> {
        if state.expected_actor() != Some(role) {
            return None;
        }
        match state.phase() {
            Phase::Draw => {
                let card_index =
                    (0..state.hand().len()).find(|i| !state.revealed().contains(i))?;
                Some(Intent::Reveal { card_index })
            }
            Phase::Control => Some(Intent::Control {
                choice: ControlChoice::None,
            }),
            Phase::Nominate => {
                let advisor = match role {
                    Role::Industry => Advisor::Industry,
                    Role::Urbanist => Advisor::Urbanist,
                    Role::Mayor => return None,
                };
                let taken: Vec<CubeCoord> =
                    state.commits_for(advisor).iter().map(|n| n.hex).collect();
                let mut options: Vec<CubeCoord> = state
                    .frontier()
                    .into_iter()
                    .filter(|hex| !taken.contains(hex))
                    .collect();
                if state.sub_phase().is_first_commit() {
                    if let Some(forced) = state.control().forced_hex(advisor) {
                        options.retain(|hex| *hex == forced);
                    }
                }
                let hex = *options.choose(&mut self.rng)?;
                let claim = self.claim_for(state, advisor, hex);
                Some(Intent::Commit { advisor, hex, claim })
            }
            Phase::Place => {
                if state.hand().is_empty() {
                    return None;
                }
                let card_index = self.rng.gen_range(0..state.hand().len());
                let hex = state.nominations().choose(&mut self.rng)?.hex;
                Some(Intent::Place { card_index, hex })
            }
            Phase::Lobby | Phase::GameOver => None,
        }
    }

    fn claim_for(&mut self, state: &GameState, advisor: Advisor, hex: CubeCoord) -> Card {
        if state.sub_phase().is_first_commit() {
            if let Some(suit) = state.control().forced_suit(advisor) {
                return Card::new(suit, self.random_rank());
            }
        }
        // tell the truth about half the time, improvise otherwise
        match state.reality_at(hex) {
            Some(card) if self.rng.gen_bool(0.5) => card,
            _ => self.random_card(),
        }
    }

    fn random_rank(&mut self) -> Rank {
        Rank::ALL[self.rng.gen_range(0..Rank::ALL.len())]
    }

    fn random_card(&mut self) -> Card {
        match Card::from_index(self.rng.gen_range(0..Card::UNIVERSE_SIZE)) {
            Some(card) => card,
            None => Card::new(crate::engine::models::cards::Suit::Hearts, Rank::Two),
        }
    }
}
