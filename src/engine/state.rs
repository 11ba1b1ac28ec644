use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use crate::engine::deck::CardPile;
use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::{Card, Rank, Suit};
use crate::engine::models::config::GameConfig;
use crate::engine::models::player::{Advisor, Role};
use crate::engine::models::records::{Facilities, Nomination, Placement, Scores, TurnRecord};
use crate::engine::phases;
use crate::engine::reality::RealityMap;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid configuration")]
    InvalidConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lobby,
    Draw,
    Control,
    Nominate,
    Place,
    GameOver,
}

impl Phase {
    pub fn index(self) -> u8 {
        match self {
            Phase::Lobby => 0,
            Phase::Draw => 1,
            Phase::Control => 2,
            Phase::Nominate => 3,
            Phase::Place => 4,
            Phase::GameOver => 5,
        }
    }

    pub fn from_index(idx: u8) -> Option<Phase> {
        [
            Phase::Lobby,
            Phase::Draw,
            Phase::Control,
            Phase::Nominate,
            Phase::Place,
            Phase::GameOver,
        ]
        .get(idx as usize)
        .copied()
    }
}

/// The fixed commit order inside NOMINATE: Industry twice, then Urbanist
/// twice, then the Mayor may place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPhase {
    IndustryCommit1,
    IndustryCommit2,
    UrbanistCommit1,
    UrbanistCommit2,
    PlaceReady,
}

impl SubPhase {
    pub fn expected_advisor(self) -> Option<Advisor> {
        match self {
            SubPhase::IndustryCommit1 | SubPhase::IndustryCommit2 => Some(Advisor::Industry),
            SubPhase::UrbanistCommit1 | SubPhase::UrbanistCommit2 => Some(Advisor::Urbanist),
            SubPhase::PlaceReady => None,
        }
    }

    /// Whether this is the advisor's first commit of the turn; forced
    /// constraints only bind the first one.
    pub fn is_first_commit(self) -> bool {
        matches!(self, SubPhase::IndustryCommit1 | SubPhase::UrbanistCommit1)
    }

    pub(crate) fn next(self) -> SubPhase {
        match self {
            SubPhase::IndustryCommit1 => SubPhase::IndustryCommit2,
            SubPhase::IndustryCommit2 => SubPhase::UrbanistCommit1,
            SubPhase::UrbanistCommit1 => SubPhase::UrbanistCommit2,
            SubPhase::UrbanistCommit2 | SubPhase::PlaceReady => SubPhase::PlaceReady,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SubPhase::IndustryCommit1 => "industry_commit_1",
            SubPhase::IndustryCommit2 => "industry_commit_2",
            SubPhase::UrbanistCommit1 => "urbanist_commit_1",
            SubPhase::UrbanistCommit2 => "urbanist_commit_2",
            SubPhase::PlaceReady => "place_ready",
        }
    }

    pub fn from_key(key: &str) -> Option<SubPhase> {
        [
            SubPhase::IndustryCommit1,
            SubPhase::IndustryCommit2,
            SubPhase::UrbanistCommit1,
            SubPhase::UrbanistCommit2,
            SubPhase::PlaceReady,
        ]
        .into_iter()
        .find(|s| s.key() == key)
    }
}

/// The Mayor's CONTROL-phase choice (rule variant; defaults to `None`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlChoice {
    #[default]
    None,
    ForceSuits { industry: Suit, urbanist: Suit },
    ForceHexes { industry: CubeCoord, urbanist: CubeCoord },
}

impl ControlChoice {
    pub fn forced_suit(&self, advisor: Advisor) -> Option<Suit> {
        match (self, advisor) {
            (ControlChoice::ForceSuits { industry, .. }, Advisor::Industry) => Some(*industry),
            (ControlChoice::ForceSuits { urbanist, .. }, Advisor::Urbanist) => Some(*urbanist),
            _ => None,
        }
    }

    pub fn forced_hex(&self, advisor: Advisor) -> Option<CubeCoord> {
        match (self, advisor) {
            (ControlChoice::ForceHexes { industry, .. }, Advisor::Industry) => Some(*industry),
            (ControlChoice::ForceHexes { urbanist, .. }, Advisor::Urbanist) => Some(*urbanist),
            _ => None,
        }
    }
}

/// A player-submitted action. Invalid intents are silently ignored; the
/// boolean result only tells the caller whether a rebroadcast is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Reveal { card_index: usize },
    Control { choice: ControlChoice },
    Commit { advisor: Advisor, hex: CubeCoord, claim: Card },
    Place { card_index: usize, hex: CubeCoord },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    WrongPhase,
    WrongRole,
    InvalidHex,
    Duplicate,
    Constraint,
    Malformed,
}

/// Diagnostic tallies of silently rejected intents. Observational only;
/// duplicate and late messages from lagging peers are expected here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectStats {
    pub wrong_phase: u64,
    pub wrong_role: u64,
    pub invalid_hex: u64,
    pub duplicate: u64,
    pub constraint: u64,
    pub malformed: u64,
}

impl RejectStats {
    pub(crate) fn bump(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::WrongPhase => self.wrong_phase += 1,
            RejectReason::WrongRole => self.wrong_role += 1,
            RejectReason::InvalidHex => self.invalid_hex += 1,
            RejectReason::Duplicate => self.duplicate += 1,
            RejectReason::Constraint => self.constraint += 1,
            RejectReason::Malformed => self.malformed += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.wrong_phase
            + self.wrong_role
            + self.invalid_hex
            + self.duplicate
            + self.constraint
            + self.malformed
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AdvisorCommits {
    pub industry: Vec<Nomination>,
    pub urbanist: Vec<Nomination>,
}

impl AdvisorCommits {
    pub fn get(&self, advisor: Advisor) -> &[Nomination] {
        match advisor {
            Advisor::Industry => &self.industry,
            Advisor::Urbanist => &self.urbanist,
        }
    }

    pub fn push(&mut self, nomination: Nomination) {
        match nomination.advisor {
            Advisor::Industry => self.industry.push(nomination),
            Advisor::Urbanist => self.urbanist.push(nomination),
        }
    }

    pub fn clear(&mut self) {
        self.industry.clear();
        self.urbanist.clear();
    }
}

/// The authoritative game state. One instance per session, mutated only
/// through intents; everything the clients see is serialized from here.
pub struct GameState {
    pub(crate) config: GameConfig,
    seed: u64,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) phase: Phase,
    pub(crate) sub_phase: SubPhase,
    pub(crate) turn: u32,
    pub(crate) scores: Scores,
    pub(crate) pile: CardPile,
    pub(crate) hand: Vec<Card>,
    pub(crate) revealed: Vec<usize>,
    pub(crate) reality: RealityMap,
    pub(crate) built: Vec<CubeCoord>,
    pub(crate) commits: AdvisorCommits,
    pub(crate) nominations: Vec<Nomination>,
    pub(crate) control: ControlChoice,
    pub(crate) last_placement: Option<Placement>,
    pub(crate) history: Vec<TurnRecord>,
    pub(crate) facilities: Facilities,
    pub(crate) mayor_hit_mine: bool,
    pub(crate) city_complete: bool,
    pub(crate) rejects: RejectStats,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<GameState, GameError> {
        if config.hand_size == 0 || config.hand_size > Card::UNIVERSE_SIZE {
            return Err(GameError::InvalidConfig);
        }
        if config.reveals_per_turn == 0 || config.reveals_per_turn > config.hand_size {
            return Err(GameError::InvalidConfig);
        }
        if config.facilities_goal == 0 {
            return Err(GameError::InvalidConfig);
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pile = CardPile::standard(&mut rng);
        let mut reality = RealityMap::new(&mut rng);

        // the town center is pre-built and always an Ace of Hearts
        reality.assign(CubeCoord::ORIGIN, Card::new(Suit::Hearts, Rank::Ace));
        for adj in CubeCoord::ORIGIN.neighbors() {
            reality.reveal(adj, &mut rng);
        }
        let mut facilities = Facilities::default();
        facilities.record(Suit::Hearts);

        Ok(GameState {
            config,
            seed,
            rng,
            phase: Phase::Lobby,
            sub_phase: SubPhase::IndustryCommit1,
            turn: 0,
            scores: Scores::default(),
            pile,
            hand: Vec::new(),
            revealed: Vec::new(),
            reality,
            built: vec![CubeCoord::ORIGIN],
            commits: AdvisorCommits::default(),
            nominations: Vec::new(),
            control: ControlChoice::default(),
            last_placement: None,
            history: Vec::new(),
            facilities,
            mayor_hit_mine: false,
            city_complete: false,
            rejects: RejectStats::default(),
        })
    }

    /// Leave the lobby and deal the first hand.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Lobby {
            return self.reject(RejectReason::WrongPhase);
        }
        phases::enter_draw(self);
        true
    }

    // player intents; all validate defensively and no-op on failure

    pub fn reveal_card(&mut self, card_index: usize) -> bool {
        phases::apply_reveal(self, card_index)
    }

    pub fn choose_control(&mut self, choice: ControlChoice) -> bool {
        phases::apply_control(self, choice)
    }

    pub fn commit_nomination(&mut self, advisor: Advisor, hex: CubeCoord, claim: Card) -> bool {
        phases::apply_commit(self, advisor, hex, claim)
    }

    pub fn place_card(&mut self, card_index: usize, hex: CubeCoord) -> bool {
        phases::apply_place(self, card_index, hex)
    }

    /// Apply an intent on behalf of `role`, rejecting intents the role has
    /// no authority over.
    pub fn apply_intent(&mut self, role: Role, intent: Intent) -> bool {
        let authorized = match intent {
            Intent::Commit { advisor, .. } => advisor.role() == role,
            _ => role == Role::Mayor,
        };
        if !authorized {
            return self.reject(RejectReason::WrongRole);
        }
        match intent {
            Intent::Reveal { card_index } => self.reveal_card(card_index),
            Intent::Control { choice } => self.choose_control(choice),
            Intent::Commit { advisor, hex, claim } => self.commit_nomination(advisor, hex, claim),
            Intent::Place { card_index, hex } => self.place_card(card_index, hex),
        }
    }

    /// Which role the state machine is waiting on, if any.
    pub fn expected_actor(&self) -> Option<Role> {
        match self.phase {
            Phase::Lobby | Phase::GameOver => None,
            Phase::Draw | Phase::Control | Phase::Place => Some(Role::Mayor),
            Phase::Nominate => self.sub_phase.expected_advisor().map(Advisor::role),
        }
    }

    /// Hexes adjacent to the built city, in discovery order.
    pub fn frontier(&self) -> Vec<CubeCoord> {
        let mut seen: HashSet<CubeCoord> = HashSet::new();
        let mut frontier = Vec::new();
        for built in &self.built {
            for adj in built.neighbors() {
                if !self.is_built(adj) && seen.insert(adj) {
                    frontier.push(adj);
                }
            }
        }
        frontier
    }

    pub fn is_built(&self, hex: CubeCoord) -> bool {
        self.built.contains(&hex)
    }

    /// Frontier tiles with their realities; this is the advisors' view of
    /// the map and must never reach the Mayor.
    pub fn frontier_realities(&self) -> Vec<(CubeCoord, Card)> {
        self.frontier()
            .into_iter()
            .filter_map(|hex| self.reality.get(hex).map(|card| (hex, card)))
            .collect()
    }

    pub fn reality_at(&self, hex: CubeCoord) -> Option<Card> {
        self.reality.get(hex)
    }

    pub fn commits_for(&self, advisor: Advisor) -> &[Nomination] {
        self.commits.get(advisor)
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    // read accessors for the network layer and tests

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sub_phase(&self) -> SubPhase {
        self.sub_phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    pub fn built(&self) -> &[CubeCoord] {
        &self.built
    }

    pub fn nominations(&self) -> &[Nomination] {
        &self.nominations
    }

    pub fn control(&self) -> ControlChoice {
        self.control
    }

    pub fn last_placement(&self) -> Option<&Placement> {
        self.last_placement.as_ref()
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn facilities(&self) -> Facilities {
        self.facilities
    }

    pub fn mayor_hit_mine(&self) -> bool {
        self.mayor_hit_mine
    }

    pub fn city_complete(&self) -> bool {
        self.city_complete
    }

    pub fn rejects(&self) -> RejectStats {
        self.rejects
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Cards currently in the Mayor's circulation (deck + discard + hand).
    pub fn circulation_total(&self) -> usize {
        self.pile.total() + self.hand.len()
    }

    pub(crate) fn reject(&mut self, reason: RejectReason) -> bool {
        self.rejects.bump(reason);
        debug!(?reason, phase = ?self.phase, sub_phase = ?self.sub_phase, "intent ignored");
        false
    }

    pub(crate) fn assert_conservation(&self) {
        debug_assert_eq!(
            self.circulation_total(),
            Card::UNIVERSE_SIZE,
            "card conservation violated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(GameConfig::seeded(seed)).expect("valid config");
        assert!(state.start());
        state
    }

    fn reveal_two(state: &mut GameState) {
        assert!(state.reveal_card(0));
        assert!(state.reveal_card(1));
    }

    /// Find a seed whose initial frontier has a tile matching `pred`;
    /// returns the started state together with that tile.
    fn state_with_frontier_tile(pred: fn(Card) -> bool) -> (GameState, CubeCoord, Card) {
        for seed in 0..2_000 {
            let state = started(seed);
            if let Some((hex, card)) = state
                .frontier_realities()
                .into_iter()
                .find(|(_, card)| pred(*card))
            {
                return (state, hex, card);
            }
        }
        panic!("no seed produced a matching frontier tile");
    }

    fn claim(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    /// Walk both advisors through their commits targeting `a` and `b`.
    fn commit_all(state: &mut GameState, a: CubeCoord, b: CubeCoord, claim_card: Card) {
        assert!(state.commit_nomination(Advisor::Industry, a, claim_card));
        assert!(state.commit_nomination(Advisor::Industry, b, claim_card));
        assert!(state.commit_nomination(Advisor::Urbanist, a, claim_card));
        assert!(state.commit_nomination(Advisor::Urbanist, b, claim_card));
    }

    #[test]
    fn draw_deals_exactly_four_and_conserves_cards() {
        let state = started(1);
        assert_eq!(state.phase(), Phase::Draw);
        assert_eq!(state.hand().len(), 4);
        assert_eq!(state.circulation_total(), Card::UNIVERSE_SIZE);
        assert_eq!(state.turn(), 0);
        assert_eq!(state.built(), &[CubeCoord::ORIGIN]);
        assert_eq!(state.frontier().len(), 6);
    }

    #[test]
    fn reveal_gates_the_draw_phase() {
        let mut state = started(2);
        assert!(state.reveal_card(0));
        assert_eq!(state.phase(), Phase::Draw);
        // out-of-range and duplicate reveals are silent no-ops
        assert!(!state.reveal_card(9));
        assert!(!state.reveal_card(0));
        assert_eq!(state.revealed(), &[0]);
        assert!(state.reveal_card(3));
        assert_eq!(state.phase(), Phase::Nominate);
        assert_eq!(state.sub_phase(), SubPhase::IndustryCommit1);
    }

    #[test]
    fn sub_phases_accept_only_the_expected_advisor() {
        let mut state = started(3);
        reveal_two(&mut state);
        let frontier = state.frontier();
        let (a, b) = (frontier[0], frontier[1]);
        let c = claim(Suit::Hearts, Rank::Five);

        // Urbanist may not jump the queue
        assert!(!state.commit_nomination(Advisor::Urbanist, a, c));
        assert_eq!(state.sub_phase(), SubPhase::IndustryCommit1);

        assert!(state.commit_nomination(Advisor::Industry, a, c));
        assert_eq!(state.sub_phase(), SubPhase::IndustryCommit2);
        assert!(state.commit_nomination(Advisor::Industry, b, c));
        assert_eq!(state.sub_phase(), SubPhase::UrbanistCommit1);
        // nominations stay hidden until the fourth commit
        assert!(state.nominations().is_empty());
        assert!(state.commit_nomination(Advisor::Urbanist, b, c));
        assert!(state.commit_nomination(Advisor::Urbanist, a, c));

        assert_eq!(state.phase(), Phase::Place);
        assert_eq!(state.sub_phase(), SubPhase::PlaceReady);
        assert_eq!(state.nominations().len(), 4);
    }

    #[test]
    fn duplicate_and_invalid_hexes_are_rejected() {
        let mut state = started(4);
        reveal_two(&mut state);
        let frontier = state.frontier();
        let c = claim(Suit::Diamonds, Rank::Nine);

        assert!(state.commit_nomination(Advisor::Industry, frontier[0], c));
        // same hex again for the same advisor
        assert!(!state.commit_nomination(Advisor::Industry, frontier[0], c));
        assert_eq!(state.commits_for(Advisor::Industry).len(), 1);
        // built hex
        assert!(!state.commit_nomination(Advisor::Industry, CubeCoord::ORIGIN, c));
        // not adjacent to anything built
        assert!(!state.commit_nomination(Advisor::Industry, CubeCoord::new(5, -5, 0), c));
        // malformed coordinate
        assert!(!state.commit_nomination(Advisor::Industry, CubeCoord::new(1, 1, 1), c));
        assert_eq!(state.commits_for(Advisor::Industry).len(), 1);
        assert!(state.rejects().total() >= 4);
    }

    #[test]
    fn placement_scores_and_rolls_into_the_next_turn() {
        let (mut state, hex, reality) = state_with_frontier_tile(|card| card.suit != Suit::Spades);
        reveal_two(&mut state);
        let other = state
            .frontier()
            .into_iter()
            .find(|h| *h != hex)
            .expect("frontier has more than one tile");
        // Industry claims the tile's true suit
        commit_all(&mut state, hex, other, claim(reality.suit, Rank::Five));

        // play a card of the claimed suit: the Mayor trusts the claim
        let card_index = state
            .hand()
            .iter()
            .position(|card| card.suit == reality.suit)
            .unwrap_or(0);
        assert!(state.place_card(card_index, hex));

        assert!(!state.is_over());
        assert_eq!(state.turn(), 1);
        assert_eq!(state.phase(), Phase::Draw);
        assert_eq!(state.hand().len(), 4);
        assert!(state.is_built(hex));
        assert_eq!(state.circulation_total(), Card::UNIVERSE_SIZE);
        assert!(state.nominations().is_empty());

        let record = state.history().last().expect("one turn recorded");
        assert_eq!(record.turn, 0);
        assert_eq!(record.placement.hex, hex);
        assert_eq!(record.reality, reality);
        // both advisors claimed the true suit, so both were either trusted
        // or vindicated
        assert_eq!(state.scores().industry, 1);
        assert_eq!(state.scores().urbanist, 1);
    }

    #[test]
    fn placing_on_a_mine_ends_the_game() {
        let (mut state, hex, _) = state_with_frontier_tile(|card| card.suit == Suit::Spades);
        reveal_two(&mut state);
        let other = state
            .frontier()
            .into_iter()
            .find(|h| *h != hex)
            .expect("frontier has more than one tile");
        // Industry warns honestly, Urbanist lies about the mine
        assert!(state.commit_nomination(Advisor::Industry, hex, claim(Suit::Spades, Rank::Five)));
        assert!(state.commit_nomination(Advisor::Industry, other, claim(Suit::Hearts, Rank::Two)));
        assert!(state.commit_nomination(Advisor::Urbanist, hex, claim(Suit::Diamonds, Rank::Nine)));
        assert!(state.commit_nomination(Advisor::Urbanist, other, claim(Suit::Hearts, Rank::Two)));

        assert!(state.place_card(0, hex));
        assert!(state.mayor_hit_mine());
        assert!(!state.city_complete());
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.scores().industry, 1);
        assert_eq!(state.scores().urbanist, -2);

        // the game is over; nothing moves any more
        assert!(!state.place_card(0, other));
        assert!(!state.reveal_card(0));
        assert_eq!(state.expected_actor(), None);
    }

    #[test]
    fn city_completes_at_the_facilities_goal() {
        // goal of 1: the town center already counts as the Hearts facility,
        // so a single Diamonds-reality build completes the city
        for seed in 0..2_000 {
            let mut config = GameConfig::seeded(seed);
            config.facilities_goal = 1;
            let mut state = GameState::new(config).expect("valid config");
            assert!(state.start());
            let diamond = state
                .frontier_realities()
                .into_iter()
                .find(|(_, card)| card.suit == Suit::Diamonds);
            let Some((hex, _)) = diamond else { continue };

            reveal_two(&mut state);
            let other = state
                .frontier()
                .into_iter()
                .find(|h| *h != hex)
                .expect("frontier has more than one tile");
            commit_all(&mut state, hex, other, claim(Suit::Diamonds, Rank::Five));
            assert!(state.place_card(0, hex));
            assert!(state.city_complete());
            assert!(!state.mayor_hit_mine());
            assert_eq!(state.phase(), Phase::GameOver);
            return;
        }
        panic!("no seed put a Diamonds tile on the initial frontier");
    }

    #[test]
    fn control_constraints_bind_the_first_commit_only() {
        let mut config = GameConfig::seeded(5);
        config.control_enabled = true;
        let mut state = GameState::new(config).expect("valid config");
        assert!(state.start());
        reveal_two(&mut state);
        assert_eq!(state.phase(), Phase::Control);

        // advisors cannot commit during CONTROL
        let frontier = state.frontier();
        assert!(!state.commit_nomination(
            Advisor::Industry,
            frontier[0],
            claim(Suit::Hearts, Rank::Two)
        ));

        assert!(state.choose_control(ControlChoice::ForceSuits {
            industry: Suit::Diamonds,
            urbanist: Suit::Hearts,
        }));
        assert_eq!(state.phase(), Phase::Nominate);

        // first commit must use the forced suit
        assert!(!state.commit_nomination(
            Advisor::Industry,
            frontier[0],
            claim(Suit::Hearts, Rank::Two)
        ));
        assert!(state.commit_nomination(
            Advisor::Industry,
            frontier[0],
            claim(Suit::Diamonds, Rank::Two)
        ));
        // the second commit is unconstrained
        assert!(state.commit_nomination(
            Advisor::Industry,
            frontier[1],
            claim(Suit::Spades, Rank::Ace)
        ));
    }

    #[test]
    fn forced_hexes_pin_the_first_nomination() {
        let mut config = GameConfig::seeded(6);
        config.control_enabled = true;
        let mut state = GameState::new(config).expect("valid config");
        assert!(state.start());
        reveal_two(&mut state);

        let frontier = state.frontier();
        // a forced hex off the frontier is itself rejected
        assert!(!state.choose_control(ControlChoice::ForceHexes {
            industry: CubeCoord::new(9, -9, 0),
            urbanist: frontier[1],
        }));
        assert!(state.choose_control(ControlChoice::ForceHexes {
            industry: frontier[0],
            urbanist: frontier[1],
        }));

        let c = claim(Suit::Hearts, Rank::Seven);
        assert!(!state.commit_nomination(Advisor::Industry, frontier[2], c));
        assert!(state.commit_nomination(Advisor::Industry, frontier[0], c));
        // second commit is free again
        assert!(state.commit_nomination(Advisor::Industry, frontier[2], c));
    }

    #[test]
    fn intents_from_the_wrong_role_are_dropped() {
        let mut state = started(7);
        let before = state.revealed().len();
        assert!(!state.apply_intent(Role::Industry, Intent::Reveal { card_index: 0 }));
        assert_eq!(state.revealed().len(), before);
        assert!(state.apply_intent(Role::Mayor, Intent::Reveal { card_index: 0 }));

        // a commit claiming to be Industry must come from Industry
        assert!(!state.apply_intent(
            Role::Urbanist,
            Intent::Commit {
                advisor: Advisor::Industry,
                hex: CubeCoord::new(1, -1, 0),
                claim: Card::new(Suit::Hearts, Rank::Two),
            }
        ));
    }

    #[test]
    fn conservation_holds_across_many_turns() {
        let (mut state, _, _) = state_with_frontier_tile(|card| card.suit != Suit::Spades);
        for _ in 0..12 {
            if state.is_over() {
                break;
            }
            reveal_two(&mut state);
            let frontier = state.frontier();
            let c = claim(Suit::Hearts, Rank::Five);
            commit_all(&mut state, frontier[0], frontier[1], c);
            // prefer a safe tile when one was nominated
            let target = [frontier[0], frontier[1]]
                .into_iter()
                .find(|h| state.reality_at(*h).map(|r| r.suit) != Some(Suit::Spades))
                .unwrap_or(frontier[0]);
            assert!(state.place_card(0, target));
            assert_eq!(state.circulation_total(), Card::UNIVERSE_SIZE);
        }
    }

    #[test]
    fn invalid_configs_are_refused() {
        let mut config = GameConfig::default();
        config.hand_size = 0;
        assert!(GameState::new(config).is_err());

        let mut config = GameConfig::default();
        config.reveals_per_turn = 9;
        assert!(GameState::new(config).is_err());

        let mut config = GameConfig::default();
        config.facilities_goal = 0;
        assert!(GameState::new(config).is_err());
    }
}
