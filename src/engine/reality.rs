use std::collections::HashMap;

use rand::prelude::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::engine::grid::CubeCoord;
use crate::engine::models::cards::Card;

/// The hidden truth of the map: each fog-revealed tile gets a card drawn
/// from its own 39-card circulation, assigned once and never changed.
///
/// Reality deliberately does not touch the Mayor's deck; when its own
/// circulation runs dry it resets to the full universe and reshuffles,
/// so an arbitrarily large map stays drawable.
#[derive(Debug, Clone)]
pub struct RealityMap {
    tiles: HashMap<CubeCoord, Card>,
    remaining: Vec<Card>,
}

impl RealityMap {
    pub fn new(rng: &mut ChaCha8Rng) -> Self {
        let mut remaining: Vec<Card> = Card::universe().collect();
        remaining.shuffle(rng);
        RealityMap {
            tiles: HashMap::new(),
            remaining,
        }
    }

    /// Pin a tile to a known card (the town center). No-op if the tile
    /// already has a reality.
    pub fn assign(&mut self, coord: CubeCoord, card: Card) {
        self.tiles.entry(coord).or_insert(card);
    }

    /// Reveal a tile, assigning its reality on first sight. Idempotent.
    pub fn reveal(&mut self, coord: CubeCoord, rng: &mut ChaCha8Rng) -> Card {
        if let Some(card) = self.tiles.get(&coord) {
            return *card;
        }
        if self.remaining.is_empty() {
            self.remaining = Card::universe().collect();
            self.remaining.shuffle(rng);
        }
        let card = match self.remaining.pop() {
            Some(card) => card,
            None => unreachable!("reality circulation refilled but empty"),
        };
        self.tiles.insert(coord, card);
        card
    }

    pub fn get(&self, coord: CubeCoord) -> Option<Card> {
        self.tiles.get(&coord).copied()
    }

    pub fn is_revealed(&self, coord: CubeCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn revealed_count(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::cards::{Rank, Suit};
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn reality_is_assigned_once() {
        let mut r = rng(1);
        let mut map = RealityMap::new(&mut r);
        let coord = CubeCoord::new(1, -1, 0);
        let first = map.reveal(coord, &mut r);
        let second = map.reveal(coord, &mut r);
        assert_eq!(first, second);
        assert_eq!(map.get(coord), Some(first));
    }

    #[test]
    fn pinned_tiles_win_over_draws() {
        let mut r = rng(2);
        let mut map = RealityMap::new(&mut r);
        let center = CubeCoord::ORIGIN;
        let ace = Card::new(Suit::Hearts, Rank::Ace);
        map.assign(center, ace);
        assert_eq!(map.reveal(center, &mut r), ace);
        map.assign(center, Card::new(Suit::Spades, Rank::Two));
        assert_eq!(map.get(center), Some(ace));
    }

    #[test]
    fn circulation_refills_past_the_universe() {
        let mut r = rng(3);
        let mut map = RealityMap::new(&mut r);
        // reveal more tiles than there are cards
        for q in 0..50 {
            let coord = CubeCoord::new(q, -q, 0);
            map.reveal(coord, &mut r);
        }
        assert_eq!(map.revealed_count(), 50);
    }
}
