use rand::prelude::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::engine::models::cards::Card;

/// The Mayor's card circulation: a face-down draw pile plus a discard
/// pile. Together with the hand these always partition the 39-card
/// universe; cards are only ever moved between the three pools, never
/// created or destroyed.
#[derive(Debug, Clone)]
pub struct CardPile {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl CardPile {
    /// All 39 cards, shuffled.
    pub fn standard(rng: &mut ChaCha8Rng) -> Self {
        let mut draw_pile: Vec<Card> = Card::universe().collect();
        draw_pile.shuffle(rng);
        CardPile {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    /// Draw `n` cards from the top. When the draw pile runs dry mid-draw
    /// the entire discard pile is shuffled back in and drawing continues.
    ///
    /// Asking for more cards than are in circulation is a programming
    /// error: the conservation invariant makes it unreachable in play.
    pub fn draw(&mut self, n: usize, rng: &mut ChaCha8Rng) -> Vec<Card> {
        assert!(
            n <= self.total(),
            "drew {n} cards with only {} in circulation",
            self.total()
        );
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            if self.draw_pile.is_empty() {
                self.draw_pile.append(&mut self.discard_pile);
                self.draw_pile.shuffle(rng);
            }
            match self.draw_pile.pop() {
                Some(card) => drawn.push(card),
                None => unreachable!("circulation exhausted despite size check"),
            }
        }
        drawn
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn total(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }
}
