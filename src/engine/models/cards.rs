use std::fmt;

/// The three suits in circulation. Clubs are not part of this deck.
///
/// Hearts belong to the Urbanist's domain, Diamonds to Industry's, and a
/// Spade reality tile is a mine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 3] = [Suit::Hearts, Suit::Diamonds, Suit::Spades];

    pub fn index(self) -> u8 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Spades => 2,
        }
    }

    pub fn from_index(idx: u8) -> Option<Suit> {
        Suit::ALL.get(idx as usize).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Spades => '♠',
        }
    }
}

/// Card ranks. Declaration order is value order: the Queen outranks the
/// King in this game, and the Ace is high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    King,
    Queen,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::King,
        Rank::Queen,
        Rank::Ace,
    ];

    /// Numeric value: 2..=10 for pip cards, J=11, K=12, Q=13, A=14.
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::King => 12,
            Rank::Queen => 13,
            Rank::Ace => 14,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::King => "K",
            Rank::Queen => "Q",
            Rank::Ace => "A",
        }
    }

    pub fn from_label(label: &str) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.label() == label)
    }
}

/// A card is a plain value object; duplicates are legal and identity is
/// entirely determined by the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const UNIVERSE_SIZE: usize = 39;

    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    pub fn value(self) -> u8 {
        self.rank.value()
    }

    /// Flat index into the 39-card universe.
    pub fn index(self) -> usize {
        let rank_idx = Rank::ALL.iter().position(|&r| r == self.rank).unwrap_or(0);
        self.suit.index() as usize * Rank::ALL.len() + rank_idx
    }

    pub fn from_index(idx: usize) -> Option<Card> {
        if idx >= Card::UNIVERSE_SIZE {
            return None;
        }
        let suit = Suit::from_index((idx / Rank::ALL.len()) as u8)?;
        let rank = Rank::ALL[idx % Rank::ALL.len()];
        Some(Card { suit, rank })
    }

    /// All 39 cards, in index order.
    pub fn universe() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card { suit, rank }))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queen_outranks_king() {
        assert!(Rank::Queen > Rank::King);
        assert_eq!(Rank::Queen.value(), 13);
        assert_eq!(Rank::King.value(), 12);
        assert!(Rank::Ace > Rank::Queen);
    }

    #[test]
    fn universe_is_39_distinct_cards() {
        let cards: Vec<Card> = Card::universe().collect();
        assert_eq!(cards.len(), Card::UNIVERSE_SIZE);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.index(), i);
            assert_eq!(Card::from_index(i), Some(*card));
        }
        assert_eq!(Card::from_index(Card::UNIVERSE_SIZE), None);
    }

    #[test]
    fn rank_labels_round_trip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_label(rank.label()), Some(rank));
        }
        assert_eq!(Rank::from_label("1"), None);
        assert_eq!(Rank::from_label("C"), None);
    }
}
