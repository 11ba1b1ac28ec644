use crate::engine::models::cards::{Card, Suit};
use crate::engine::models::player::Advisor;
use crate::engine::models::records::{Nomination, ScoreDelta};

/// How far a card is from a tile's reality: the value gap, plus one for a
/// suit mismatch.
pub fn distance(card: &Card, reality: &Card) -> u32 {
    let gap = (i32::from(card.value()) - i32::from(reality.value())).unsigned_abs();
    gap + u32::from(card.suit != reality.suit)
}

/// Score one placement.
///
/// `noms_for_hex` are the nominations that targeted the placed hex;
/// `rival_realities` are the true cards of every *other* nominated hex
/// this turn. Advisors are scored independently per claim:
///
/// - mine reality (Spades): an honest Spades claim earns +1, any other
///   claim about the mine costs 2;
/// - Mayor played the claimed suit: the advisor was trusted, +1 no matter
///   what the tile really holds;
/// - Mayor played a different suit (called the claim): +1 only if the
///   claim's suit matches reality.
///
/// The Mayor earns +1 when the chosen tile's reality is at least as close
/// to the placed card as every rival nominated tile, and never on a mine
/// or a turn with no nominations at all.
pub fn score_placement(
    placed: &Card,
    reality: &Card,
    noms_for_hex: &[Nomination],
    rival_realities: &[Card],
) -> ScoreDelta {
    let mut delta = ScoreDelta::default();
    let mine = reality.suit == Suit::Spades;

    for nom in noms_for_hex {
        let points = if mine {
            if nom.claim.suit == Suit::Spades {
                1
            } else {
                -2
            }
        } else if placed.suit == nom.claim.suit {
            1
        } else if nom.claim.suit == reality.suit {
            1
        } else {
            0
        };
        *delta.advisor_mut(nom.advisor) += points;
    }

    let nominated_anywhere = !noms_for_hex.is_empty() || !rival_realities.is_empty();
    if !mine && nominated_anywhere {
        let own = distance(placed, reality);
        if rival_realities.iter().all(|r| own <= distance(placed, r)) {
            delta.mayor = 1;
        }
    }

    delta
}

/// Pick the nomination whose claim gets persisted on the built tile.
///
/// A lone nomination wins outright. When both advisors nominated the same
/// hex the placed suit breaks the tie: Diamonds favors Industry, Hearts
/// favors Urbanist, anything else keeps commit order. This only labels
/// the tile; scoring evaluates every claim independently.
pub fn winning_nomination<'a>(
    placed_suit: Suit,
    noms_for_hex: &'a [Nomination],
) -> Option<&'a Nomination> {
    if noms_for_hex.len() < 2 {
        return noms_for_hex.first();
    }
    let favored = match placed_suit {
        Suit::Diamonds => Some(Advisor::Industry),
        Suit::Hearts => Some(Advisor::Urbanist),
        Suit::Spades => None,
    };
    favored
        .and_then(|adv| noms_for_hex.iter().find(|n| n.advisor == adv))
        .or_else(|| noms_for_hex.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::CubeCoord;
    use crate::engine::models::cards::Rank;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn nom(advisor: Advisor, suit: Suit, rank: Rank) -> Nomination {
        Nomination {
            hex: CubeCoord::new(1, -1, 0),
            claim: card(suit, rank),
            advisor,
        }
    }

    #[test]
    fn distance_counts_value_gap_and_suit() {
        let seven_h = card(Suit::Hearts, Rank::Seven);
        let nine_h = card(Suit::Hearts, Rank::Nine);
        let nine_d = card(Suit::Diamonds, Rank::Nine);
        assert_eq!(distance(&seven_h, &nine_h), 2);
        assert_eq!(distance(&seven_h, &nine_d), 3);
        assert_eq!(distance(&seven_h, &seven_h), 0);
    }

    #[test]
    fn honest_warning_and_mine_lie() {
        // scenario: reality is a mine; Industry warned, Urbanist lied
        let reality = card(Suit::Spades, Rank::Five);
        let placed = card(Suit::Hearts, Rank::Eight);
        let noms = vec![
            nom(Advisor::Industry, Suit::Spades, Rank::Five),
            nom(Advisor::Urbanist, Suit::Diamonds, Rank::Nine),
        ];
        let delta = score_placement(&placed, &reality, &noms, &[]);
        assert_eq!(delta.industry, 1);
        assert_eq!(delta.urbanist, -2);
        assert_eq!(delta.mayor, 0);
    }

    #[test]
    fn trusted_claim_scores_regardless_of_reality() {
        // Mayor plays Diamonds onto a hex Industry claimed Diamonds for,
        // even though the tile is really Hearts
        let reality = card(Suit::Hearts, Rank::Three);
        let placed = card(Suit::Diamonds, Rank::Six);
        let noms = vec![nom(Advisor::Industry, Suit::Diamonds, Rank::Six)];
        let delta = score_placement(&placed, &reality, &noms, &[]);
        assert_eq!(delta.industry, 1);
    }

    #[test]
    fn called_bluff_earns_nothing_and_mayor_scores() {
        let reality = card(Suit::Hearts, Rank::Four);
        let placed = card(Suit::Hearts, Rank::Four);
        let noms = vec![nom(Advisor::Industry, Suit::Diamonds, Rank::Ten)];
        let delta = score_placement(&placed, &reality, &noms, &[]);
        assert_eq!(delta.industry, 0);
        assert_eq!(delta.mayor, 1);
    }

    #[test]
    fn called_but_honest_still_scores() {
        let reality = card(Suit::Diamonds, Rank::Ten);
        let placed = card(Suit::Hearts, Rank::Four);
        let noms = vec![nom(Advisor::Industry, Suit::Diamonds, Rank::Ten)];
        let delta = score_placement(&placed, &reality, &noms, &[]);
        assert_eq!(delta.industry, 1);
    }

    #[test]
    fn both_advisors_honest_about_the_same_mine() {
        let reality = card(Suit::Spades, Rank::Jack);
        let placed = card(Suit::Diamonds, Rank::Two);
        let noms = vec![
            nom(Advisor::Industry, Suit::Spades, Rank::Jack),
            nom(Advisor::Urbanist, Suit::Spades, Rank::Two),
        ];
        let delta = score_placement(&placed, &reality, &noms, &[]);
        assert_eq!(delta.industry, 1);
        assert_eq!(delta.urbanist, 1);
    }

    #[test]
    fn mayor_needs_the_closest_nominated_tile() {
        let placed = card(Suit::Hearts, Rank::Seven);
        let reality = card(Suit::Hearts, Rank::Two);
        let noms = vec![nom(Advisor::Industry, Suit::Hearts, Rank::Two)];
        // a rival nominated tile was a much closer match
        let rivals = [card(Suit::Hearts, Rank::Seven)];
        let delta = score_placement(&placed, &reality, &noms, &rivals);
        assert_eq!(delta.mayor, 0);

        // ties count as minimal
        let rivals = [card(Suit::Hearts, Rank::Two)];
        let delta = score_placement(&placed, &reality, &noms, &rivals);
        assert_eq!(delta.mayor, 1);
    }

    #[test]
    fn no_nominations_means_no_scores() {
        let placed = card(Suit::Hearts, Rank::Seven);
        let reality = card(Suit::Hearts, Rank::Seven);
        let delta = score_placement(&placed, &reality, &[], &[]);
        assert_eq!(delta, ScoreDelta::default());
    }

    #[test]
    fn tie_break_follows_the_placed_suit() {
        let noms = vec![
            nom(Advisor::Industry, Suit::Diamonds, Rank::Five),
            nom(Advisor::Urbanist, Suit::Hearts, Rank::Five),
        ];
        let win = winning_nomination(Suit::Diamonds, &noms).map(|n| n.advisor);
        assert_eq!(win, Some(Advisor::Industry));
        let win = winning_nomination(Suit::Hearts, &noms).map(|n| n.advisor);
        assert_eq!(win, Some(Advisor::Urbanist));
        // Spades placements keep commit order
        let win = winning_nomination(Suit::Spades, &noms).map(|n| n.advisor);
        assert_eq!(win, Some(Advisor::Industry));
        assert!(winning_nomination(Suit::Hearts, &[]).is_none());
    }
}
