//! Hand ranking.

use std::collections::BTreeMap;

use super::{
    entities::{Card, HandValue, Rank, SeatIndex, Suit, Value},
    interfaces::HandEvaluator,
};

const ACE: Value = 14;

fn normalize(value: Value) -> Value {
    if value == 1 { ACE } else { value }
}

/// Highest card of a five-long run in `values`, aces also counting low.
fn straight_high(values: &[Value]) -> Option<Value> {
    let has = |v: Value| values.contains(&if v == 1 { ACE } else { v });
    (5..=ACE)
        .rev()
        .find(|high| (0..5).all(|offset| has(high - offset)))
}

/// Rank the best five-card hand in `cards`. Works with fewer than five
/// cards, in which case only high cards and groups count.
#[must_use]
pub fn eval(cards: &[Card]) -> HandValue {
    let mut values: Vec<Value> = cards.iter().map(|card| normalize(card.0)).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let mut by_suit: BTreeMap<Suit, Vec<Value>> = BTreeMap::new();
    for card in cards {
        by_suit.entry(card.1).or_default().push(normalize(card.0));
    }
    let flush = by_suit.into_values().find(|suited| suited.len() >= 5).map(|mut suited| {
        suited.sort_unstable_by(|a, b| b.cmp(a));
        suited
    });

    if let Some(high) = flush.as_deref().and_then(straight_high) {
        return HandValue {
            rank: Rank::StraightFlush,
            values: vec![high],
        };
    }

    let mut counts: BTreeMap<Value, usize> = BTreeMap::new();
    for value in &values {
        *counts.entry(*value).or_default() += 1;
    }
    let mut groups: Vec<(usize, Value)> = counts.into_iter().map(|(v, n)| (n, v)).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let kickers = |used: &[Value], n: usize| -> Vec<Value> {
        values
            .iter()
            .copied()
            .filter(|v| !used.contains(v))
            .take(n)
            .collect()
    };
    let with_kickers = |rank: Rank, used: Vec<Value>, n: usize| {
        let mut hand = used.clone();
        hand.extend(kickers(&used, n));
        HandValue { rank, values: hand }
    };

    let (top_count, top_value) = groups.first().copied().unwrap_or((0, 0));
    let second = groups.get(1).copied();

    if top_count >= 4 {
        return with_kickers(Rank::FourOfAKind, vec![top_value], 1);
    }
    if top_count == 3 {
        if let Some((_, pair)) = second.filter(|(n, _)| *n >= 2) {
            return HandValue {
                rank: Rank::FullHouse,
                values: vec![top_value, pair],
            };
        }
    }
    if let Some(suited) = flush {
        return HandValue {
            rank: Rank::Flush,
            values: suited.into_iter().take(5).collect(),
        };
    }
    if let Some(high) = straight_high(&values) {
        return HandValue {
            rank: Rank::Straight,
            values: vec![high],
        };
    }
    match (top_count, second) {
        (3, _) => with_kickers(Rank::ThreeOfAKind, vec![top_value], 2),
        (2, Some((2, low_pair))) => with_kickers(Rank::TwoPair, vec![top_value, low_pair], 1),
        (2, _) => with_kickers(Rank::OnePair, vec![top_value], 3),
        _ => HandValue {
            rank: Rank::HighCard,
            values: values.iter().copied().take(5).collect(),
        },
    }
}

/// Indices of every maximal element.
#[must_use]
pub fn argmax<T: Ord>(values: &[T]) -> Vec<usize> {
    let Some(best) = values.iter().max() else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| (value == best).then_some(idx))
        .collect()
}

/// Ranks each hand together with the board and returns the best.
#[derive(Debug, Default)]
pub struct BestHandEvaluator;

impl HandEvaluator for BestHandEvaluator {
    fn determine_winners(&self, board: &[Card], hands: &[(SeatIndex, Vec<Card>)]) -> Vec<usize> {
        let values: Vec<HandValue> = hands
            .iter()
            .map(|(_, hole)| {
                let mut cards = board.to_vec();
                cards.extend_from_slice(hole);
                eval(&cards)
            })
            .collect();
        argmax(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit::{Club, Diamond, Heart, Spade};

    fn rank_of(cards: &[Card]) -> Rank {
        eval(cards).rank
    }

    #[test]
    fn test_ranks() {
        let board = [
            Card(2, Club),
            Card(7, Diamond),
            Card(9, Heart),
            Card(11, Spade),
            Card(13, Club),
        ];
        let with = |a: Card, b: Card| {
            let mut cards = board.to_vec();
            cards.extend([a, b]);
            rank_of(&cards)
        };

        assert_eq!(with(Card(3, Heart), Card(4, Heart)), Rank::HighCard);
        assert_eq!(with(Card(13, Heart), Card(4, Heart)), Rank::OnePair);
        assert_eq!(with(Card(13, Heart), Card(2, Heart)), Rank::TwoPair);
        assert_eq!(with(Card(13, Heart), Card(13, Spade)), Rank::ThreeOfAKind);
        assert_eq!(with(Card(10, Heart), Card(8, Heart)), Rank::Straight);
        // Four clubs is not a flush.
        assert_eq!(with(Card(3, Club), Card(4, Club)), Rank::HighCard);
    }

    #[test]
    fn test_flush_full_house_quads_straight_flush() {
        let flush = [
            Card(2, Heart),
            Card(6, Heart),
            Card(9, Heart),
            Card(11, Heart),
            Card(13, Heart),
            Card(13, Spade),
        ];
        assert_eq!(rank_of(&flush), Rank::Flush);

        let full_house = [
            Card(9, Heart),
            Card(9, Spade),
            Card(9, Club),
            Card(4, Heart),
            Card(4, Spade),
            Card(4, Club),
        ];
        let value = eval(&full_house);
        assert_eq!(value.rank, Rank::FullHouse);
        assert_eq!(value.values, vec![9, 4]);

        let quads = [
            Card(5, Heart),
            Card(5, Spade),
            Card(5, Club),
            Card(5, Diamond),
            Card(14, Spade),
        ];
        assert_eq!(eval(&quads).values, vec![5, 14]);

        let wheel = [
            Card(1, Club),
            Card(2, Club),
            Card(3, Club),
            Card(4, Club),
            Card(5, Club),
        ];
        let value = eval(&wheel);
        assert_eq!(value.rank, Rank::StraightFlush);
        assert_eq!(value.values, vec![5]);
    }

    #[test]
    fn test_kickers_break_ties() {
        let a = eval(&[Card(10, Club), Card(10, Heart), Card(14, Spade)]);
        let b = eval(&[Card(10, Spade), Card(10, Diamond), Card(13, Spade)]);
        assert!(a > b);
    }

    #[test]
    fn test_argmax_returns_all_ties() {
        assert_eq!(argmax(&[3, 7, 1, 7]), vec![1, 3]);
        assert!(argmax::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_evaluator_splits_board_play() {
        let board = [
            Card(10, Club),
            Card(11, Diamond),
            Card(12, Heart),
            Card(13, Spade),
            Card(14, Club),
        ];
        let hands = vec![
            (0, vec![Card(2, Heart), Card(3, Heart)]),
            (1, vec![Card(2, Spade), Card(4, Diamond)]),
        ];
        assert_eq!(BestHandEvaluator.determine_winners(&board, &hands), vec![0, 1]);
    }
}
