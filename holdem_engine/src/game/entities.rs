use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, sync::Arc};

use super::{
    constants,
    interfaces::{Decider, DeckSource},
};
use crate::pile::{CardStack, ChipStack, Pile};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a value (deuce=2u8 ... ace=14u8) and a suit.
/// An ace given as 1u8 is read as high by the evaluator.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            1 | 14 => "A",
            11 => "J",
            12 => "Q",
            13 => "K",
            v => &v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "hi",
            Self::OnePair => "1p",
            Self::TwoPair => "2p",
            Self::ThreeOfAKind => "3k",
            Self::Straight => "s8",
            Self::Flush => "fs",
            Self::FullHouse => "fh",
            Self::FourOfAKind => "4k",
            Self::StraightFlush => "sf",
        };
        write!(f, "{repr}")
    }
}

/// Strength of a best five-card hand. Orders by rank, then by the
/// tie-break values (highest group first).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HandValue {
    pub rank: Rank,
    pub values: Vec<Value>,
}

fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(constants::DECK_SIZE);
    for value in 2u8..=14u8 {
        for suit in Suit::ALL {
            cards.push(Card(value, suit));
        }
    }
    cards
}

/// A 52 card deck reshuffled with the thread rng on every hand.
#[derive(Debug, Default)]
pub struct RandomDeck;

impl DeckSource for RandomDeck {
    fn shuffle(&mut self) -> Vec<Card> {
        let mut cards = standard_deck();
        cards.shuffle(&mut rand::rng());
        cards
    }
}

/// Replays a fixed card order every hand. Missing cards are filled in from
/// an unshuffled deck so dealing never runs short.
#[derive(Clone, Debug)]
pub struct StackedDeck {
    order: Vec<Card>,
}

impl StackedDeck {
    #[must_use]
    pub fn new(top: Vec<Card>) -> Self {
        let mut order = top;
        for card in standard_deck() {
            if !order.contains(&card) {
                order.push(card);
            }
        }
        Self { order }
    }
}

impl DeckSource for StackedDeck {
    fn shuffle(&mut self) -> Vec<Card> {
        self.order.clone()
    }
}

/// Type alias for whole chips. All bets, stacks and pots are represented
/// as whole chips.
pub type Chips = u32;

/// Type alias for seat positions at the table. A player's seat index is
/// also their index into the table's seating list.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    #[must_use]
    pub fn new(s: &str) -> Self {
        let mut username: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        username.truncate(constants::MAX_USERNAME_LENGTH);
        Self(username)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

// By default, a player can post the big blind 60 times before busting.
pub const DEFAULT_BUY_IN: Chips = 600;
pub const DEFAULT_BIG_BLIND: Chips = DEFAULT_BUY_IN / 60;
pub const DEFAULT_SMALL_BLIND: Chips = DEFAULT_BIG_BLIND / 2;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl Default for Blinds {
    fn default() -> Self {
        Self {
            small: DEFAULT_SMALL_BLIND,
            big: DEFAULT_BIG_BLIND,
        }
    }
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}

/// Phases of a single hand, in play order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Phase {
    Blinds,
    Deal,
    Flop,
    Turn,
    River,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Blinds,
        Phase::Deal,
        Phase::Flop,
        Phase::Turn,
        Phase::River,
    ];

    /// Whether a betting pass follows this phase. The blinds phase only
    /// collects the forced bets.
    #[must_use]
    pub fn has_betting(self) -> bool {
        !matches!(self, Self::Blinds)
    }

    /// Community cards revealed by this phase.
    #[must_use]
    pub fn board_cards(self) -> u32 {
        match self {
            Self::Flop => constants::FLOP_CARDS,
            Self::Turn => constants::TURN_CARDS,
            Self::River => constants::RIVER_CARDS,
            Self::Blinds | Self::Deal => 0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Blinds => "BLINDS",
            Self::Deal => "DEAL",
            Self::Flop => "FLOP",
            Self::Turn => "TURN",
            Self::River => "RIVER",
        };
        write!(f, "{repr}")
    }
}

/// A seated player. The chip pile is owned by the player but any party
/// holding the table may move chips out of it through `pile::transfer`
/// during betting.
#[derive(Clone)]
pub struct Player {
    pub seat: SeatIndex,
    pub name: Username,
    pub chips: Pile<ChipStack>,
    pub hole: Pile<CardStack>,
    pub decider: Arc<dyn Decider>,
}

impl Player {
    /// Seat a player with an empty stack. Chips arrive through a cash-in
    /// transfer.
    #[must_use]
    pub fn new(seat: SeatIndex, name: Username, decider: Arc<dyn Decider>) -> Self {
        Self {
            seat,
            name,
            chips: Pile::new(),
            hole: Pile::new(),
            decider,
        }
    }

    /// Seat a player and mint their buy-in.
    #[must_use]
    pub fn with_stack(
        seat: SeatIndex,
        name: Username,
        stack: Chips,
        decider: Arc<dyn Decider>,
    ) -> Self {
        Self {
            chips: Pile::with(ChipStack::new(stack)),
            ..Self::new(seat, name, decider)
        }
    }

    #[must_use]
    pub fn stack(&self) -> Chips {
        self.chips.total()
    }

    #[must_use]
    pub fn hole_cards(&self) -> Vec<Card> {
        self.hole.snapshot().cards()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("seat", &self.seat)
            .field("name", &self.name)
            .field("chips", &self.chips)
            .finish_non_exhaustive()
    }
}

/// Events announced to every observer of a table.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    HandStarted(u64),
    PhaseStarted(Phase),
    BlindPosted(Username, Chips),
    ForcedFold(Username),
    Wagered(Username, Chips),
    AllIn(Username, Chips),
    Folded(Username),
    Won(Username, Chips),
    HandFinished(u64),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HandStarted(hand) => format!("hand #{hand} started"),
            Self::PhaseStarted(phase) => format!("phase: \"{phase}\""),
            Self::BlindPosted(username, amount) => format!("{username} posted a {amount} blind"),
            Self::ForcedFold(username) => {
                format!("{username} can't cover the blind and folds")
            }
            Self::Wagered(username, amount) => format!("{username} put in {amount}"),
            Self::AllIn(username, amount) => format!("all_in: \"{username}\" for {amount}"),
            Self::Folded(username) => format!("{username} folded"),
            Self::Won(username, amount) => format!("{username} won {amount}"),
            Self::HandFinished(hand) => format!("hand #{hand} finished"),
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PlayerView {
    pub seat: SeatIndex,
    pub name: Username,
    pub stack: Chips,
    pub committed: Chips,
    pub contesting: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SidePotView {
    pub owner: SeatIndex,
    pub threshold: Chips,
    pub size: Chips,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PotView {
    pub main: Chips,
    pub side_pots: Vec<SidePotView>,
}

impl PotView {
    #[must_use]
    pub fn total(&self) -> Chips {
        self.main + self.side_pots.iter().map(|pot| pot.size).sum::<Chips>()
    }
}

impl fmt::Display for PotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.main)?;
        for pot in &self.side_pots {
            write!(f, " + {}@{}", pot.size, pot.threshold)?;
        }
        Ok(())
    }
}

/// What every observer of the table may see. Hole cards are private and
/// never part of the shared view.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameView {
    pub hand: u64,
    pub phase: Option<Phase>,
    pub blinds: Blinds,
    pub board: Vec<Card>,
    pub table_bet: Chips,
    pub pot: PotView,
    pub players: Vec<PlayerView>,
}
