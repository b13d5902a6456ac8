//! Bot decision-making logic with difficulty-based behavior.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::models::DifficultyParams;
use crate::game::{
    entities::{Card, Chips, Rank},
    functional::eval,
    interfaces::BetRequest,
};

// === Hand Strength Base Values ===
// These represent the baseline strength for each poker hand rank

const STRENGTH_HIGH_CARD: f32 = 0.1;
const STRENGTH_ONE_PAIR: f32 = 0.25;
const STRENGTH_TWO_PAIR: f32 = 0.40;
const STRENGTH_THREE_OF_A_KIND: f32 = 0.55;
const STRENGTH_STRAIGHT: f32 = 0.70;
const STRENGTH_FLUSH: f32 = 0.75;
const STRENGTH_FULL_HOUSE: f32 = 0.85;
const STRENGTH_FOUR_OF_A_KIND: f32 = 0.95;
const STRENGTH_STRAIGHT_FLUSH: f32 = 0.99;

/// What a bot wants to do, before it is turned into a chip amount.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BotAction {
    Fold,
    Check,
    Call,
    /// Raise by this much on top of the call
    Raise(Chips),
    AllIn,
}

impl BotAction {
    /// Chips to hand the betting engine for this action.
    #[must_use]
    pub fn to_chips(self, request: &BetRequest, big_blind: Chips) -> Chips {
        let amount = match self {
            BotAction::Fold | BotAction::Check => 0,
            BotAction::Call => request.required,
            BotAction::Raise(by) => request.required + by.max(big_blind),
            BotAction::AllIn => request.stack,
        };
        amount.min(request.stack)
    }
}

/// Configuration for bot decision-making thresholds and multipliers.
///
/// All threshold values are hand strength floats in range [0.0, 1.0].
/// Higher threshold = more conservative (tighter play).
///
/// # Examples
///
/// ```
/// use holdem_engine::bot::decision::BotDecisionConfig;
///
/// let config = BotDecisionConfig::default();
/// assert_eq!(config.easy_fold_threshold, 0.08); // Folds bottom 8%
/// assert_eq!(config.easy_raise_threshold, 0.20); // Raises top 20%
/// ```
#[derive(Debug, Clone)]
pub struct BotDecisionConfig {
    /// Hand strength below this = fold (Easy bot)
    pub easy_fold_threshold: f32,

    /// Hand strength above this = raise (Easy bot)
    pub easy_raise_threshold: f32,

    pub standard_fold_threshold: f32,

    pub standard_raise_threshold: f32,

    pub tag_fold_threshold: f32,

    pub tag_raise_threshold: f32,

    /// Bluff size as a multiplier of the current pot
    pub bluff_size_multiplier: f32,

    /// Pot odds above this add `pot_odds_bonus_value` to the call chance
    pub pot_odds_bonus_threshold: f32,

    pub pot_odds_bonus_value: f32,

    /// Base probability of calling with medium-strength hands.
    ///
    /// **Effect**: call_prob = base + (aggression / divisor)
    pub base_call_probability: f32,

    pub call_aggression_divisor: f32,

    /// Base probability of raising with strong hands.
    pub base_raise_probability: f32,

    pub raise_aggression_divisor: f32,

    /// Raise multipliers (of pot plus call) by aggression band
    pub passive_raise_multiplier: f32,

    pub moderate_raise_multiplier: f32,

    pub aggressive_raise_multiplier: f32,

    /// Raise amount varies by ±this fraction
    pub raise_variance: f32,
}

impl Default for BotDecisionConfig {
    fn default() -> Self {
        Self {
            // Fold/raise thresholds by difficulty
            easy_fold_threshold: 0.08,
            easy_raise_threshold: 0.20,
            standard_fold_threshold: 0.12,
            standard_raise_threshold: 0.28,
            tag_fold_threshold: 0.18,
            tag_raise_threshold: 0.33,
            // Bluffing
            bluff_size_multiplier: 1.5,
            // Pot odds
            pot_odds_bonus_threshold: 0.25,
            pot_odds_bonus_value: 0.2,
            // Calling
            base_call_probability: 0.3,
            call_aggression_divisor: 5.0,
            // Raising
            base_raise_probability: 0.4,
            raise_aggression_divisor: 4.0,
            // Raise sizing
            passive_raise_multiplier: 0.5,
            moderate_raise_multiplier: 0.75,
            aggressive_raise_multiplier: 1.0,
            raise_variance: 0.2,
        }
    }
}

/// Bot decision maker
#[derive(Debug)]
pub struct BotDecisionMaker {
    rng: StdRng,
    config: BotDecisionConfig,
}

impl BotDecisionMaker {
    /// Create a new decision maker with default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BotDecisionConfig::default())
    }

    /// Create a new decision maker with custom config
    #[must_use]
    pub fn with_config(config: BotDecisionConfig) -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
            config,
        }
    }

    /// Deterministic decision maker for reproducible simulations.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config: BotDecisionConfig::default(),
        }
    }

    /// Decide bot action based on difficulty and the bet request
    pub fn decide_action(&mut self, params: &DifficultyParams, request: &BetRequest) -> BotAction {
        let hand_strength = self.estimate_hand_strength(&request.hole, &request.board);
        let can_check = request.required == 0;

        // All-in if critically short-stacked
        if request.stack <= request.required {
            return BotAction::AllIn;
        }

        let pot_odds = self.calculate_pot_odds(request.pot, request.required);

        // Adjust thresholds based on difficulty (VPIP determines how selective)
        let (fold_threshold, raise_threshold) = match params.vpip {
            v if v > 0.40 => (
                self.config.easy_fold_threshold,
                self.config.easy_raise_threshold,
            ),
            v if v > 0.25 => (
                self.config.standard_fold_threshold,
                self.config.standard_raise_threshold,
            ),
            _ => (
                self.config.tag_fold_threshold,
                self.config.tag_raise_threshold,
            ),
        };

        // Fold weak hands unless can check for free
        if hand_strength < fold_threshold {
            if can_check {
                return BotAction::Check;
            }
            if params.bluffs && self.rng.random_bool(f64::from(params.bluff_frequency)) {
                let bluff_size = (request.pot as f32 * self.config.bluff_size_multiplier) as Chips;
                return if request.stack <= request.required + bluff_size {
                    BotAction::AllIn
                } else {
                    BotAction::Raise(bluff_size)
                };
            }
            return BotAction::Fold;
        }

        // Medium strength hands: play based on aggression and pot odds
        if hand_strength < raise_threshold {
            if can_check {
                return BotAction::Check;
            }
            let pot_odds_bonus = if pot_odds > self.config.pot_odds_bonus_threshold {
                self.config.pot_odds_bonus_value
            } else {
                0.0
            };
            let call_probability = self.config.base_call_probability
                + (params.aggression_factor / self.config.call_aggression_divisor)
                + pot_odds_bonus;
            if self.rng.random_bool(f64::from(call_probability.min(1.0))) {
                return BotAction::Call;
            }
            return BotAction::Fold;
        }

        // Strong hands: raise aggressively
        let raise_probability = self.config.base_raise_probability
            + (params.aggression_factor / self.config.raise_aggression_divisor);
        if self.rng.random_bool(f64::from(raise_probability.min(1.0))) {
            let raise = self.calculate_raise_amount(params, request.pot, request.required);
            if request.stack <= request.required + raise {
                BotAction::AllIn
            } else {
                BotAction::Raise(raise)
            }
        } else if can_check {
            // Slow-play strong hands occasionally
            BotAction::Check
        } else {
            BotAction::Call
        }
    }

    /// Raise size on top of the call, scaled to the pot.
    fn calculate_raise_amount(
        &mut self,
        params: &DifficultyParams,
        pot: Chips,
        required: Chips,
    ) -> Chips {
        let base_multiplier = match params.aggression_factor {
            x if x < 1.0 => self.config.passive_raise_multiplier,
            x if x < 2.0 => self.config.moderate_raise_multiplier,
            _ => self.config.aggressive_raise_multiplier,
        };

        let variance = self
            .rng
            .random_range(-self.config.raise_variance..=self.config.raise_variance);
        let multiplier = base_multiplier * (1.0 + variance);

        ((pot + required) as f32 * multiplier) as Chips
    }

    /// Pot odds as pot / (pot + call)
    fn calculate_pot_odds(&self, pot: Chips, call_amount: Chips) -> f32 {
        if call_amount == 0 {
            return 1.0;
        }
        let total_pot = pot + call_amount;
        pot as f32 / total_pot as f32
    }

    /// Estimate hand strength based on hole cards and board
    ///
    /// # Returns
    ///
    /// * `f32` - Estimated strength (0.0 to 1.0)
    #[must_use]
    pub fn estimate_hand_strength(&self, hole_cards: &[Card], board_cards: &[Card]) -> f32 {
        let mut all_cards = Vec::with_capacity(hole_cards.len() + board_cards.len());
        all_cards.extend_from_slice(hole_cards);
        all_cards.extend_from_slice(board_cards);

        if all_cards.len() < 2 {
            return 0.0;
        }

        let hand = eval(&all_cards);
        let base_strength = match hand.rank {
            Rank::HighCard => STRENGTH_HIGH_CARD,
            Rank::OnePair => STRENGTH_ONE_PAIR,
            Rank::TwoPair => STRENGTH_TWO_PAIR,
            Rank::ThreeOfAKind => STRENGTH_THREE_OF_A_KIND,
            Rank::Straight => STRENGTH_STRAIGHT,
            Rank::Flush => STRENGTH_FLUSH,
            Rank::FullHouse => STRENGTH_FULL_HOUSE,
            Rank::FourOfAKind => STRENGTH_FOUR_OF_A_KIND,
            Rank::StraightFlush => STRENGTH_STRAIGHT_FLUSH,
        };

        // Higher values = stronger hand within same rank
        let max_value = hand.values.iter().max().copied().unwrap_or(0);
        let kicker_bonus = (f32::from(max_value) / 14.0) * 0.1;

        (base_strength + kicker_bonus).min(1.0)
    }
}

impl Default for BotDecisionMaker {
    fn default() -> Self {
        Self::new()
    }
}
