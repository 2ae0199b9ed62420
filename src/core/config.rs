//! Engine configuration.
//!
//! Money amounts are tunables with defaults matching the published game;
//! board layout and payout tables live in [`crate::board`] and are not
//! configurable.

use serde::{Deserialize, Serialize};

/// What happens to the space cost when a property purchase finds the deck
/// exhausted.
///
/// The cost is deducted before the draw, so an empty deck leaves the buyer
/// charged for nothing. Whether that charge should stand is a house rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckPolicy {
    /// Keep the charge even when no property could be drawn.
    #[default]
    ChargeAlways,
    /// Refund the space cost when the deck is exhausted.
    RefundWhenExhausted,
}

/// Tunable rule values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Money each player starts with.
    pub starting_money: i64,
    /// Credited when a move wraps past Go.
    pub pass_go_subsidy: i64,
    /// One-time bonus for completing the route that first connects the
    /// termini.
    pub last_spike_bonus: i64,
    /// Collected from each other player on a SurveyFees space.
    pub survey_fee: i64,
    /// Credited (SettlerRents) or debited (RoadbedCosts) per owned property.
    pub rent_per_property: i64,
    /// Debited per pip of the LandClaims dice roll.
    pub claim_cost_per_pip: i64,
    /// Deck exhaustion handling for property purchases.
    pub deck_policy: DeckPolicy,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_money: 40_000,
            pass_go_subsidy: 5_000,
            last_spike_bonus: 20_000,
            survey_fee: 3_000,
            rent_per_property: 1_000,
            claim_cost_per_pip: 1_000,
            deck_policy: DeckPolicy::default(),
        }
    }
}
