//! Recommendation generation
//!
//! Every flip type resolves the same way: trust the early signal, treat the
//! late move as noise. The generator renders the reasoning and enumerates
//! the ways that read could be wrong.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::SignalPair;
use crate::data::EventIdentity;
use crate::signal::{Side, SignalStrength};

/// What to do with a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyAction {
    /// Confidence clears the action floor
    Bet,
    /// Worth watching, not worth money
    Monitor,
}

/// A way the "trust the early signal" read could be wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// The late move is strong enough to be genuine sharp action
    StrongLateSignal,
    /// Early signal landed under 6h before the game
    EarlySignalNotEarly,
    /// Late signal landed over 2h before the game
    LateSignalNotLate,
    /// One source and book, nothing cross-confirms the read
    SingleSourceNoConfirmation,
    /// Under 2h between observations, resembles ordinary drift
    ShortTimingGap,
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskFactor::StrongLateSignal => {
                write!(f, "late signal is strong and may be genuine sharp action")
            }
            RiskFactor::EarlySignalNotEarly => {
                write!(f, "early signal captured under 6h before the game")
            }
            RiskFactor::LateSignalNotLate => {
                write!(f, "late signal captured over 2h before the game")
            }
            RiskFactor::SingleSourceNoConfirmation => {
                write!(f, "single source/book with no cross-confirmation")
            }
            RiskFactor::ShortTimingGap => {
                write!(f, "under 2h between signals, resembles market drift")
            }
        }
    }
}

/// Side recommendation with reasoning and risk factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Bet or monitor
    pub action: StrategyAction,
    /// Side to back (always the early signal's side)
    pub side: Side,
    /// Templated reasoning citing both signals
    pub reasoning: String,
    /// Everything that argues against the read
    pub risk_factors: Vec<RiskFactor>,
}

fn signed(value: Decimal) -> String {
    if value.is_sign_negative() {
        value.to_string()
    } else {
        format!("+{value}")
    }
}

/// Builds recommendations from scored pairs
#[derive(Debug, Clone)]
pub struct RecommendationGenerator {
    bet_confidence_floor: Decimal,
}

impl RecommendationGenerator {
    /// Create a generator with the given action floor
    pub fn new(bet_confidence_floor: Decimal) -> Self {
        Self {
            bet_confidence_floor,
        }
    }

    /// Generate the recommendation for a pair
    pub fn generate(
        &self,
        pair: &SignalPair,
        event: &EventIdentity,
        confidence_score: Decimal,
    ) -> Recommendation {
        let early = pair.early();
        let late = pair.late();

        let reasoning = format!(
            "early {} money backed {} ({} stake-vs-ticket) {}h out; \
             late {} money backed {} ({}) {}h out",
            early.split_type,
            early.recommended_side.label(event),
            signed(early.differential),
            early.hours_before_game.round_dp(1),
            late.split_type,
            late.recommended_side.label(event),
            signed(late.differential),
            late.hours_before_game.round_dp(1),
        );

        let mut risk_factors = Vec::new();
        if late.strength >= SignalStrength::Strong {
            risk_factors.push(RiskFactor::StrongLateSignal);
        }
        if early.hours_before_game < dec!(6) {
            risk_factors.push(RiskFactor::EarlySignalNotEarly);
        }
        if late.hours_before_game > dec!(2) {
            risk_factors.push(RiskFactor::LateSignalNotLate);
        }
        if early.source == late.source && early.book == late.book {
            risk_factors.push(RiskFactor::SingleSourceNoConfirmation);
        }
        if pair.hours_between() < dec!(2) {
            risk_factors.push(RiskFactor::ShortTimingGap);
        }

        let action = if confidence_score >= self.bet_confidence_floor {
            StrategyAction::Bet
        } else {
            StrategyAction::Monitor
        };

        Recommendation {
            action,
            side: early.recommended_side,
            reasoning,
            risk_factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{MarketSignal, SplitType};
    use chrono::Utc;

    fn event() -> EventIdentity {
        EventIdentity {
            event_id: "ev1".to_string(),
            home_team: "DAL".to_string(),
            away_team: "NYG".to_string(),
            start_time: Utc::now(),
        }
    }

    fn signal(stake: Decimal, bet: Decimal, hours: Decimal) -> MarketSignal {
        MarketSignal::new(
            SplitType::Moneyline,
            "vsin".to_string(),
            Some("pinnacle".to_string()),
            stake,
            bet,
            Utc::now(),
            hours,
        )
    }

    fn generator() -> RecommendationGenerator {
        RecommendationGenerator::new(dec!(55))
    }

    #[test]
    fn test_side_is_the_early_side() {
        let pair = SignalPair::order(
            signal(dec!(70), dec!(40), dec!(8)),
            signal(dec!(44), dec!(56), dec!(1)),
        );
        let rec = generator().generate(&pair, &event(), dec!(60));
        assert_eq!(rec.side, Side::Home);
    }

    #[test]
    fn test_reasoning_cites_both_signals() {
        let pair = SignalPair::order(
            signal(dec!(70), dec!(40), dec!(8)),
            signal(dec!(44), dec!(56), dec!(1)),
        );
        let rec = generator().generate(&pair, &event(), dec!(60));
        assert!(rec.reasoning.contains("DAL"));
        assert!(rec.reasoning.contains("NYG"));
        assert!(rec.reasoning.contains("+30"));
        assert!(rec.reasoning.contains("-12"));
        assert!(rec.reasoning.contains("moneyline"));
    }

    #[test]
    fn test_clean_pair_flags_only_single_source() {
        // 8h early, 1h late, weak late, same source/book, 7h gap
        let pair = SignalPair::order(
            signal(dec!(70), dec!(40), dec!(8)),
            signal(dec!(44), dec!(53), dec!(1)),
        );
        let rec = generator().generate(&pair, &event(), dec!(60));
        assert_eq!(
            rec.risk_factors,
            vec![RiskFactor::SingleSourceNoConfirmation]
        );
    }

    #[test]
    fn test_risky_pair_flags_everything() {
        // strong late, early at 3h, late at 2.5h, 0.5h gap, same source
        let pair = SignalPair::order(
            signal(dec!(70), dec!(40), dec!(3)),
            signal(dec!(40), dec!(56), dec!(2.5)),
        );
        let rec = generator().generate(&pair, &event(), dec!(60));
        assert_eq!(
            rec.risk_factors,
            vec![
                RiskFactor::StrongLateSignal,
                RiskFactor::EarlySignalNotEarly,
                RiskFactor::LateSignalNotLate,
                RiskFactor::SingleSourceNoConfirmation,
                RiskFactor::ShortTimingGap,
            ]
        );
    }

    #[test]
    fn test_action_floor() {
        let pair = SignalPair::order(
            signal(dec!(70), dec!(40), dec!(8)),
            signal(dec!(44), dec!(53), dec!(1)),
        );
        let bet = generator().generate(&pair, &event(), dec!(55));
        let monitor = generator().generate(&pair, &event(), dec!(54.9));
        assert_eq!(bet.action, StrategyAction::Bet);
        assert_eq!(monitor.action, StrategyAction::Monitor);
    }
}
