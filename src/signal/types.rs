//! Signal types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::data::EventIdentity;

/// Market a percentage split was observed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// Straight-up winner market
    Moneyline,
    /// Point spread market
    Spread,
    /// Over/under total market
    Total,
}

impl SplitType {
    /// Whether this is the over/under total market
    pub fn is_total(&self) -> bool {
        matches!(self, SplitType::Total)
    }
}

impl std::fmt::Display for SplitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitType::Moneyline => write!(f, "moneyline"),
            SplitType::Spread => write!(f, "spread"),
            SplitType::Total => write!(f, "total"),
        }
    }
}

/// Side of the wager the money is disproportionately backing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Home team (moneyline/spread, positive differential)
    Home,
    /// Away team (moneyline/spread, negative differential)
    Away,
    /// Over (total, positive differential)
    Over,
    /// Under (total, negative differential)
    Under,
}

impl Side {
    /// Render the side as a team code or OVER/UNDER
    pub fn label(&self, event: &EventIdentity) -> String {
        match self {
            Side::Home => event.home_team.clone(),
            Side::Away => event.away_team.clone(),
            Side::Over => "OVER".to_string(),
            Side::Under => "UNDER".to_string(),
        }
    }
}

/// Strength classification from |differential|
///
/// Ordered weakest to strongest so comparisons read naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    /// |differential| below 10
    Weak,
    /// |differential| at least 10
    Moderate,
    /// |differential| at least 15
    Strong,
    /// |differential| at least 25
    VeryStrong,
}

impl SignalStrength {
    /// Classify a signed differential
    pub fn from_differential(differential: Decimal) -> Self {
        let abs = differential.abs();
        if abs >= dec!(25) {
            SignalStrength::VeryStrong
        } else if abs >= dec!(15) {
            SignalStrength::Strong
        } else if abs >= dec!(10) {
            SignalStrength::Moderate
        } else {
            SignalStrength::Weak
        }
    }
}

/// Coarse classification of how long before the event a signal was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingBucket {
    /// Under 2 hours before start
    ZeroToTwo,
    /// 2 to 6 hours before start
    TwoToSix,
    /// 6 to 24 hours before start
    SixToTwentyFour,
    /// More than 24 hours before start
    OverTwentyFour,
}

impl TimingBucket {
    /// Classify hours before game
    pub fn from_hours(hours: Decimal) -> Self {
        if hours < dec!(2) {
            TimingBucket::ZeroToTwo
        } else if hours < dec!(6) {
            TimingBucket::TwoToSix
        } else if hours < dec!(24) {
            TimingBucket::SixToTwentyFour
        } else {
            TimingBucket::OverTwentyFour
        }
    }
}

impl std::fmt::Display for TimingBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingBucket::ZeroToTwo => write!(f, "0-2h"),
            TimingBucket::TwoToSix => write!(f, "2-6h"),
            TimingBucket::SixToTwentyFour => write!(f, "6-24h"),
            TimingBucket::OverTwentyFour => write!(f, "24h+"),
        }
    }
}

/// A typed, immutable market signal derived from one snapshot row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSignal {
    /// Market the split was observed on
    pub split_type: SplitType,
    /// Data source
    pub source: String,
    /// Sportsbook, if the source breaks splits out per book
    pub book: Option<String>,
    /// Side the money is backing
    pub recommended_side: Side,
    /// stake% - bet%, signed toward home/over
    pub differential: Decimal,
    /// Percentage of money on the home/over side
    pub stake_percentage: Decimal,
    /// Percentage of tickets on the home/over side
    pub bet_percentage: Decimal,
    /// Capture time of the snapshot
    pub timestamp: DateTime<Utc>,
    /// Hours between capture and event start
    pub hours_before_game: Decimal,
    /// Strength class from |differential|
    pub strength: SignalStrength,
    /// Timing bucket from hours before game
    pub timing_bucket: TimingBucket,
}

impl MarketSignal {
    /// Build a signal, deriving side, strength, and timing bucket
    pub fn new(
        split_type: SplitType,
        source: String,
        book: Option<String>,
        stake_percentage: Decimal,
        bet_percentage: Decimal,
        timestamp: DateTime<Utc>,
        hours_before_game: Decimal,
    ) -> Self {
        let differential = stake_percentage - bet_percentage;
        let recommended_side = match split_type {
            SplitType::Total => {
                if differential > Decimal::ZERO {
                    Side::Over
                } else {
                    Side::Under
                }
            }
            SplitType::Moneyline | SplitType::Spread => {
                if differential > Decimal::ZERO {
                    Side::Home
                } else {
                    Side::Away
                }
            }
        };

        Self {
            split_type,
            source,
            book,
            recommended_side,
            differential,
            stake_percentage,
            bet_percentage,
            timestamp,
            hours_before_game,
            strength: SignalStrength::from_differential(differential),
            timing_bucket: TimingBucket::from_hours(hours_before_game),
        }
    }

    /// |differential|
    pub fn abs_differential(&self) -> Decimal {
        self.differential.abs()
    }
}
