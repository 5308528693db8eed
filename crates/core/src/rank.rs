use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankTableError {
    #[error("rank thresholds must be non-decreasing (middle {middle}, upper {upper}, top {top})")]
    NonMonotonic { middle: u32, upper: u32, top: u32 },

    #[error("percentage threshold must be at most 100, got {provided}")]
    PercentOutOfRange { provided: u32 },
}

//
// ─── TIERS ─────────────────────────────────────────────────────────────────────
//

/// Four ordinal ranks, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankTier {
    Skimmer,
    NutshellRegular,
    OnChainObserver,
    NutshellDiehard,
}

impl RankTier {
    pub const ALL: [RankTier; 4] = [
        RankTier::Skimmer,
        RankTier::NutshellRegular,
        RankTier::OnChainObserver,
        RankTier::NutshellDiehard,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RankTier::Skimmer => "Skimmer",
            RankTier::NutshellRegular => "Nutshell Regular",
            RankTier::OnChainObserver => "On-Chain Observer",
            RankTier::NutshellDiehard => "Nutshell Diehard",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            RankTier::Skimmer => {
                "You definitely opened the emails… reading them is next week’s goal."
            }
            RankTier::NutshellRegular => {
                "You are catching the big stories, but a few details slipped through the cracks."
            }
            RankTier::OnChainObserver => {
                "You are paying close attention. One more right answer and you are in diehard territory."
            }
            RankTier::NutshellDiehard => {
                "You caught every story, chart, and macro take from last week’s issues. You are officially one of the Crypto Nutshell obsessives."
            }
        }
    }
}

/// Display payload for a rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInfo {
    pub tier: RankTier,
    pub label: String,
    pub description: String,
}

impl From<RankTier> for RankInfo {
    fn from(tier: RankTier) -> Self {
        Self {
            tier,
            label: tier.label().to_owned(),
            description: tier.description().to_owned(),
        }
    }
}

//
// ─── THRESHOLDS ────────────────────────────────────────────────────────────────
//

/// Minimum needed to reach the middle, upper and top tier.
///
/// * `Absolute` compares the raw score.
/// * `Proportional` compares the share of correct answers in whole percent, so
///   the same table works for any question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankThresholds {
    Absolute { middle: u32, upper: u32, top: u32 },
    Proportional { middle_pct: u32, upper_pct: u32, top_pct: u32 },
}

impl RankThresholds {
    fn validate(self) -> Result<Self, RankTableError> {
        let (middle, upper, top) = match self {
            RankThresholds::Absolute { middle, upper, top } => (middle, upper, top),
            RankThresholds::Proportional {
                middle_pct,
                upper_pct,
                top_pct,
            } => {
                if let Some(&provided) = [middle_pct, upper_pct, top_pct].iter().find(|p| **p > 100) {
                    return Err(RankTableError::PercentOutOfRange { provided });
                }
                (middle_pct, upper_pct, top_pct)
            }
        };

        if middle > upper || upper > top {
            return Err(RankTableError::NonMonotonic { middle, upper, top });
        }
        Ok(self)
    }

    fn reaches(self, score: usize, total: usize, index: usize) -> bool {
        let score = u64::try_from(score).unwrap_or(u64::MAX);
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        match self {
            RankThresholds::Absolute { middle, upper, top } => {
                score >= u64::from([middle, upper, top][index])
            }
            RankThresholds::Proportional {
                middle_pct,
                upper_pct,
                top_pct,
            } => {
                let pct = u64::from([middle_pct, upper_pct, top_pct][index]);
                score.saturating_mul(100) >= pct.saturating_mul(total)
            }
        }
    }
}

//
// ─── TABLE ─────────────────────────────────────────────────────────────────────
//

/// Maps a final score to a rank. Higher scores never map to a lower tier.
///
/// # Examples
///
/// ```
/// # use quiz_core::rank::{RankTable, RankTier};
/// let table = RankTable::newsletter();
/// assert_eq!(table.tier_for(4, 5), RankTier::OnChainObserver);
///
/// let scaled = RankTable::proportional();
/// assert_eq!(scaled.tier_for(8, 10), RankTier::OnChainObserver);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RankThresholds", into = "RankThresholds")]
pub struct RankTable {
    thresholds: RankThresholds,
}

impl RankTable {
    /// The weekly newsletter table, tuned for five questions:
    /// 0–1 Skimmer, 2–3 Nutshell Regular, 4 On-Chain Observer, 5 Nutshell Diehard.
    #[must_use]
    pub fn newsletter() -> Self {
        Self {
            thresholds: RankThresholds::Absolute {
                middle: 2,
                upper: 4,
                top: 5,
            },
        }
    }

    /// Share-of-correct table (40% / 80% / 100%). Identical to
    /// [`RankTable::newsletter`] for five questions.
    #[must_use]
    pub fn proportional() -> Self {
        Self {
            thresholds: RankThresholds::Proportional {
                middle_pct: 40,
                upper_pct: 80,
                top_pct: 100,
            },
        }
    }

    /// # Errors
    ///
    /// - `NonMonotonic` if a higher tier needs less than a lower one
    /// - `PercentOutOfRange` for a percentage above 100
    pub fn new(thresholds: RankThresholds) -> Result<Self, RankTableError> {
        Ok(Self {
            thresholds: thresholds.validate()?,
        })
    }

    /// Question count an absolute table was written for, if any.
    #[must_use]
    pub fn absolute_top(&self) -> Option<u32> {
        match self.thresholds {
            RankThresholds::Absolute { top, .. } => Some(top),
            RankThresholds::Proportional { .. } => None,
        }
    }

    /// Whether the table ranks a quiz of `question_count` the way it was
    /// written to. Proportional tables fit any count.
    #[must_use]
    pub fn fits(&self, question_count: usize) -> bool {
        self.absolute_top()
            .is_none_or(|top| usize::try_from(top).ok() == Some(question_count))
    }

    #[must_use]
    pub fn tier_for(&self, score: usize, total: usize) -> RankTier {
        (0..3)
            .rev()
            .find(|&index| self.thresholds.reaches(score, total, index))
            .map_or(RankTier::Skimmer, |index| RankTier::ALL[index + 1])
    }

    #[must_use]
    pub fn rank(&self, score: usize, total: usize) -> RankInfo {
        self.tier_for(score, total).into()
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::newsletter()
    }
}

impl TryFrom<RankThresholds> for RankTable {
    type Error = RankTableError;

    fn try_from(thresholds: RankThresholds) -> Result<Self, Self::Error> {
        Self::new(thresholds)
    }
}

impl From<RankTable> for RankThresholds {
    fn from(table: RankTable) -> Self {
        table.thresholds
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
