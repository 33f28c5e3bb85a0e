use serde::{Deserialize, Serialize};

/// Marks below this are `Low`.
pub const MEDIUM_THRESHOLD: f64 = 40.0;
/// Marks at or above this are `High`.
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Bloom tier of a single subject mark. Ordered Low < Medium < High.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Ordinal weight used by the share summary: Low=0, Medium=1, High=2.
    pub fn weight(self) -> u32 {
        match self {
            Tier::Low => 0,
            Tier::Medium => 1,
            Tier::High => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Low => "Slow bloomer",
            Tier::Medium => "Medium bloomer",
            Tier::High => "Fast bloomer",
        }
    }
}

/// Classifies a raw mark. Total over all inputs: anything that is not
/// `>= 40` (negative marks, NaN) lands in `Low`.
pub fn classify(mark: f64) -> Tier {
    if mark >= HIGH_THRESHOLD {
        Tier::High
    } else if mark >= MEDIUM_THRESHOLD {
        Tier::Medium
    } else {
        Tier::Low
    }
}
