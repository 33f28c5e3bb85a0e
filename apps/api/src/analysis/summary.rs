use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::tier::{classify, Tier};
use crate::store::models::SubjectMark;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectTier {
    pub subject: String,
    pub mark: f64,
    pub tier: Tier,
}

/// A subject's percentage of the student's total tier weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectShare {
    pub subject: String,
    pub share: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    /// Every subject is `Low` (or there are none), so there is nothing to divide by.
    #[error("total tier weight is zero; no share distribution exists")]
    ZeroTotalWeight,
}

/// Classifies each mark, keeping subject order.
pub fn classify_marks(marks: &[SubjectMark]) -> Vec<SubjectTier> {
    marks
        .iter()
        .map(|m| SubjectTier {
            subject: m.subject.clone(),
            mark: m.mark,
            tier: classify(m.mark),
        })
        .collect()
}

/// Ranks subjects by their share of the summed tier weight.
///
/// share = weight / total * 100, sorted descending. The sort is stable, so
/// equal shares keep their input order. A zero total is an error rather than
/// a row of NaNs.
pub fn summarize(tiers: &[SubjectTier]) -> Result<Vec<SubjectShare>, SummaryError> {
    let total: u32 = tiers.iter().map(|t| t.tier.weight()).sum();
    if total == 0 {
        return Err(SummaryError::ZeroTotalWeight);
    }

    let mut shares: Vec<SubjectShare> = tiers
        .iter()
        .map(|t| SubjectShare {
            subject: t.subject.clone(),
            share: f64::from(t.tier.weight()) / f64::from(total) * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.share.total_cmp(&a.share));
    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(pairs: &[(&str, f64)]) -> Vec<SubjectMark> {
        pairs
            .iter()
            .map(|(s, m)| SubjectMark {
                subject: s.to_string(),
                mark: *m,
            })
            .collect()
    }

    #[test]
    fn test_three_tier_scenario() {
        let tiers = classify_marks(&marks(&[("Math", 30.0), ("Physics", 55.0), ("Chem", 85.0)]));
        assert_eq!(
            tiers.iter().map(|t| t.tier).collect::<Vec<_>>(),
            vec![Tier::Low, Tier::Medium, Tier::High]
        );

        let shares = summarize(&tiers).unwrap();
        let order: Vec<_> = shares.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(order, vec!["Chem", "Physics", "Math"]);
        assert!((shares[0].share - 66.666).abs() < 0.01, "{}", shares[0].share);
        assert!((shares[1].share - 33.333).abs() < 0.01, "{}", shares[1].share);
        assert_eq!(shares[2].share, 0.0);
    }

    #[test]
    fn test_all_low_is_degenerate() {
        let tiers = classify_marks(&marks(&[("Math", 10.0), ("Physics", 20.0)]));
        assert_eq!(summarize(&tiers), Err(SummaryError::ZeroTotalWeight));
    }

    #[test]
    fn test_no_subjects_is_degenerate() {
        assert_eq!(summarize(&[]), Err(SummaryError::ZeroTotalWeight));
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let tiers = classify_marks(&marks(&[
            ("A", 95.0),
            ("B", 41.0),
            ("C", 12.0),
            ("D", 70.0),
            ("E", 69.5),
            ("F", 88.0),
        ]));
        let sum: f64 = summarize(&tiers).unwrap().iter().map(|s| s.share).sum();
        assert!((sum - 100.0).abs() < 1e-9, "Sum was {sum}");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let tiers = classify_marks(&marks(&[
            ("Bio", 50.0),
            ("Art", 90.0),
            ("Chem", 60.0),
            ("Dance", 75.0),
        ]));
        let order: Vec<_> = summarize(&tiers)
            .unwrap()
            .into_iter()
            .map(|s| s.subject)
            .collect();
        assert_eq!(order, vec!["Art", "Dance", "Bio", "Chem"]);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let tiers = classify_marks(&marks(&[("Math", 45.0), ("Physics", 72.0), ("Chem", 5.0)]));
        assert_eq!(summarize(&tiers), summarize(&tiers));
    }
}
