//! Supervised measures
//!
//! Compare a rank mapping against a withheld set of known members.

use rustc_hash::FxHashSet;

use super::Measure;
use crate::algorithms::RankMapping;

/// Area under the ROC curve: the probability that a uniformly drawn known
/// member outranks a uniformly drawn non-member, ties counted half.
///
/// Returns NaN when the known set is empty or covers every scored node —
/// there is no pair to compare.
#[derive(Debug, Clone)]
pub struct Auc {
    known: FxHashSet<u32>,
}

impl Auc {
    /// Create the measure from the withheld member set
    pub fn new(members: impl IntoIterator<Item = u32>) -> Self {
        Self {
            known: members.into_iter().collect(),
        }
    }
}

impl Measure for Auc {
    fn evaluate(&self, ranks: &RankMapping) -> f64 {
        let n = ranks.len();
        let positives = (0..n as u32).filter(|v| self.known.contains(v)).count();
        let negatives = n - positives;
        if positives == 0 || negatives == 0 {
            return f64::NAN;
        }

        // Mann-Whitney U via tie-averaged ranks of the positives.
        let mut order: Vec<u32> = (0..n as u32).collect();
        order.sort_by(|&a, &b| ranks.get(a).total_cmp(&ranks.get(b)));

        let mut rank_sum = 0.0;
        let mut i = 0;
        while i < n {
            // Find the tie group [i, j).
            let mut j = i + 1;
            while j < n && ranks.get(order[j]) == ranks.get(order[i]) {
                j += 1;
            }
            let average_rank = (i + 1 + j) as f64 / 2.0;
            for &node in &order[i..j] {
                if self.known.contains(&node) {
                    rank_sum += average_rank;
                }
            }
            i = j;
        }

        let p = positives as f64;
        (rank_sum - p * (p + 1.0) / 2.0) / (p * negatives as f64)
    }
}

/// Normalized discounted cumulative gain with binary relevance: how close
/// the descending-score ordering comes to listing every known member
/// first.
#[derive(Debug, Clone)]
pub struct Ndcg {
    known: FxHashSet<u32>,
}

impl Ndcg {
    /// Create the measure from the withheld member set
    pub fn new(members: impl IntoIterator<Item = u32>) -> Self {
        Self {
            known: members.into_iter().collect(),
        }
    }
}

impl Measure for Ndcg {
    fn evaluate(&self, ranks: &RankMapping) -> f64 {
        let n = ranks.len();
        let positives = (0..n as u32).filter(|v| self.known.contains(v)).count();
        if positives == 0 {
            return f64::NAN;
        }

        let mut order: Vec<u32> = (0..n as u32).collect();
        // Descending by score, node id breaking ties deterministically.
        order.sort_by(|&a, &b| ranks.get(b).total_cmp(&ranks.get(a)).then(a.cmp(&b)));

        let discount = |position: usize| 1.0 / ((position + 2) as f64).log2();

        let dcg: f64 = order
            .iter()
            .enumerate()
            .filter(|(_, node)| self.known.contains(node))
            .map(|(position, _)| discount(position))
            .sum();
        let ideal: f64 = (0..positives).map(discount).sum();

        dcg / ideal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auc_perfect_separation() {
        let ranks = RankMapping::new(vec![0.9, 0.8, 0.3, 0.1]);
        let auc = Auc::new([0, 1]);
        assert!((auc.evaluate(&ranks) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_auc_inverted_separation() {
        let ranks = RankMapping::new(vec![0.9, 0.8, 0.3, 0.1]);
        let auc = Auc::new([2, 3]);
        assert!(auc.evaluate(&ranks).abs() < 1e-12);
    }

    #[test]
    fn test_auc_all_ties_is_half() {
        let ranks = RankMapping::new(vec![0.5, 0.5, 0.5, 0.5]);
        let auc = Auc::new([0, 3]);
        assert!((auc.evaluate(&ranks) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_auc_degenerate_sets_are_nan() {
        let ranks = RankMapping::new(vec![0.5, 0.6]);
        assert!(Auc::new([]).evaluate(&ranks).is_nan());
        assert!(Auc::new([0, 1]).evaluate(&ranks).is_nan());
    }

    #[test]
    fn test_ndcg_perfect_ordering() {
        let ranks = RankMapping::new(vec![0.9, 0.8, 0.3, 0.1]);
        let ndcg = Ndcg::new([0, 1]);
        assert!((ndcg.evaluate(&ranks) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ndcg_penalizes_late_members() {
        let ranks = RankMapping::new(vec![0.9, 0.8, 0.3, 0.1]);
        let ndcg = Ndcg::new([2, 3]);
        let value = ndcg.evaluate(&ranks);
        assert!(value > 0.0 && value < 1.0);
    }
}
