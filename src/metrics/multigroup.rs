//! Multi-group aggregation
//!
//! Batch experiments rank many seed groups with the same algorithm and
//! average a measure over the per-group mappings. Aggregation is
//! embarrassingly parallel and runs on the rayon pool; the ranking calls
//! themselves stay sequential and single-threaded.

use rayon::prelude::*;

use super::Measure;
use crate::algorithms::{Personalization, RankMapping};

/// Averages a per-group supervised measure (one withheld member set per
/// group) over matching per-group rank mappings.
pub struct MultiSupervised<M> {
    measures: Vec<M>,
}

impl<M: Measure + Sync> MultiSupervised<M> {
    /// Create from one measure per group, in group order
    pub fn new(measures: Vec<M>) -> Self {
        Self { measures }
    }

    /// Average the group measures over matching rank mappings
    ///
    /// `group_ranks[i]` must be the mapping computed for group `i`.
    pub fn evaluate(&self, group_ranks: &[RankMapping]) -> f64 {
        debug_assert_eq!(self.measures.len(), group_ranks.len());
        if self.measures.is_empty() {
            return f64::NAN;
        }
        let total: f64 = self
            .measures
            .par_iter()
            .zip(group_ranks.par_iter())
            .map(|(measure, ranks)| measure.evaluate(ranks))
            .sum();
        total / self.measures.len() as f64
    }
}

/// Averages one graph-level unsupervised measure over per-group mappings.
pub struct MultiUnsupervised<M> {
    measure: M,
}

impl<M: Measure + Sync> MultiUnsupervised<M> {
    /// Create from the shared measure
    pub fn new(measure: M) -> Self {
        Self { measure }
    }

    /// Average the measure over all group mappings
    pub fn evaluate(&self, group_ranks: &[RankMapping]) -> f64 {
        if group_ranks.is_empty() {
            return f64::NAN;
        }
        let total: f64 = group_ranks
            .par_iter()
            .map(|ranks| self.measure.evaluate(ranks))
            .sum();
        total / group_ranks.len() as f64
    }
}

/// Split every group into a training prefix and a test remainder.
///
/// Selection is a deterministic interleave (every k-th member trains), so
/// repeated experiments on the same groups see the same split. Each
/// non-empty group trains at least one member.
pub fn split_groups(groups: &[Vec<u32>], training_fraction: f64) -> (Vec<Vec<u32>>, Vec<Vec<u32>>) {
    let fraction = training_fraction.clamp(0.0, 1.0);
    let mut training = Vec::with_capacity(groups.len());
    let mut test = Vec::with_capacity(groups.len());

    for group in groups {
        if group.is_empty() {
            training.push(Vec::new());
            test.push(Vec::new());
            continue;
        }
        let take = ((group.len() as f64 * fraction).round() as usize)
            .max(1)
            .min(group.len());
        let stride = group.len() as f64 / take as f64;

        let mut train_members = Vec::with_capacity(take);
        let mut picked = vec![false; group.len()];
        for i in 0..take {
            let idx = (i as f64 * stride) as usize;
            picked[idx] = true;
            train_members.push(group[idx]);
        }
        let test_members = group
            .iter()
            .enumerate()
            .filter(|(i, _)| !picked[*i])
            .map(|(_, &v)| v)
            .collect();

        training.push(train_members);
        test.push(test_members);
    }

    (training, test)
}

/// Turn each group into a unit-weight seed personalization
pub fn to_seeds(groups: &[Vec<u32>]) -> Vec<Personalization> {
    groups
        .iter()
        .map(|group| Personalization::from_nodes(group.iter().copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::supervised::Auc;
    use crate::metrics::unsupervised::Density;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::csr::CsrGraph;

    #[test]
    fn test_multi_supervised_averages_over_groups() {
        let perfect = RankMapping::new(vec![0.9, 0.8, 0.1, 0.1]);
        let inverted = RankMapping::new(vec![0.1, 0.1, 0.8, 0.9]);

        let multi = MultiSupervised::new(vec![Auc::new([0, 1]), Auc::new([0, 1])]);
        let value = multi.evaluate(&[perfect, inverted]);

        // One group scores 1.0, the other 0.0.
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_multi_unsupervised_averages_over_groups() {
        let graph = CsrGraph::from_builder(&GraphBuilder::from_edges(
            [("a", "b"), ("b", "c"), ("c", "a")],
            false,
        ));
        let clique = RankMapping::new(vec![1.0, 1.0, 1.0]);

        let multi = MultiUnsupervised::new(Density::new(&graph));
        let value = multi.evaluate(&[clique.clone(), clique]);
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_split_groups_is_deterministic_and_disjoint() {
        let groups = vec![vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]];
        let (train_a, test_a) = split_groups(&groups, 0.3);
        let (train_b, _) = split_groups(&groups, 0.3);

        assert_eq!(train_a, train_b);
        assert_eq!(train_a[0].len(), 3);
        assert_eq!(test_a[0].len(), 7);
        for member in &train_a[0] {
            assert!(!test_a[0].contains(member));
        }
    }

    #[test]
    fn test_split_groups_trains_at_least_one_member() {
        let groups = vec![vec![7, 8]];
        let (train, test) = split_groups(&groups, 0.01);
        assert_eq!(train[0], vec![7]);
        assert_eq!(test[0], vec![8]);
    }

    #[test]
    fn test_to_seeds_unit_weights() {
        let seeds = to_seeds(&[vec![1, 3]]);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].get(1), 1.0);
        assert_eq!(seeds[0].get(3), 1.0);
        assert_eq!(seeds[0].get(2), 0.0);
    }
}
