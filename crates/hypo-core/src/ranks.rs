//! Ranking with average ranks for ties.

use statrs::statistics::{Data, OrderStatistics, RankTieBreaker};

/// Ranks of a set of values plus the tie correction term.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// 1-based ranks in input order; tied values share their average rank.
    pub ranks: Vec<f64>,
    /// Sum of `t^3 - t` over every group of `t` tied values.
    pub tie_term: f64,
}

impl Ranking {
    /// True when every value is tied with every other.
    pub fn all_tied(&self) -> bool {
        let n = self.ranks.len() as f64;
        self.ranks.len() > 1 && self.tie_term == n * n * n - n
    }

    pub fn has_ties(&self) -> bool {
        self.tie_term > 0.0
    }
}

/// Assigns average ranks, smallest value first.
pub fn rank_with_ties(values: &[f64]) -> Ranking {
    let mut data = Data::new(values.to_vec());
    let ranks = data.ranks(RankTieBreaker::Average);
    let tie_term = tie_term(&ranks);
    Ranking { ranks, tie_term }
}

/// Tied values share one average rank, so runs of equal ranks are the tie groups.
fn tie_term(ranks: &[f64]) -> f64 {
    let mut sorted = ranks.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
        .chunk_by(|a, b| a == b)
        .map(|group| {
            let t = group.len() as f64;
            t * t * t - t
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_without_ties() {
        let ranking = rank_with_ties(&[3.0, 1.0, 2.0]);
        assert_eq!(ranking.ranks, vec![3.0, 1.0, 2.0]);
        assert_eq!(ranking.tie_term, 0.0);
        assert!(!ranking.has_ties());
    }

    #[test]
    fn test_rank_with_ties() {
        let ranking = rank_with_ties(&[1.0, 0.5, 0.5, 1.0, 1.0]);
        assert_eq!(ranking.ranks, vec![4.0, 1.5, 1.5, 4.0, 4.0]);
        assert_eq!(ranking.tie_term, 6.0 + 24.0);
        assert!(ranking.has_ties());
        assert!(!ranking.all_tied());
    }

    #[test]
    fn test_all_tied() {
        assert!(rank_with_ties(&[2.0, 2.0, 2.0]).all_tied());
        assert!(!rank_with_ties(&[2.0]).all_tied());
    }
}
