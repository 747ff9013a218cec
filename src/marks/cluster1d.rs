//! One-dimensional coordinate clustering.
//!
//! Values are sorted and chained: a new cluster starts whenever the next value
//! lies more than `tol` past the *last member added* to the running cluster
//! (not its mean). Each cluster is reported as the arithmetic mean of its
//! members, so the output is ordered by construction.
use std::cmp::Ordering;

/// A group of nearby scalar observations.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub center: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Group `values` into chained clusters with gap tolerance `tol`.
pub fn cluster_1d(values: &[f64], tol: f64) -> Vec<Cluster> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut clusters = Vec::new();
    let mut start = 0usize;
    for i in 1..sorted.len() {
        if sorted[i] - sorted[i - 1] > tol {
            clusters.push(summarize(&sorted[start..i]));
            start = i;
        }
    }
    clusters.push(summarize(&sorted[start..]));
    clusters
}

/// Cluster centres only, ascending.
pub fn cluster_centers(values: &[f64], tol: f64) -> Vec<f64> {
    cluster_1d(values, tol).into_iter().map(|c| c.center).collect()
}

fn summarize(members: &[f64]) -> Cluster {
    let sum: f64 = members.iter().sum();
    Cluster {
        center: sum / members.len() as f64,
        min: members[0],
        max: members[members.len() - 1],
        count: members.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(cluster_1d(&[], 5.0).is_empty());
    }

    #[test]
    fn chaining_follows_last_member_not_mean() {
        // 0 → 4 → 8 → 12 each step within tol=5, so one chain even though the
        // spread (12) is far beyond the tolerance.
        let c = cluster_1d(&[12.0, 0.0, 8.0, 4.0], 5.0);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].count, 4);
        assert!((c[0].center - 6.0).abs() < 1e-12);
    }

    #[test]
    fn gaps_beyond_tolerance_split_clusters() {
        let centers = cluster_centers(&[100.0, 42.0, 43.0, 101.0, 200.0], 2.0);
        assert_eq!(centers, vec![42.5, 100.5, 200.0]);
    }

    #[test]
    fn gap_equal_to_tolerance_still_joins() {
        let c = cluster_1d(&[10.0, 12.0], 2.0);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn adjacent_values_within_tolerance_share_a_cluster_and_center_is_bounded() {
        let values = [3.0, 3.5, 9.0, 9.2, 9.9, 20.0, 21.5, 40.0];
        let tol = 1.0;
        let clusters = cluster_1d(&values, tol);
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in sorted.windows(2) {
            if pair[1] - pair[0] <= tol {
                let holder = clusters
                    .iter()
                    .find(|c| c.min <= pair[0] && pair[0] <= c.max)
                    .unwrap();
                assert!(holder.min <= pair[1] && pair[1] <= holder.max);
            }
        }
        for c in &clusters {
            assert!(c.min <= c.center && c.center <= c.max);
        }
        assert_eq!(clusters.len(), 5);
    }
}
