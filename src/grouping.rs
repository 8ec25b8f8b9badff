// Cluster grouping: original strings collected under their labels.

use std::collections::BTreeMap;

use crate::error::{ClusterError, Result};
use crate::pipeline::dbscan::NOISE;

/// Strings grouped by cluster label, input order preserved inside each group.
///
/// Backed by a `BTreeMap`, so iteration is by ascending label with the noise
/// group (-1) first; callers that want noise last use `clusters` + `noise`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterGroups {
    groups: BTreeMap<i32, Vec<String>>,
}

impl ClusterGroups {
    /// Group `corpus[i]` under `labels[i]` in a single pass.
    pub fn from_labels(corpus: &[String], labels: &[i32]) -> Result<Self> {
        if corpus.len() != labels.len() {
            return Err(ClusterError::DimensionMismatch {
                stage: "grouping",
                expected: corpus.len(),
                found: labels.len(),
            });
        }

        let mut groups: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        for (text, &label) in corpus.iter().zip(labels) {
            groups.entry(label).or_default().push(text.clone());
        }
        Ok(Self { groups })
    }

    /// Real clusters (label >= 0) in ascending label order.
    pub fn clusters(&self) -> impl Iterator<Item = (i32, &[String])> {
        self.groups
            .iter()
            .filter(|&(&label, _)| label != NOISE)
            .map(|(&label, members)| (label, members.as_slice()))
    }

    /// Strings outside any cluster, if there are any.
    pub fn noise(&self) -> Option<&[String]> {
        self.groups.get(&NOISE).map(Vec::as_slice)
    }

    /// Members of one label.
    pub fn get(&self, label: i32) -> Option<&[String]> {
        self.groups.get(&label).map(Vec::as_slice)
    }

    /// Number of clusters, not counting the noise group.
    pub fn cluster_count(&self) -> usize {
        self.groups.len() - usize::from(self.groups.contains_key(&NOISE))
    }

    /// Number of strings across all groups, noise included.
    pub fn total_members(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// The group that contains `text`, if any.
    pub fn label_of(&self, text: &str) -> Option<i32> {
        self.groups
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == text))
            .map(|(&label, _)| label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_groups_preserve_input_order() {
        let groups =
            ClusterGroups::from_labels(&corpus(&["a", "b", "c", "d", "e"]), &[1, 0, -1, 1, 0])
                .unwrap();

        assert_eq!(groups.get(1).unwrap(), &["a", "d"]);
        assert_eq!(groups.get(0).unwrap(), &["b", "e"]);
        assert_eq!(groups.noise().unwrap(), &["c"]);
        assert_eq!(groups.cluster_count(), 2);
        assert_eq!(groups.total_members(), 5);

        let labels: Vec<i32> = groups.clusters().map(|(l, _)| l).collect();
        assert_eq!(labels, vec![0, 1]);
    }

    #[test]
    fn test_no_noise_group() {
        let groups = ClusterGroups::from_labels(&corpus(&["a", "b"]), &[0, 0]).unwrap();
        assert!(groups.noise().is_none());
        assert_eq!(groups.cluster_count(), 1);
    }

    #[test]
    fn test_all_noise() {
        let groups = ClusterGroups::from_labels(&corpus(&["a", "b"]), &[-1, -1]).unwrap();
        assert_eq!(groups.cluster_count(), 0);
        assert_eq!(groups.clusters().count(), 0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = ClusterGroups::from_labels(&corpus(&["a"]), &[0, 1]).unwrap_err();
        assert!(matches!(err, ClusterError::DimensionMismatch { .. }));
    }
}
