// JSON report: the same grouping as the text report, machine-readable.

use serde::Serialize;

use crate::grouping::ClusterGroups;

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub clusters: Vec<JsonCluster>,
    pub noise: Vec<String>,
    pub cluster_count: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonCluster {
    pub label: i32,
    /// First member, used as the cluster's display name
    pub name: String,
    pub members: Vec<String>,
}

impl JsonReport {
    pub fn from_groups(groups: &ClusterGroups) -> Self {
        let clusters = groups
            .clusters()
            .map(|(label, members)| JsonCluster {
                label,
                name: members.first().cloned().unwrap_or_default(),
                members: members.to_vec(),
            })
            .collect();

        Self {
            clusters,
            noise: groups.noise().map(<[String]>::to_vec).unwrap_or_default(),
            cluster_count: groups.cluster_count(),
        }
    }
}

/// Pretty-printed JSON for the grouping.
pub fn render_json(groups: &ClusterGroups) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from_groups(groups))
}
