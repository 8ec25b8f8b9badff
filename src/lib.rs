// textcluster: group short text lines by character n-gram similarity.
//
// This is the library root. Each module is one stage of the pipeline
// (read -> n-gram features -> standardize -> PCA -> DBSCAN -> report).

pub mod config;
pub mod error;
pub mod features;
pub mod grouping;
pub mod input;
pub mod output;
pub mod pipeline;

pub use config::ClusterConfig;
pub use error::ClusterError;
pub use grouping::ClusterGroups;
pub use pipeline::{cluster_lines, ClusterPipeline, ClusterResult};
