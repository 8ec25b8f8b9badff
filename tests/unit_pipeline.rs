// Unit tests for the numeric stages and pipeline error handling.
//
// Covers the scaler/PCA/DBSCAN stages through their traits, the capping of
// PCA components, and the error taxonomy surfaced by `cluster_lines`.

use nalgebra::DMatrix;

use textcluster::pipeline::dbscan::{Dbscan, NOISE};
use textcluster::pipeline::pca::Pca;
use textcluster::pipeline::scaler::StandardScaler;
use textcluster::pipeline::traits::{Clusterer, Reducer, Scaler};
use textcluster::{cluster_lines, ClusterConfig, ClusterError};

fn corpus(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// Error taxonomy
// ============================================================

#[test]
fn two_empty_strings_are_empty_input() {
    let err = cluster_lines(&corpus(&["", ""]), &ClusterConfig::default()).unwrap_err();
    match err {
        ClusterError::EmptyInput { lines, ngram_size } => {
            assert_eq!(lines, 2);
            assert_eq!(ngram_size, 2);
        }
        other => panic!("expected EmptyInput, got {other:?}"),
    }
}

#[test]
fn no_lines_is_empty_input() {
    let err = cluster_lines(&[], &ClusterConfig::default()).unwrap_err();
    assert!(matches!(err, ClusterError::EmptyInput { lines: 0, .. }));
    assert!(err.to_string().contains("empty input"));
}

#[test]
fn strings_shorter_than_ngram_are_empty_input() {
    let config = ClusterConfig {
        ngram_size: 4,
        ..Default::default()
    };
    let err = cluster_lines(&corpus(&["abc", "de"]), &config).unwrap_err();
    assert!(matches!(err, ClusterError::EmptyInput { lines: 2, ngram_size: 4 }));
}

#[test]
fn invalid_epsilon_is_rejected() {
    let config = ClusterConfig {
        epsilon: -1.0,
        ..Default::default()
    };
    let err = cluster_lines(&corpus(&["abc"]), &config).unwrap_err();
    assert!(matches!(err, ClusterError::InvalidParameter { name: "epsilon", .. }));
}

// ============================================================
// Small corpora
// ============================================================

#[test]
fn single_string_is_noise() {
    let result = cluster_lines(&corpus(&["lonely.txt"]), &ClusterConfig::default()).unwrap();
    assert_eq!(result.labels, vec![NOISE]);
    assert_eq!(result.cluster_count(), 0);
    assert_eq!(result.groups.noise().unwrap(), &["lonely.txt"]);
}

#[test]
fn components_capped_by_corpus_size() {
    let result = cluster_lines(&corpus(&["abc", "abd", "xyz"]), &ClusterConfig::default()).unwrap();
    assert_eq!(result.components, 3);
    assert_eq!(result.vocabulary_size, 5);
}

#[test]
fn components_capped_by_vocabulary_size() {
    let names = corpus(&["ab", "ab", "ab", "ba", "ba"]);
    let result = cluster_lines(&names, &ClusterConfig::default()).unwrap();
    assert_eq!(result.vocabulary_size, 2);
    assert_eq!(result.components, 2);
}

#[test]
fn components_capped_by_config() {
    let names = corpus(&["alpha", "bravo", "charlie", "delta", "echo"]);
    let config = ClusterConfig {
        n_components: 2,
        ..Default::default()
    };
    assert_eq!(cluster_lines(&names, &config).unwrap().components, 2);
}

#[test]
fn identical_strings_form_one_cluster() {
    // Every column is constant, so every point sits at the origin
    let names = corpus(&["same", "same", "same"]);
    let result = cluster_lines(&names, &ClusterConfig::default()).unwrap();
    assert_eq!(result.labels, vec![0, 0, 0]);
    assert_eq!(result.degenerate_columns, result.vocabulary_size);
}

#[test]
fn empty_lines_take_part_in_clustering() {
    let names = corpus(&["", "", "", "ab"]);
    let result = cluster_lines(&names, &ClusterConfig::default()).unwrap();
    assert_eq!(result.labels.len(), 4);
    assert_eq!(result.groups.total_members(), 4);
}

#[test]
fn file_name_corpus_partition_is_reproducible() {
    let mut names = Vec::new();
    for i in 0..120 {
        names.push(format!("IMG_{:04}.jpg", i * 7));
    }
    for i in 0..60 {
        names.push(format!("report-{}-final.pdf", i % 13));
    }
    for i in 0..40 {
        names.push(format!("server.log.{i}"));
    }

    let config = ClusterConfig::default();
    let first = cluster_lines(&names, &config).unwrap();
    let second = cluster_lines(&names, &config).unwrap();

    assert_eq!(first.labels, second.labels);
    assert_eq!(first.groups.total_members(), names.len());
    assert_eq!(first.components, 50);

    // Cluster ids are dense: 0..count with no gaps
    let k = first.cluster_count() as i32;
    assert!(first.labels.iter().all(|&l| l == NOISE || (0..k).contains(&l)));
    for label in 0..k {
        assert!(first.groups.get(label).is_some_and(|m| !m.is_empty()));
    }
}

// ============================================================
// Stages through their traits
// ============================================================

#[test]
fn stages_compose_through_traits() {
    let x = DMatrix::from_row_slice(
        6,
        2,
        &[0.0, 0.0, 0.1, 0.0, 0.0, 0.1, 9.0, 9.0, 9.1, 9.0, 9.0, 9.1],
    );
    let scaler: &dyn Scaler = &StandardScaler::new();
    let reducer: &dyn Reducer = &Pca::new(2);
    let clusterer: &dyn Clusterer = &Dbscan::new(0.5, 3);

    let labels = clusterer
        .cluster(&reducer.fit_transform(&scaler.fit_transform(&x).unwrap()).unwrap())
        .unwrap();

    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[1], labels[2]);
    assert_eq!(labels[3], labels[4]);
    assert_eq!(labels[4], labels[5]);
    assert_ne!(labels[0], labels[3]);
    assert!(labels.iter().all(|&l| l != NOISE));
}

#[test]
fn pca_effective_components() {
    let pca = Pca::new(50);
    assert_eq!(pca.effective_components(10, 200), 10);
    assert_eq!(pca.effective_components(500, 20), 20);
    assert_eq!(Pca::new(3).effective_components(500, 20), 3);
}
