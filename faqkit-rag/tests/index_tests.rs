//! Persistence and search-ordering tests for the vector index.

use faqkit_rag::{Chunk, RagError, VectorIndex};
use proptest::prelude::*;
use tempfile::TempDir;

fn chunk(i: usize, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: format!("faq_{i}"),
        document_id: "faq".to_string(),
        chunk_index: i,
        text: format!("chunk {i}"),
        embedding,
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let chunks =
        vec![chunk(0, vec![1.0, 0.0]), chunk(1, vec![0.0, 1.0]), chunk(2, vec![0.7, 0.7])];
    let index = VectorIndex::new("mock-embed", 2, chunks);
    index.save(dir.path()).unwrap();

    let loaded = VectorIndex::load(dir.path()).unwrap();
    assert_eq!(loaded.meta(), index.meta());
    assert_eq!(loaded.len(), 3);

    // Retrieving with k = N returns all N chunks, no loss.
    let results = loaded.search(&[1.0, 0.0], 3);
    assert_eq!(results.len(), 3);
    let mut ids: Vec<&str> = results.iter().map(|r| r.chunk.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["faq_0", "faq_1", "faq_2"]);
}

#[test]
fn load_missing_directory_is_index_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("never-built");
    let err = VectorIndex::load(&missing).unwrap_err();
    assert!(matches!(err, RagError::IndexNotFound { .. }), "got {err:?}");
}

#[test]
fn load_empty_directory_is_index_not_found() {
    let dir = TempDir::new().unwrap();
    let err = VectorIndex::load(dir.path()).unwrap_err();
    assert!(matches!(err, RagError::IndexNotFound { .. }), "got {err:?}");
}

#[test]
fn rebuild_overwrites_previous_index() {
    let dir = TempDir::new().unwrap();

    let first = VectorIndex::new(
        "mock-embed",
        2,
        vec![chunk(0, vec![1.0, 0.0]), chunk(1, vec![0.0, 1.0]), chunk(2, vec![0.5, 0.5])],
    );
    first.save(dir.path()).unwrap();

    let second = VectorIndex::new("mock-embed", 2, vec![chunk(0, vec![0.3, 0.4])]);
    second.save(dir.path()).unwrap();

    let loaded = VectorIndex::load(dir.path()).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.meta().chunk_count, 1);
}

#[test]
fn search_returns_exactly_min_k_results() {
    let chunks = (0..5).map(|i| chunk(i, vec![i as f32 + 1.0, 1.0])).collect();
    let index = VectorIndex::new("mock-embed", 2, chunks);

    assert_eq!(index.search(&[1.0, 1.0], 2).len(), 2);
    assert_eq!(index.search(&[1.0, 1.0], 5).len(), 5);
    assert_eq!(index.search(&[1.0, 1.0], 50).len(), 5);
}

#[test]
fn search_ranks_by_descending_similarity() {
    let chunks = vec![
        chunk(0, vec![0.0, 1.0]),
        chunk(1, vec![1.0, 0.0]),
        chunk(2, vec![0.9, 0.1]),
    ];
    let index = VectorIndex::new("mock-embed", 2, chunks);

    let results = index.search(&[1.0, 0.0], 3);
    let ids: Vec<&str> = results.iter().map(|r| r.chunk.id.as_str()).collect();
    assert_eq!(ids, vec!["faq_1", "faq_2", "faq_0"]);
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

/// **Property: search ordering**
/// *For any* set of embedded chunks, searching SHALL return exactly
/// `min(top_k, len)` results ordered by descending cosine similarity.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 8;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_exact_count(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let count = embeddings.len();
            let chunks: Vec<Chunk> =
                embeddings.into_iter().enumerate().map(|(i, e)| chunk(i, e)).collect();
            let index = VectorIndex::new("mock-embed", DIM, chunks);

            let results = index.search(&query, top_k);
            prop_assert_eq!(results.len(), top_k.min(count));

            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
