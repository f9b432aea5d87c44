//! Integration tests for query evaluation over a small corpus.

use talaash::analysis::Normalizer;
use talaash::error::Result;
use talaash::index::TextIndex;
use talaash::query::{ParsedQuery, QueryEngine, QueryKind};

fn wheat_index() -> TextIndex {
    let mut index = TextIndex::default();
    index.add_document(1, "Wheat prices rise");
    index.add_document(2, "Wheat exports fall");
    index.add_document(3, "Corn prices steady");
    index
}

#[test]
fn test_conjunctive_queries() -> Result<()> {
    let index = wheat_index();

    assert_eq!(
        index.evaluate(&QueryKind::Conjunctive, "wheat prices"),
        vec![1]
    );
    assert_eq!(index.evaluate(&QueryKind::Conjunctive, "WHEAT"), vec![1, 2]);
    assert!(
        index
            .evaluate(&QueryKind::Conjunctive, "wheat soybeans")
            .is_empty()
    );

    Ok(())
}

#[test]
fn test_disjunctive_queries() -> Result<()> {
    let index = wheat_index();

    assert_eq!(
        index.evaluate(&QueryKind::Disjunctive, "fall steady"),
        vec![2, 3]
    );
    assert_eq!(
        index.evaluate(&QueryKind::Disjunctive, "soybeans prices"),
        vec![1, 3]
    );

    Ok(())
}

#[test]
fn test_wildcard_queries() -> Result<()> {
    let index = wheat_index();

    assert_eq!(index.evaluate(&QueryKind::Wildcard, "pri*"), vec![1, 3]);
    assert_eq!(index.evaluate(&QueryKind::Wildcard, "*ts"), vec![2]);
    assert_eq!(index.evaluate(&QueryKind::Wildcard, "wh*t"), vec![1, 2]);
    assert_eq!(index.evaluate(&QueryKind::Wildcard, "CO*"), vec![3]);
    assert!(index.evaluate(&QueryKind::Wildcard, "corn").is_empty());
    assert!(index.evaluate(&QueryKind::Wildcard, "*").is_empty());
    assert!(index.evaluate(&QueryKind::Wildcard, "z*").is_empty());

    Ok(())
}

#[test]
fn test_stop_words_only_query() -> Result<()> {
    let index = wheat_index();

    assert!(
        index
            .evaluate(&QueryKind::Conjunctive, "the and of")
            .is_empty()
    );
    assert!(index.evaluate(&QueryKind::Disjunctive, "").is_empty());

    Ok(())
}

#[test]
fn test_conjunctive_is_subset_of_disjunctive() -> Result<()> {
    let index = wheat_index();
    let engine = QueryEngine::new(&index);

    for text in ["wheat prices", "corn fall", "rise exports wheat", "steady"] {
        let all = engine.evaluate(&QueryKind::Conjunctive, text);
        let any = engine.evaluate(&QueryKind::Disjunctive, text);
        for id in &all {
            assert!(any.contains(id), "{id} missing from disjunctive '{text}'");
        }
    }

    Ok(())
}

#[test]
fn test_query_lines() -> Result<()> {
    let index = wheat_index();

    let query = ParsedQuery::parse("type1 wheat prices")?;
    assert_eq!(index.evaluate(&query.kind, &query.text), vec![1]);

    let query = ParsedQuery::parse("  type3   ex*  ")?;
    assert_eq!(query.kind, QueryKind::Wildcard);
    assert_eq!(index.evaluate(&query.kind, &query.text), vec![2]);

    assert!(ParsedQuery::parse("type1").is_err());
    assert!(ParsedQuery::parse("type4 wheat").is_err());

    Ok(())
}

#[test]
fn test_custom_normalizer_applies_to_queries() -> Result<()> {
    let normalizer = Normalizer::with_sets(
        [',', '.'].into_iter().collect(),
        ["wheat".to_string()].into_iter().collect(),
    );
    let mut index = TextIndex::new(normalizer);
    index.add_document(1, "Wheat, corn.");

    assert!(index.evaluate(&QueryKind::Conjunctive, "wheat").is_empty());
    assert_eq!(index.evaluate(&QueryKind::Conjunctive, "CORN."), vec![1]);

    Ok(())
}
