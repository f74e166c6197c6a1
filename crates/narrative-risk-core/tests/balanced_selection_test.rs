//! Full-state verification of balanced dual-registry selection.
//!
//! Synthetic catalogs with engineered descriptions drive the identifier
//! through its inclusion policy: per-registry floors, pooled backfill
//! when one side runs short, the 2k cap, and the technical-term guard.

use std::sync::Arc;

use narrative_risk_core::registry::RegistryStore;
use narrative_risk_core::stubs::HashEmbeddingProvider;
use narrative_risk_core::types::{Registry, TechniqueCategory, TechniqueDef};
use narrative_risk_core::TechniqueIdentifier;

const QUERY: &str = "the corrupt elite abandoned honest workers while prices \
                     rise and the crisis deepens every single day";

fn def(id: &str, description: &str) -> TechniqueDef {
    TechniqueDef {
        id: id.into(),
        name: format!("Technique {id}"),
        description: description.into(),
        category: TechniqueCategory::Exploit,
    }
}

/// Descriptions identical to the query embed to the same unit vector, so
/// every synthetic entry scores cosine 1.0 before adjustment.
async fn store_of(registry: Registry, ids: &[&str]) -> Arc<RegistryStore> {
    let provider = HashEmbeddingProvider::new();
    let defs: Vec<TechniqueDef> = ids.iter().map(|id| def(id, QUERY)).collect();
    Arc::new(
        RegistryStore::load(registry, defs, &provider)
            .await
            .expect("synthetic store loads"),
    )
}

// =============================================================================
// TEST 1: Backfill - 8 Qualifying in A, 2 in B, k = 5
// =============================================================================
#[tokio::test]
async fn backfill_fills_shortfall_from_deeper_registry() {
    println!("\n=== BALANCED SELECTION TEST 1: Backfill 8-vs-2 ===");

    let provider = Arc::new(HashEmbeddingProvider::new());
    let catalog_a = store_of(
        Registry::CatalogA,
        &["A-1", "A-2", "A-3", "A-4", "A-5", "A-6", "A-7", "A-8"],
    )
    .await;
    let catalog_b = store_of(Registry::CatalogB, &["B-1", "B-2"]).await;

    let identifier =
        TechniqueIdentifier::new(provider, catalog_a, catalog_b).expect("identifier");
    let results = identifier.identify(QUERY).await.expect("identify");

    let from_a = results.iter().filter(|r| r.registry == Registry::CatalogA).count();
    let from_b = results.iter().filter(|r| r.registry == Registry::CatalogB).count();
    println!("results = {} (A: {from_a}, B: {from_b})", results.len());

    // 5 guaranteed from A + 2 from B + 3 backfilled from A.
    assert_eq!(results.len(), 10);
    assert_eq!(from_a, 8);
    assert_eq!(from_b, 2);

    println!("[PASS] Shortfall backfilled from the deeper registry");
}

// =============================================================================
// TEST 2: Floor - Both Registries Deep, Each Keeps Exactly k Seats
// =============================================================================
#[tokio::test]
async fn each_registry_keeps_its_floor_when_both_are_deep() {
    println!("\n=== BALANCED SELECTION TEST 2: Per-Registry Floor ===");

    let provider = Arc::new(HashEmbeddingProvider::new());
    let catalog_a = store_of(
        Registry::CatalogA,
        &["A-1", "A-2", "A-3", "A-4", "A-5", "A-6", "A-7"],
    )
    .await;
    let catalog_b = store_of(
        Registry::CatalogB,
        &["B-1", "B-2", "B-3", "B-4", "B-5", "B-6", "B-7"],
    )
    .await;

    let identifier =
        TechniqueIdentifier::new(provider, catalog_a, catalog_b).expect("identifier");
    let results = identifier.identify(QUERY).await.expect("identify");

    let from_a = results.iter().filter(|r| r.registry == Registry::CatalogA).count();
    let from_b = results.iter().filter(|r| r.registry == Registry::CatalogB).count();
    println!("results = {} (A: {from_a}, B: {from_b})", results.len());

    assert_eq!(results.len(), 10, "capped at 2k");
    assert_eq!(from_a, 5);
    assert_eq!(from_b, 5);

    // Equal confidence everywhere: ordering falls back to registry then id.
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["A-1", "A-2", "A-3", "A-4", "A-5", "B-1", "B-2", "B-3", "B-4", "B-5"]);

    println!("[PASS] Both registries held to exactly k seats, stable order");
}

// =============================================================================
// TEST 3: Guard - Technical Vocabulary Damps Below the Floor
// =============================================================================
#[tokio::test]
async fn technical_guard_excludes_unreferenced_vocabulary() {
    println!("\n=== BALANCED SELECTION TEST 3: Technical-Term Guard ===");

    let provider = Arc::new(HashEmbeddingProvider::new());
    let stub = HashEmbeddingProvider::new();

    // Near-identical vocabulary, but the description leans on guarded
    // cryptographic terms the query never uses: cosine ~0.95, damped to
    // ~0.29, below the 0.45 floor.
    let guarded = def("A-GUARDED", &format!("{QUERY} encryption cryptanalysis"));
    let clean = def("A-CLEAN", QUERY);
    let catalog_a = Arc::new(
        RegistryStore::load(Registry::CatalogA, vec![guarded, clean], &stub)
            .await
            .expect("store"),
    );
    let catalog_b = Arc::new(
        RegistryStore::load(Registry::CatalogB, vec![], &stub)
            .await
            .expect("empty store"),
    );

    let identifier =
        TechniqueIdentifier::new(provider, catalog_a, catalog_b).expect("identifier");
    let results = identifier.identify(QUERY).await.expect("identify");

    for r in &results {
        println!("  {} = {:.4}", r.id, r.confidence);
    }
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "A-CLEAN");

    // The same guarded entry qualifies once the query itself uses the
    // vocabulary.
    let technical_query = format!("{QUERY} and they broke the encryption");
    let results = identifier.identify(&technical_query).await.expect("identify");
    assert!(
        results.iter().any(|r| r.id == "A-GUARDED"),
        "guard must not fire when the text references the vocabulary"
    );

    println!("[PASS] Guard damps only unreferenced technical entries");
}

// =============================================================================
// TEST 4: No Qualifying Matches Is a Valid Outcome
// =============================================================================
#[tokio::test]
async fn unrelated_query_returns_empty() {
    println!("\n=== BALANCED SELECTION TEST 4: Empty Outcome ===");

    let provider = Arc::new(HashEmbeddingProvider::new());
    let catalog_a = store_of(Registry::CatalogA, &["A-1", "A-2"]).await;
    let catalog_b = store_of(Registry::CatalogB, &["B-1"]).await;

    let identifier =
        TechniqueIdentifier::new(provider, catalog_a, catalog_b).expect("identifier");

    // Strict threshold no entry can clear.
    let results = identifier
        .identify_with(QUERY, 1.01, 5)
        .await
        .expect("identify");
    println!("threshold 1.01 -> {} results", results.len());
    assert!(results.is_empty());

    // k = 0 likewise short-circuits.
    let results = identifier.identify_with(QUERY, 0.45, 0).await.expect("identify");
    assert!(results.is_empty());

    println!("[PASS] Empty outcome reported without error");
}
