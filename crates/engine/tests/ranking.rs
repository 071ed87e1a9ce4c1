use sea_orm::Database;

use engine::{Engine, EngineError, PriceCents, UnmatchedPolicy};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

async fn admin(engine: &Engine) -> engine::User {
    engine.ensure_admin("admin", "admin123").await.unwrap()
}

async fn record(engine: &Engine, admin: &engine::User, product: &str, market: &str, cents: i64) {
    engine
        .record_price(admin, product, market, PriceCents::new(cents))
        .await
        .unwrap();
}

#[tokio::test]
async fn excludes_establishments_missing_part_of_the_basket() {
    let engine = engine_with_db().await;
    let admin = admin(&engine).await;

    record(&engine, &admin, "Rice", "A", 500).await;
    record(&engine, &admin, "Beans", "A", 300).await;
    record(&engine, &admin, "Rice", "B", 400).await;

    let ranking = engine
        .rank_establishments(&["Rice", "Beans"], UnmatchedPolicy::Ignore)
        .await
        .unwrap();

    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].establishment.name, "A");
    assert_eq!(ranking[0].total, PriceCents::new(800));
}

#[tokio::test]
async fn sorts_ascending_by_total_with_creation_order_tie_break() {
    let engine = engine_with_db().await;
    let admin = admin(&engine).await;

    // "Caro" is created first but is the most expensive; "Barato" and
    // "Empate" tie, and "Empate" was created before "Barato".
    record(&engine, &admin, "Arroz", "Caro", 900).await;
    record(&engine, &admin, "Arroz", "Empate", 500).await;
    record(&engine, &admin, "Arroz", "Barato", 500).await;

    let ranking = engine
        .rank_establishments(&["Arroz"], UnmatchedPolicy::Ignore)
        .await
        .unwrap();

    let names: Vec<&str> = ranking
        .iter()
        .map(|entry| entry.establishment.name.as_str())
        .collect();
    assert_eq!(names, vec!["Empate", "Barato", "Caro"]);
}

#[tokio::test]
async fn empty_basket_yields_empty_result() {
    let engine = engine_with_db().await;
    let admin = admin(&engine).await;
    record(&engine, &admin, "Arroz", "A", 500).await;

    let ranking = engine
        .rank_establishments(&[], UnmatchedPolicy::Ignore)
        .await
        .unwrap();
    assert!(ranking.is_empty());

    // Blank items count as nothing as well.
    let ranking = engine
        .rank_establishments(&["  ", ""], UnmatchedPolicy::Ignore)
        .await
        .unwrap();
    assert!(ranking.is_empty());
}

#[tokio::test]
async fn unmatched_names_are_ignored_by_default() {
    let engine = engine_with_db().await;
    let admin = admin(&engine).await;
    record(&engine, &admin, "Arroz", "A", 500).await;

    let ranking = engine
        .rank_establishments(&["Arroz", "Sushi"], UnmatchedPolicy::Ignore)
        .await
        .unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].total, PriceCents::new(500));

    // A basket made entirely of unknown names resolves to nothing.
    let ranking = engine
        .rank_establishments(&["Sushi", "Tempura"], UnmatchedPolicy::Ignore)
        .await
        .unwrap();
    assert!(ranking.is_empty());
}

#[tokio::test]
async fn reject_policy_fails_on_first_unmatched_name() {
    let engine = engine_with_db().await;
    let admin = admin(&engine).await;
    record(&engine, &admin, "Arroz", "A", 500).await;

    let err = engine
        .rank_establishments(&["Arroz", "Sushi"], UnmatchedPolicy::Reject)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ProductNotFound("Sushi".to_string()));
}

#[tokio::test]
async fn duplicate_prices_for_a_pair_use_the_latest_row() {
    let engine = engine_with_db().await;
    let admin = admin(&engine).await;

    record(&engine, &admin, "Arroz", "A", 500).await;
    record(&engine, &admin, "Arroz", "A", 450).await;
    record(&engine, &admin, "Feijão", "A", 300).await;

    let ranking = engine
        .rank_establishments(&["Arroz", "Feijão"], UnmatchedPolicy::Ignore)
        .await
        .unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].total, PriceCents::new(750));
}

#[tokio::test]
async fn duplicate_basket_items_count_once() {
    let engine = engine_with_db().await;
    let admin = admin(&engine).await;
    record(&engine, &admin, "Arroz", "A", 500).await;

    let ranking = engine
        .rank_establishments(&["Arroz", " Arroz "], UnmatchedPolicy::Ignore)
        .await
        .unwrap();
    assert_eq!(ranking[0].total, PriceCents::new(500));
}

#[tokio::test]
async fn no_establishments_yields_empty_result() {
    let engine = engine_with_db().await;

    engine.find_or_create_product("Arroz").await.unwrap();
    let ranking = engine
        .rank_establishments(&["Arroz"], UnmatchedPolicy::Ignore)
        .await
        .unwrap();
    assert!(ranking.is_empty());
}
