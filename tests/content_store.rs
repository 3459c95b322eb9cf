use sqlx::PgPool;
use time::macros::datetime;

use millwright::application::repos::{ContentRepo, UpsertContentParams};
use millwright::domain::content::ContentKey;
use millwright::infra::db::PostgresRepositories;

fn params(page: &str, section: &str, key: &str, value: &str) -> UpsertContentParams {
    UpsertContentParams {
        key: ContentKey::new(page, section, key).expect("valid key"),
        value: value.to_string(),
    }
}

async fn seed(repo: &PostgresRepositories, rows: &[(&str, &str, &str, &str)]) {
    for (page, section, key, value) in rows {
        repo.upsert_content(params(page, section, key, value))
            .await
            .expect("seed content");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn listing_orders_by_section_then_key(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);
    seed(
        &repo,
        &[
            ("about", "team", "lead", "Ana"),
            ("about", "intro", "subtitle", "Family owned"),
            ("about", "intro", "heading", "Since 1984"),
            ("contact", "intro", "heading", "Reach us"),
        ],
    )
    .await;

    let items = repo.list_content("about", None).await.expect("list content");

    let order: Vec<_> = items
        .iter()
        .map(|item| (item.section.as_str(), item.content_key.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![("intro", "heading"), ("intro", "subtitle"), ("team", "lead")]
    );
    assert!(items.iter().all(|item| item.page == "about"));
}

#[sqlx::test(migrations = "./migrations")]
async fn section_filter_narrows_the_listing(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);
    seed(
        &repo,
        &[
            ("products", "hero", "title", "Machined parts"),
            ("products", "hero", "subtitle", "To tolerance"),
            ("products", "specs", "material", "6061-T6"),
        ],
    )
    .await;

    let hero = repo
        .list_content("products", Some("hero"))
        .await
        .expect("list hero");
    assert_eq!(hero.len(), 2);
    assert!(hero.iter().all(|item| item.section == "hero"));

    let missing = repo
        .list_content("products", Some("gallery"))
        .await
        .expect("list gallery");
    assert!(missing.is_empty());

    let unknown_page = repo.list_content("careers", None).await.expect("list");
    assert!(unknown_page.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn overwrite_keeps_one_row_and_moves_updated_at_forward(pool: PgPool) {
    let repo = PostgresRepositories::new(pool.clone());
    repo.upsert_content(params("home", "hero", "title", "First draft"))
        .await
        .expect("first write");

    let backdated = datetime!(2020-01-01 00:00:00 UTC);
    sqlx::query("UPDATE site_content SET updated_at = $1 WHERE page = 'home'")
        .bind(backdated)
        .execute(&pool)
        .await
        .expect("backdate row");

    let stored = repo
        .upsert_content(params("home", "hero", "title", "Final copy"))
        .await
        .expect("overwrite");

    assert_eq!(stored.content_value, "Final copy");
    assert!(stored.updated_at > backdated);

    let items = repo.list_content("home", None).await.expect("list home");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content_value, "Final copy");
    assert_eq!(items[0].updated_at, stored.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn ping_succeeds_against_a_live_pool(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);
    repo.ping().await.expect("database answers");
}
