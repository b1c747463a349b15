//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `unitvisit_test`)
//!   `TEST_DB_PASSWORD` (default: `unitvisit_test`)
//!   `TEST_DB_NAME` (default: `unitvisit_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, Set};
use unitvisit_db::entities::unit;
use unitvisit_db::repositories::UnitRepository;
use unitvisit_db::test_utils::{TestDatabase, TestDbConfig};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_cleanup() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    let result = db.cleanup().await;
    assert!(result.is_ok(), "Cleanup failed: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrate_and_query_unit() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");

    unitvisit_db::migrate(db.connection())
        .await
        .expect("Migrations failed");

    unit::ActiveModel {
        id: Set("it-unit-901".to_string()),
        code: Set("901".to_string()),
        name: Set("Lữ đoàn 901".to_string()),
        parent_code: Set(None),
        ..Default::default()
    }
    .insert(db.connection())
    .await
    .expect("Insert failed");

    // `DatabaseConnection` is not `Clone` when sea-orm's `mock` feature is
    // enabled (it is, via dev-dependencies), so open a second connection to
    // the same test database for the repository.
    let repo_conn = sea_orm::Database::connect(&db.config.database_url())
        .await
        .expect("Failed to connect repository");
    let repo = UnitRepository::new(Arc::new(repo_conn));
    let found = repo.get_by_code("901").await.expect("Lookup failed");
    assert_eq!(found.name, "Lữ đoàn 901");
    assert!(found.is_main());

    db.drop_database().await.expect("Drop failed");
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
