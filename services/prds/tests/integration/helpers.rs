use std::path::PathBuf;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use tempfile::NamedTempFile;

use prdgen_domain::id::OwnerId;
use prdgen_domain::project::PageOutline;
use prdgen_domain::tech_stack::{TechStack, TechStackInput};
use prdgen_prds::config::PrdConfig;
use prdgen_prds::domain::repository::UserRepository;
use prdgen_prds::domain::types::{NewPrd, User};
use prdgen_prds::infra::db::{DbPrdRepository, DbUserRepository};
use prdgen_prds::state::AppState;
use prdgen_prds_migration::Migrator;
use prdgen_prds_schema::{page_functions, pages, prds, users};

pub const TEMPLATE: &str =
    "PRD for {{PROJECT_NAME}}\n{{PROJECT_DESCRIPTION}}\nStack: {{TECH_STACK}}\nPages:\n{{PAGE_LIST}}";

// base64("test-signing-secret")
pub const WEBHOOK_SECRET: &str = "whsec_dGVzdC1zaWduaW5nLXNlY3JldA==";

// ── Database ─────────────────────────────────────────────────────────────────

/// Fresh in-memory SQLite database with all migrations applied.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn prd_repo(db: &DatabaseConnection) -> DbPrdRepository {
    DbPrdRepository {
        db: db.clone(),
        timeout: Duration::from_secs(5),
    }
}

pub fn user_repo(db: &DatabaseConnection) -> DbUserRepository {
    DbUserRepository {
        db: db.clone(),
        timeout: Duration::from_secs(5),
    }
}

pub fn test_user(id: &str) -> User {
    User {
        id: id.into(),
        email: format!("{id}@example.com"),
        first_name: None,
        last_name: None,
        image_url: None,
    }
}

pub async fn seed_user(db: &DatabaseConnection, id: &str) -> OwnerId {
    user_repo(db).upsert(&test_user(id)).await.unwrap();
    OwnerId::parse(id).unwrap()
}

pub fn new_prd(owner: &OwnerId, title: &str, pages: &[(&str, &[&str])]) -> NewPrd {
    NewPrd::new(
        owner.clone(),
        title.into(),
        Some(format!("{title} description")),
        TechStack::from(TechStackInput::Text("React, Express".into())),
        Some(format!("# {title}")),
        pages
            .iter()
            .map(|(name, functions)| PageOutline {
                name: (*name).into(),
                functions: functions.iter().map(|f| (*f).to_owned()).collect(),
            })
            .collect(),
    )
}

/// Row counts of (prds, pages, page_functions).
pub async fn row_counts(db: &DatabaseConnection) -> (u64, u64, u64) {
    (
        prds::Entity::find().count(db).await.unwrap(),
        pages::Entity::find().count(db).await.unwrap(),
        page_functions::Entity::find().count(db).await.unwrap(),
    )
}

pub async fn user_count(db: &DatabaseConnection) -> u64 {
    users::Entity::find().count(db).await.unwrap()
}

// ── Service ──────────────────────────────────────────────────────────────────

pub fn template_file() -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), TEMPLATE).unwrap();
    file
}

pub fn test_config(llm_url: &str, template_path: PathBuf) -> PrdConfig {
    PrdConfig {
        database_url: "sqlite::memory:".into(),
        prds_port: 0,
        prompt_template_path: template_path,
        anthropic_api_key: Some("sk-test".into()),
        anthropic_api_url: llm_url.into(),
        anthropic_model: "claude-test".into(),
        anthropic_max_tokens: 1024,
        generation_timeout_secs: 5,
        store_timeout_secs: 5,
        identity_webhook_secret: Some(WEBHOOK_SECRET.into()),
    }
}

pub fn test_state(db: &DatabaseConnection, config: PrdConfig) -> AppState {
    AppState::new(db.clone(), config).unwrap()
}
