use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::config::PrdConfig;
use crate::error::PrdServiceError;
use crate::infra::db::{DbPrdRepository, DbUserRepository};
use crate::infra::llm::AnthropicGenerator;
use crate::infra::prompt::FilePromptTemplate;
use crate::infra::webhook::SvixVerifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub config: Arc<PrdConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: PrdConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            db,
            http,
            config: Arc::new(config),
        })
    }

    pub fn prd_repo(&self) -> DbPrdRepository {
        DbPrdRepository {
            db: self.db.clone(),
            timeout: self.config.store_timeout(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
            timeout: self.config.store_timeout(),
        }
    }

    pub fn generator(&self) -> AnthropicGenerator {
        AnthropicGenerator::from_config(self.http.clone(), &self.config)
    }

    pub fn prompt_templates(&self) -> FilePromptTemplate {
        FilePromptTemplate {
            path: self.config.prompt_template_path.clone(),
        }
    }

    pub fn webhook_verifier(&self) -> Result<SvixVerifier, PrdServiceError> {
        let secret = self
            .config
            .identity_webhook_secret
            .as_deref()
            .ok_or_else(|| {
                PrdServiceError::Configuration("IDENTITY_WEBHOOK_SECRET is not set".into())
            })?;
        SvixVerifier::new(secret)
    }
}
