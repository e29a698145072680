use crate::domain::repository::UserRepository;
use crate::domain::types::IdentityEvent;
use crate::error::PrdServiceError;

// ── SyncIdentity ─────────────────────────────────────────────────────────────

pub struct SyncIdentityUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SyncIdentityUseCase<R> {
    pub async fn execute(&self, event: IdentityEvent) -> Result<(), PrdServiceError> {
        match event {
            IdentityEvent::Upsert(user) => {
                self.repo.upsert(&user).await?;
                tracing::info!(user_id = %user.id, "user synced");
            }
            IdentityEvent::Delete { user_id } => {
                let deleted = self.repo.delete(&user_id).await?;
                tracing::info!(user_id = %user_id, deleted, "user removed");
            }
            IdentityEvent::Ignored { event_type } => {
                tracing::debug!(event_type = %event_type, "identity event ignored");
            }
        }
        Ok(())
    }
}
