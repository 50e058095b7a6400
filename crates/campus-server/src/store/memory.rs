use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use campus_shared::{NewUser, User};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SettingsUpdate, StoreError, UserStore};

/// Process-local user store. Used when no database is configured and by
/// the router tests.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
    failing: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Inserts a fully formed record, replacing any with the same id.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.check()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.check()?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.check()?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.check()?;
        let user = new_user.into_user(Uuid::new_v4(), Utc::now());
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn apply(&self, id: Uuid, update: SettingsUpdate) -> Result<(), StoreError> {
        self.check()?;
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(StoreError::UserNotFound)?;
        update.apply_to(user);
        user.updated_at = Utc::now();
        Ok(())
    }
}
