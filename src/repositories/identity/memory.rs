//! In-memory implementation of the identity repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::errors::StoreError;

use super::r#trait::IdentityRepository;

/// In-memory identity repository over any clonable [`Identity`] type
pub struct InMemoryIdentityRepository<I> {
    users: Arc<RwLock<Vec<I>>>,
}

impl<I: Identity + Clone> InMemoryIdentityRepository<I> {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add a user
    pub async fn insert(&self, user: I) {
        self.users.write().await.push(user);
    }
}

impl<I: Identity + Clone> Default for InMemoryIdentityRepository<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<I: Identity + Clone> IdentityRepository for InMemoryIdentityRepository<I> {
    type User = I;

    async fn find_by_username(&self, username: &str) -> Result<Option<I>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username() == username).cloned())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<I>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.uuid() == uuid).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestUser {
        id: i64,
        uuid: Uuid,
        username: String,
    }

    impl Identity for TestUser {
        fn id(&self) -> i64 {
            self.id
        }

        fn uuid(&self) -> Uuid {
            self.uuid
        }

        fn username(&self) -> &str {
            &self.username
        }

        fn password_hash(&self) -> &str {
            ""
        }
    }

    #[tokio::test]
    async fn test_lookup_by_username_and_uuid() {
        let repo = InMemoryIdentityRepository::new();
        let uuid = Uuid::new_v4();
        repo.insert(TestUser {
            id: 1,
            uuid,
            username: "alice".to_string(),
        })
        .await;

        let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id(), 1);

        let by_uuid = repo.find_by_uuid(uuid).await.unwrap().unwrap();
        assert_eq!(by_uuid.username(), "alice");

        assert!(repo.find_by_username("bob").await.unwrap().is_none());
        assert!(repo.find_by_uuid(Uuid::new_v4()).await.unwrap().is_none());
    }
}
