//! Unit tests for mock user repository

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(email: &str) -> User {
    User::new(
        "Test".to_string(),
        email.to_string(),
        "5550000".to_string(),
        "hash".to_string(),
    )
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    let user = user("a@x.io");

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let by_id = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.id), Some(user.id));

    let by_email = repo.find_by_email("a@x.io").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    assert!(repo.find_by_email("b@x.io").await.unwrap().is_none());
    assert!(repo.exists_by_email("a@x.io").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_duplicate_email() {
    let repo = MockUserRepository::new();

    repo.create(user("same@x.io")).await.unwrap();
    let result = repo.create(user("same@x.io")).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateAccount))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_creates_admit_one() {
    let repo = Arc::new(MockUserRepository::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(user("race@x.io")).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_find_by_ids_skips_unknown() {
    let repo = MockUserRepository::new();
    let a = repo.create(user("a@x.io")).await.unwrap();
    let b = repo.create(user("b@x.io")).await.unwrap();

    let found = repo.find_by_ids(&[a.id, Uuid::new_v4(), b.id]).await.unwrap();
    let ids: Vec<Uuid> = found.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}
