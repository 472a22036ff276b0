use chrono::{Duration, Utc};
use microblog::domain::entities::{NewUser, ProfileUpdate};
use microblog::domain::repositories::UserRepository;
use microblog::error::AppError;
use microblog::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
    }
}

#[sqlx::test]
async fn test_create_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("susan")).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.username, "susan");
    assert_eq!(user.email, "susan@example.com");
    assert_eq!(user.password_hash, "not-a-real-hash");
    assert!(user.about_me.is_none());
}

#[sqlx::test]
async fn test_create_duplicate_username(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("susan")).await.unwrap();

    let result = repo
        .create(NewUser {
            email: "other@example.com".to_string(),
            ..new_user("susan")
        })
        .await;

    match result {
        Err(err @ AppError::Conflict { .. }) => assert_eq!(err.field(), Some("username")),
        other => panic!("expected username conflict, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_create_duplicate_email(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("susan")).await.unwrap();

    let result = repo
        .create(NewUser {
            username: "mary".to_string(),
            ..new_user("susan")
        })
        .await;

    match result {
        Err(err @ AppError::Conflict { .. }) => assert_eq!(err.field(), Some("email")),
        other => panic!("expected email conflict, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_find_by_username_and_email(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let created = repo.create(new_user("susan")).await.unwrap();

    let by_name = repo.find_by_username("susan").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    let by_email = repo
        .find_by_email("susan@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "susan");
}

#[sqlx::test]
async fn test_find_missing_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(999_999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_update_profile(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("susan")).await.unwrap();

    let updated = repo
        .update_profile(
            user.id,
            ProfileUpdate {
                username: "susan2".to_string(),
                about_me: Some("I like cats".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username, "susan2");
    assert_eq!(updated.about_me.as_deref(), Some("I like cats"));
    assert!(repo.find_by_username("susan").await.unwrap().is_none());

    let cleared = repo
        .update_profile(
            user.id,
            ProfileUpdate {
                username: "susan2".to_string(),
                about_me: None,
            },
        )
        .await
        .unwrap();
    assert!(cleared.about_me.is_none());
}

#[sqlx::test]
async fn test_update_profile_missing_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo
        .update_profile(
            42,
            ProfileUpdate {
                username: "ghost".to_string(),
                about_me: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_touch_last_seen(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("susan")).await.unwrap();
    let later = Utc::now() + Duration::hours(1);

    repo.touch_last_seen(user.id, later).await.unwrap();

    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(reloaded.last_seen > user.last_seen);
    assert_eq!(reloaded.last_seen.timestamp(), later.timestamp());
}

#[sqlx::test]
async fn test_list_and_count(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.list().await.unwrap().is_empty());

    repo.create(new_user("susan")).await.unwrap();
    repo.create(new_user("john")).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);

    let names: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["john", "susan"]);
}
