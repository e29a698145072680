use sea_orm::EntityTrait as _;

use prdgen_prds::domain::repository::{PrdRepository, UserRepository};
use prdgen_prds::domain::types::User;

use crate::helpers::{new_prd, prd_repo, row_counts, seed_user, test_db, user_count, user_repo};

#[tokio::test]
async fn should_update_existing_user_on_upsert() {
    let db = test_db().await;
    seed_user(&db, "user_1").await;
    let repo = user_repo(&db);

    repo.upsert(&User {
        id: "user_1".into(),
        email: "new@example.com".into(),
        first_name: Some("Alice".into()),
        last_name: Some("Liddell".into()),
        image_url: None,
    })
    .await
    .unwrap();

    assert_eq!(user_count(&db).await, 1);
    let model = prdgen_prds_schema::users::Entity::find_by_id("user_1".to_owned())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(model.email, "new@example.com");
    assert_eq!(model.first_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn should_remove_user_with_their_prds() {
    let db = test_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let prds = prd_repo(&db);
    prds.create(&new_prd(&alice, "A1", &[("Home", &["x", "y"])]))
        .await
        .unwrap();
    prds.create(&new_prd(&alice, "A2", &[])).await.unwrap();
    prds.create(&new_prd(&bob, "B1", &[("Home", &["z"])]))
        .await
        .unwrap();

    assert!(user_repo(&db).delete("alice").await.unwrap());

    assert_eq!(user_count(&db).await, 1);
    assert_eq!(row_counts(&db).await, (1, 1, 1));
    assert_eq!(prds.list(&bob, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_missing_user_on_delete() {
    let db = test_db().await;
    assert!(!user_repo(&db).delete("ghost").await.unwrap());
}
