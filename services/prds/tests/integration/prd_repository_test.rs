use std::time::Duration;

use prdgen_domain::id::OwnerId;
use prdgen_domain::project::PageOutline;
use prdgen_domain::tech_stack::TechStackInput;
use prdgen_prds::domain::repository::PrdRepository;
use prdgen_prds::usecase::prd::{CreatePrdInput, CreatePrdUseCase};

use crate::helpers::{new_prd, prd_repo, row_counts, seed_user, test_db};

#[tokio::test]
async fn should_store_aggregate_and_read_it_back_in_order() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let repo = prd_repo(&db);

    let new = new_prd(
        &owner,
        "Todo App",
        &[
            ("Home", &["Add todo", "List todos", "Filter todos"]),
            ("Settings", &["Change theme"]),
            ("About", &["Show version"]),
        ],
    );
    let created = repo.create(&new).await.unwrap();
    assert_eq!(created.prd.id, new.id);
    assert_eq!(created.prd.user_id, "user_1");
    assert_eq!(created.prd.tech_stack.as_slice(), ["React", "Express"]);
    assert!(!created.prd.published);

    let detail = repo.find(&new.id, &owner).await.unwrap().unwrap();
    let page_names: Vec<&str> = detail.pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(page_names, ["Home", "Settings", "About"]);
    let home: Vec<&str> = detail.pages[0]
        .functions
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(home, ["Add todo", "List todos", "Filter todos"]);
    for page in &detail.pages {
        assert_eq!(page.prd_id, new.id);
        assert!(page.functions.iter().all(|f| f.page_id == page.id));
    }

    assert_eq!(row_counts(&db).await, (1, 3, 5));
}

#[tokio::test]
async fn should_hide_prds_from_other_owners() {
    let db = test_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let repo = prd_repo(&db);

    let new = new_prd(&alice, "Secret", &[("Home", &["Login"])]);
    repo.create(&new).await.unwrap();

    assert!(repo.find(&new.id, &bob).await.unwrap().is_none());
    assert!(repo.list(&bob, None).await.unwrap().is_empty());
    assert!(
        repo.update_content(&new.id, &bob, "hijacked")
            .await
            .unwrap()
            .is_none()
    );
    assert!(repo.delete(&new.id, &bob).await.unwrap().is_none());

    let detail = repo.find(&new.id, &alice).await.unwrap().unwrap();
    assert_eq!(detail.prd.content.as_deref(), Some("# Secret"));
    assert_eq!(row_counts(&db).await, (1, 1, 1));
}

#[tokio::test]
async fn should_list_newest_updated_first() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let repo = prd_repo(&db);

    let first = new_prd(&owner, "First", &[]);
    repo.create(&first).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = new_prd(&owner, "Second", &[]);
    repo.create(&second).await.unwrap();

    let titles: Vec<String> = repo
        .list(&owner, None)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, ["Second", "First"]);

    tokio::time::sleep(Duration::from_millis(10)).await;
    repo.update_content(&first.id, &owner, "edited")
        .await
        .unwrap()
        .unwrap();
    let titles: Vec<String> = repo
        .list(&owner, None)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, ["First", "Second"]);
}

#[tokio::test]
async fn should_filter_list_by_title_case_insensitively() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let repo = prd_repo(&db);

    for title in ["Todo App", "Shopping TODO list", "Weather", "50% off"] {
        repo.create(&new_prd(&owner, title, &[])).await.unwrap();
    }

    let mut titles: Vec<String> = repo
        .list(&owner, Some("todo"))
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    titles.sort();
    assert_eq!(titles, ["Shopping TODO list", "Todo App"]);

    let percent = repo.list(&owner, Some("%")).await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "50% off");
}

#[tokio::test]
async fn should_update_content_and_bump_updated_at() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let repo = prd_repo(&db);

    let new = new_prd(&owner, "Todo App", &[("Home", &["Add todo"])]);
    let created = repo.create(&new).await.unwrap();

    let updated = repo
        .update_content(&new.id, &owner, "# Rewritten")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.content.as_deref(), Some("# Rewritten"));
    assert!(updated.updated_at >= created.prd.updated_at);
    assert_eq!(updated.created_at, created.prd.created_at);

    let detail = repo.find(&new.id, &owner).await.unwrap().unwrap();
    assert_eq!(detail.prd.content.as_deref(), Some("# Rewritten"));
    assert_eq!(detail.pages.len(), 1);
}

#[tokio::test]
async fn should_delete_aggregate_with_all_children() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let repo = prd_repo(&db);

    let doomed = new_prd(&owner, "Doomed", &[("A", &["a1", "a2"]), ("B", &["b1"])]);
    let kept = new_prd(&owner, "Kept", &[("C", &["c1"])]);
    repo.create(&doomed).await.unwrap();
    repo.create(&kept).await.unwrap();
    assert_eq!(row_counts(&db).await, (2, 3, 4));

    let deleted = repo.delete(&doomed.id, &owner).await.unwrap().unwrap();
    assert_eq!(deleted.id, doomed.id);
    assert_eq!(deleted.title, "Doomed");

    assert_eq!(row_counts(&db).await, (1, 1, 1));
    assert!(repo.find(&doomed.id, &owner).await.unwrap().is_none());
    assert!(repo.find(&kept.id, &owner).await.unwrap().is_some());
    assert!(repo.delete(&doomed.id, &owner).await.unwrap().is_none());
}

#[tokio::test]
async fn should_leave_no_rows_when_create_fails() {
    let db = test_db().await;
    let repo = prd_repo(&db);
    let unknown = OwnerId::parse("never_synced").unwrap();

    let result = repo
        .create(&new_prd(&unknown, "Orphan", &[("Home", &["Login"])]))
        .await;
    assert!(result.is_err());
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn should_keep_page_without_functions() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let repo = prd_repo(&db);

    let new = new_prd(&owner, "Sparse", &[("Empty", &[]), ("Full", &["One"])]);
    let detail = repo.create(&new).await.unwrap();
    assert_eq!(detail.pages.len(), 2);
    assert!(detail.pages[0].functions.is_empty());
    assert_eq!(detail.pages[1].functions.len(), 1);
}

#[tokio::test]
async fn should_return_content_byte_for_byte() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let repo = prd_repo(&db);
    let new = new_prd(&owner, "Fidelity", &[]);
    repo.create(&new).await.unwrap();

    let content = format!(
        "# Überblick 🚀\n\n```rust\nfn main() {{ println!(\"{{}}\", 1); }}\n```\n\n{}\n  trailing  \n",
        "lorem ipsum ".repeat(20_000)
    );
    repo.update_content(&new.id, &owner, &content)
        .await
        .unwrap()
        .unwrap();

    let detail = repo.find(&new.id, &owner).await.unwrap().unwrap();
    assert_eq!(detail.prd.content.as_deref(), Some(content.as_str()));
}

#[tokio::test]
async fn should_create_todo_app_scenario_with_normalized_tech_stack() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let usecase = CreatePrdUseCase {
        repo: prd_repo(&db),
    };

    let created = usecase
        .execute(
            &owner,
            CreatePrdInput {
                title: "Todo App".into(),
                description: Some("A simple todo list".into()),
                tech_stack: Some(TechStackInput::Text("React,Express".into())),
                content: Some("# Todo App\n...".into()),
                pages: vec![PageOutline {
                    name: "Home".into(),
                    functions: vec!["Add todo".into(), "List todos".into()],
                }],
            },
        )
        .await
        .unwrap();

    let detail = prd_repo(&db)
        .find(&created.detail.prd.id, &owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.prd.user_id, "user_1");
    assert_eq!(detail.prd.tech_stack.as_slice(), ["React", "Express"]);
    assert_eq!(detail.pages.len(), 1);
    assert_eq!(detail.pages[0].name, "Home");
    let functions: Vec<&str> = detail.pages[0]
        .functions
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(functions, ["Add todo", "List todos"]);

    let spaced = usecase
        .execute(
            &owner,
            CreatePrdInput {
                title: "Spaced".into(),
                description: None,
                tech_stack: Some(TechStackInput::Text("React, Node.js, PostgreSQL".into())),
                content: None,
                pages: vec![],
            },
        )
        .await
        .unwrap();
    let listed = prd_repo(&db).list(&owner, Some("spaced")).await.unwrap();
    assert_eq!(listed[0].id, spaced.detail.prd.id);
    assert_eq!(
        listed[0].tech_stack.as_slice(),
        ["React", "Node.js", "PostgreSQL"]
    );
}
