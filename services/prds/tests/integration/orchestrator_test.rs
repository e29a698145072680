use std::time::Duration;

use prdgen_domain::project::{PageOutline, RawBrief};
use prdgen_domain::tech_stack::TechStackInput;
use prdgen_prds::domain::repository::PrdRepository;
use prdgen_prds::error::PrdServiceError;
use prdgen_prds::infra::llm::AnthropicGenerator;
use prdgen_prds::infra::prompt::FilePromptTemplate;
use prdgen_prds::usecase::generate::GenerateAndCreatePrdUseCase;
use prdgen_testing::llm::MockCompletionServer;

use crate::helpers::{prd_repo, row_counts, seed_user, template_file, test_db};

fn brief() -> RawBrief {
    RawBrief {
        title: "Todo App".into(),
        description: "A simple todo list".into(),
        tech_stack: TechStackInput::List(vec!["React".into(), "Express".into()]),
        pages: vec![
            PageOutline {
                name: "Home".into(),
                functions: vec!["Add todo".into(), "List todos".into()],
            },
            PageOutline {
                name: "Settings".into(),
                functions: vec!["Change theme".into()],
            },
        ],
    }
}

fn generator(url: &str) -> AnthropicGenerator {
    AnthropicGenerator {
        client: reqwest::Client::new(),
        api_url: url.into(),
        api_key: Some("sk-test".into()),
        model: "claude-test".into(),
        max_tokens: 1024,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn should_generate_then_store_full_aggregate() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let server = MockCompletionServer::start().await;
    server.respond_with_text("# Todo App PRD").await;
    let template = template_file();

    let usecase = GenerateAndCreatePrdUseCase {
        templates: FilePromptTemplate {
            path: template.path().to_path_buf(),
        },
        generator: generator(&server.url()),
        repo: prd_repo(&db),
    };
    let detail = usecase.execute(&owner, brief()).await.unwrap();
    assert_eq!(detail.prd.content.as_deref(), Some("# Todo App PRD"));
    assert_eq!(row_counts(&db).await, (1, 2, 3));

    let prompt = server.received_bodies().await[0]["messages"][0]["content"]
        .as_str()
        .unwrap()
        .to_owned();
    assert!(prompt.starts_with("PRD for Todo App\nA simple todo list\nStack: React, Express\n"));
    assert!(prompt.contains("\"Change theme\""));

    let stored = prd_repo(&db).find(&detail.prd.id, &owner).await.unwrap().unwrap();
    assert_eq!(stored.pages[0].name, "Home");
    assert_eq!(stored.pages[1].functions[0].name, "Change theme");
}

#[tokio::test]
async fn should_store_nothing_when_provider_fails() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let server = MockCompletionServer::start().await;
    server.respond_with_status(500, "internal").await;
    let template = template_file();

    let usecase = GenerateAndCreatePrdUseCase {
        templates: FilePromptTemplate {
            path: template.path().to_path_buf(),
        },
        generator: generator(&server.url()),
        repo: prd_repo(&db),
    };
    let result = usecase.execute(&owner, brief()).await;
    assert!(matches!(result, Err(PrdServiceError::Generation(_))));
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn should_reject_invalid_brief_before_calling_provider() {
    let db = test_db().await;
    let owner = seed_user(&db, "user_1").await;
    let server = MockCompletionServer::start().await;
    server.respond_with_text("unused").await;
    let template = template_file();

    let usecase = GenerateAndCreatePrdUseCase {
        templates: FilePromptTemplate {
            path: template.path().to_path_buf(),
        },
        generator: generator(&server.url()),
        repo: prd_repo(&db),
    };
    let mut bad = brief();
    bad.pages[1].name = "  ".into();
    let err = usecase.execute(&owner, bad).await.unwrap_err();
    assert_eq!(err.to_string(), "invalid input: pages[1].name is required");
    assert!(server.received_bodies().await.is_empty());
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}
