//! Controller phase tests: validation, dependency checks, resource
//! acquisition and release, and failure classification.

mod common;

use blogi_core::clients::adapters::{
    MockCompletion, MockConnector, MockImageGenerator, MockPromptProvider, MockSearch,
};
use blogi_core::clients::ClientError;
use blogi_core::config::Credentials;
use blogi_core::templates::TemplateStore;
use blogi_protocol::{AgentConfig, FailureKind};
use common::*;

#[tokio::test]
async fn test_researcher_without_topic_touches_nothing() {
    let workspace = TestWorkspace::new();
    let controller = workspace.controller(researcher_connector());

    for topic in [None, Some(String::new()), Some("   ".to_string())] {
        let config = AgentConfig {
            topic,
            ..AgentConfig::researcher(RESEARCHER, "placeholder")
        };
        let result = controller.run(&config).await;

        assert_failed(&result, FailureKind::Configuration);
        assert!(result.message.contains("Topic is required"));
    }
    assert!(controller.connector().opened().is_empty());
    assert_eq!(controller.connector().completion.call_count(), 0);
}

#[tokio::test]
async fn test_artist_without_callback_touches_nothing() {
    let workspace = TestWorkspace::new();
    let controller = workspace.controller(MockConnector::new());
    let config = AgentConfig {
        callback_url: Some(" ".to_string()),
        ..AgentConfig::artist(ARTIST, "unused")
    };

    let result = controller.run(&config).await;

    assert_failed(&result, FailureKind::Configuration);
    assert!(controller.connector().opened().is_empty());
    assert!(controller.connector().image.submissions().is_empty());
    assert_eq!(controller.connector().prompts.call_count(), 0);
}

#[tokio::test]
async fn test_missing_credentials_are_dependency_failures() {
    let workspace = TestWorkspace::new();
    let mut settings = workspace.settings();
    settings.credentials = Credentials {
        anthropic_api_key: Some("key".to_string()),
        ..Credentials::default()
    };
    let controller = workspace.controller_with(settings, researcher_connector());

    let result = controller
        .run(&AgentConfig::researcher(RESEARCHER, "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Dependency);
    assert!(result.message.contains("BRAVE_SEARCH_API_KEY"));
    assert!(controller.connector().opened().is_empty());
}

#[tokio::test]
async fn test_random_prompt_credential_only_needed_without_prompt() {
    let workspace = TestWorkspace::new();
    let mut settings = workspace.settings();
    settings.credentials.openai_api_key = None;
    let connector = MockConnector::new().with_completion(scripted_completion());
    let controller = workspace.controller_with(settings, connector);

    let with_prompt = AgentConfig::artist(ARTIST, "https://hooks.example.com/a")
        .with_image_prompt("A fox in the snow");
    assert!(controller.run(&with_prompt).await.success);

    let without_prompt = AgentConfig::artist(ARTIST, "https://hooks.example.com/a");
    let result = controller.run(&without_prompt).await;
    assert_failed(&result, FailureKind::Dependency);
    assert!(result.message.contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn test_unknown_agent_is_a_dependency_failure() {
    let workspace = TestWorkspace::new();
    let controller = workspace.controller(researcher_connector());

    let result = controller
        .run(&AgentConfig::researcher("no_such_agent", "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Dependency);
    assert!(result.message.contains("no_such_agent"));
    assert!(controller.connector().opened().is_empty());
}

#[tokio::test]
async fn test_acquisition_failure_releases_earlier_resources() {
    let workspace = TestWorkspace::new();
    let controller = workspace.controller(researcher_connector().fail_open("search"));

    let result = controller
        .run(&AgentConfig::researcher(RESEARCHER, "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Dependency);
    let connector = controller.connector();
    assert_eq!(connector.opened(), vec!["completion"]);
    assert_eq!(connector.completion.close_count(), 1);
    assert_eq!(connector.search.close_count(), 0);
    assert_eq!(connector.fetcher.close_count(), 0);
    assert_eq!(connector.completion.call_count(), 0);
}

#[tokio::test]
async fn test_body_failure_still_releases_everything() {
    let workspace = TestWorkspace::new();
    let connector = researcher_connector().with_completion(
        MockCompletion::new()
            .on("SUMMARIZE CONTENT", "summary")
            .fail_on("AGENT PROMPT", ClientError::Timeout("anthropic".to_string())),
    );
    let controller = workspace.controller(connector);

    let result = controller
        .run(&AgentConfig::researcher(RESEARCHER, "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Pipeline);
    assert!(result.message.contains("Body generation failed"));
    assert_eq!(
        controller.connector().opened(),
        vec!["completion", "search", "web"]
    );
    assert_all_released(controller.connector());
    assert!(!workspace.posts_dir().join(EXPECTED_FILENAME).exists());
}

#[tokio::test]
async fn test_search_failure_is_a_pipeline_failure() {
    let workspace = TestWorkspace::new();
    let connector = researcher_connector().with_search(MockSearch::failing(
        ClientError::HttpStatus {
            status: 500,
            url: "https://api.search.brave.com/res/v1/web/search".to_string(),
        },
    ));
    let controller = workspace.controller(connector);

    let result = controller
        .run(&AgentConfig::researcher(RESEARCHER, "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Pipeline);
    assert_all_released(controller.connector());
}

#[tokio::test]
async fn test_missing_template_fails_before_acquisition() {
    let workspace = TestWorkspace::new();
    std::fs::remove_file(workspace.prompts_dir().join("test_researcher/disclaimer.txt")).unwrap();
    let controller = workspace.controller(researcher_connector());

    let result = controller
        .run(&AgentConfig::researcher(RESEARCHER, "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Dependency);
    assert!(result.message.contains("disclaimer"));
    assert!(controller.connector().opened().is_empty());
    assert_eq!(controller.connector().completion.call_count(), 0);
    assert!(controller.connector().search.queries().is_empty());
}

#[tokio::test]
async fn test_researcher_on_artist_prompts_fails_before_acquisition() {
    let workspace = TestWorkspace::new();
    let controller = workspace.controller(researcher_connector());

    let result = controller
        .run(&AgentConfig::researcher(ARTIST, "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Dependency);
    assert!(result.message.contains("image_prompt"), "{}", result.message);
    assert!(controller.connector().opened().is_empty());
    assert_eq!(controller.connector().completion.call_count(), 0);
}

#[tokio::test]
async fn test_embedded_artist_prompts_reject_researcher_runs() {
    let workspace = TestWorkspace::new();
    let controller = workspace
        .controller(researcher_connector())
        .with_store(TemplateStore::embedded());

    let result = controller
        .run(&AgentConfig::researcher("prompt_artist", "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Dependency);
    assert!(controller.connector().opened().is_empty());
}

#[tokio::test]
async fn test_teardown_errors_do_not_change_the_outcome() {
    let workspace = TestWorkspace::new();
    let connector = researcher_connector()
        .with_completion(scripted_completion().with_close_error("broken pipe"))
        .with_search(MockSearch::new(search_results()).with_close_error("reset"));
    let controller = workspace.controller(connector);

    let result = controller
        .run(&AgentConfig::researcher(RESEARCHER, "quantum computing"))
        .await;

    assert!(result.success, "{result:?}");
    assert_all_released(controller.connector());
}

#[tokio::test]
async fn test_persistence_failure() {
    let workspace = TestWorkspace::new();
    // A directory where the post file should go makes the write fail.
    std::fs::create_dir_all(workspace.posts_dir().join(EXPECTED_FILENAME)).unwrap();
    let controller = workspace.controller(researcher_connector());

    let result = controller
        .run(&AgentConfig::researcher(RESEARCHER, "quantum computing"))
        .await;

    assert_failed(&result, FailureKind::Persistence);
    assert!(result.message.contains(EXPECTED_FILENAME));
    assert_all_released(controller.connector());
}

#[tokio::test]
async fn test_artist_uses_random_prompt_when_none_given() {
    let workspace = TestWorkspace::new();
    let connector = MockConnector::new()
        .with_completion(scripted_completion())
        .with_prompts(MockPromptProvider::new(Ok(
            "A clockwork whale over Paris".to_string()
        )));
    let controller = workspace.controller(connector);

    let result = controller
        .run(&AgentConfig::artist(ARTIST, "https://hooks.example.com/img"))
        .await;

    assert!(result.success, "{result:?}");
    let connector = controller.connector();
    assert_eq!(connector.prompts.call_count(), 1);
    assert_eq!(
        connector.image.submissions(),
        vec![(
            "A clockwork whale over Paris".to_string(),
            "https://hooks.example.com/img".to_string()
        )]
    );
    assert_eq!(connector.opened(), vec!["completion"]);
    assert_all_released(connector);

    let (frontmatter, _) = read_post(result.file_path.as_ref().unwrap());
    assert_eq!(frontmatter.author, "AI Agent Artist");
}

#[tokio::test]
async fn test_random_prompt_failure_opens_nothing() {
    let workspace = TestWorkspace::new();
    let connector = MockConnector::new().with_prompts(MockPromptProvider::new(Err(
        ClientError::ApiError("quota exceeded".to_string()),
    )));
    let controller = workspace.controller(connector);

    let result = controller
        .run(&AgentConfig::artist(ARTIST, "https://hooks.example.com/img"))
        .await;

    assert_failed(&result, FailureKind::Pipeline);
    assert!(controller.connector().opened().is_empty());
}

#[tokio::test]
async fn test_image_submission_failure() {
    let workspace = TestWorkspace::new();
    let connector = MockConnector::new()
        .with_completion(scripted_completion())
        .with_image(MockImageGenerator::failing(ClientError::HttpStatus {
            status: 402,
            url: "https://api.userapi.ai/midjourney/v2/imagine".to_string(),
        }));
    let controller = workspace.controller(connector);
    let config = AgentConfig::artist(ARTIST, "https://hooks.example.com/img")
        .with_image_prompt("A fox in the snow");

    let result = controller.run(&config).await;

    assert_failed(&result, FailureKind::Pipeline);
    assert!(result.message.contains("Image submission failed"));
    assert_eq!(controller.connector().completion.call_count(), 0);
    assert_all_released(controller.connector());
}

#[tokio::test]
async fn test_runs_do_not_share_resources() {
    let workspace = TestWorkspace::new();
    let controller = workspace.controller(MockConnector::new().with_completion(scripted_completion()));
    let config = AgentConfig::artist(ARTIST, "https://hooks.example.com/img")
        .with_image_prompt("A fox in the snow");

    assert!(controller.run(&config).await.success);
    // The shared mock refuses calls once closed, so a second run fails
    // in the pipeline rather than reusing a released client.
    let second = controller.run(&config).await;
    assert_failed(&second, FailureKind::Pipeline);
    assert_eq!(controller.connector().completion.close_count(), 2);
    assert_eq!(
        controller.connector().opened(),
        vec!["completion", "completion"]
    );
}
