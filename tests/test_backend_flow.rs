use mockito::{Matcher, Server};
use recipesnap::capture::ImageSource;
use recipesnap::providers::BackendProvider;
use recipesnap::{
    generate_recipes, Ingredient, PipelineState, Session, SnapConfig, SnapError, Stage,
};
use std::io::Write;

fn config(server_url: &str) -> SnapConfig {
    SnapConfig {
        detection_url: server_url.to_string(),
        recipe_url: server_url.to_string(),
        timeout: 5,
        ..Default::default()
    }
}

fn upload() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    file.write_all(b"not-really-a-jpeg").unwrap();
    file
}

#[tokio::test]
async fn test_upload_detect_generate() {
    let mut server = Server::new_async().await;
    let analyze = server
        .mock("POST", "/analyze")
        .match_body(Matcher::Regex("not-really-a-jpeg".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"caption": "tomatoes and basil",
                "ingredients": [{"name": "tomato", "confidence": 0.91}]}"#,
        )
        .expect(1)
        .create_async()
        .await;
    let generate = server
        .mock("POST", "/generate-recipes")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "image_caption": "tomatoes and basil"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"generated_text": "Recipe: Tomato Soup\nBoil tomatoes\nAdd salt"}"#)
        .expect(1)
        .create_async()
        .await;

    let file = upload();
    let mut session = Session::from_config(&config(&server.url())).unwrap();
    session
        .capture(&ImageSource::Path(file.path().to_path_buf()))
        .await
        .unwrap();
    assert_eq!(session.controller().state(), PipelineState::Detected);
    assert_eq!(session.controller().ingredients()[0].confidence_percent(), 91);

    session.generate().await.unwrap();
    let recipes = session.controller().recipes();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "Tomato Soup");
    assert_eq!(recipes[0].content, "Boil tomatoes\nAdd salt");

    analyze.assert_async().await;
    generate.assert_async().await;
}

#[tokio::test]
async fn test_detection_detail_reaches_user() {
    let mut server = Server::new_async().await;
    let _analyze = server
        .mock("POST", "/analyze")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "unsupported format"}"#)
        .create_async()
        .await;

    let file = upload();
    let mut session = Session::from_config(&config(&server.url())).unwrap();
    session
        .capture(&ImageSource::Path(file.path().to_path_buf()))
        .await
        .unwrap();

    assert_eq!(
        session.controller().state(),
        PipelineState::Error(Stage::Detection)
    );
    assert_eq!(session.controller().error(), Some("unsupported format"));
}

#[tokio::test]
async fn test_detection_status_reaches_user() {
    let mut server = Server::new_async().await;
    let _analyze = server
        .mock("POST", "/analyze")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let file = upload();
    let mut session = Session::from_config(&config(&server.url())).unwrap();
    session
        .capture(&ImageSource::Path(file.path().to_path_buf()))
        .await
        .unwrap();

    let message = session.controller().error().unwrap();
    assert!(message.contains("502"), "{}", message);
}

#[tokio::test]
async fn test_generation_failure_reaches_user() {
    let mut server = Server::new_async().await;
    let _analyze = server
        .mock("POST", "/analyze")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"caption": "", "ingredients": [{"name": "apple", "confidence": 0.5}]}"#)
        .create_async()
        .await;
    let _generate = server
        .mock("POST", "/generate-recipes")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Error generating recipes: model not found"}"#)
        .create_async()
        .await;

    let file = upload();
    let mut session = Session::from_config(&config(&server.url())).unwrap();
    session
        .capture(&ImageSource::Path(file.path().to_path_buf()))
        .await
        .unwrap();
    session.generate().await.unwrap();

    assert_eq!(
        session.controller().state(),
        PipelineState::Error(Stage::Generation)
    );
    assert_eq!(
        session.controller().error(),
        Some("Error generating recipes: model not found")
    );
}

#[tokio::test]
async fn test_empty_ingredients_make_no_request() {
    let mut server = Server::new_async().await;
    let generate = server
        .mock("POST", "/generate-recipes")
        .expect(0)
        .create_async()
        .await;

    let provider = BackendProvider::with_base_url(server.url());
    let ingredients: Vec<Ingredient> = Vec::new();
    let result = generate_recipes(&provider, &ingredients, "an empty fridge").await;

    assert!(matches!(result, Err(SnapError::EmptyInput)));
    generate.assert_async().await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let mut server = Server::new_async().await;
    let _health = server
        .mock("GET", "/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "healthy", "models_loaded": false}"#)
        .create_async()
        .await;

    let health = recipesnap::check_health(&config(&server.url())).await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.models_loaded);
}
