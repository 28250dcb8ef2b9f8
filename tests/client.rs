//! Drives `MovieClient` and the screen models against a live server on an
//! ephemeral port.

use std::sync::Arc;

use movietrack::{
    AppState,
    client::{ClientError, MovieClient},
    config::{ClientConfig, Config},
    models::MovieDraft,
    screens::{CreateScreen, EditScreen, ListScreen, Navigation},
    validation::Field,
};

async fn spawn_server() -> MovieClient {
    let config = Config { database_url: "sqlite::memory:".to_string(), ..Config::default() };
    let state = AppState::connect(config).await.unwrap();
    let app = movietrack::app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MovieClient::new(ClientConfig::new(format!("http://{addr}/api"))).unwrap()
}

fn dune() -> MovieDraft {
    MovieDraft {
        name: "Dune".to_string(),
        description: "Desert planet".to_string(),
        year: 2021,
        image: "https://x.com/d.jpg".to_string(),
    }
}

#[tokio::test]
async fn crud_lifecycle() {
    let client = spawn_server().await;

    assert!(client.list_movies().await.unwrap().is_empty());

    let created = client.create_movie(&dune()).await.unwrap();
    assert_eq!(created.name, "Dune");
    assert!(!created.id.is_empty());

    let fetched = client.get_movie(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated =
        client.update_movie(&created.id, &MovieDraft { year: 2022, ..dune() }).await.unwrap();
    assert_eq!(updated.year, 2022);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);

    client.delete_movie(&created.id).await.unwrap();
    let err = client.get_movie(&created.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
    assert_eq!(err.message(), "Movie not found");

    // Deleting again is not an error.
    client.delete_movie(&created.id).await.unwrap();
}

#[tokio::test]
async fn server_errors_keep_their_category() {
    let client = spawn_server().await;

    let err = client.get_movie("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidId { .. }));
    assert_eq!(err.message(), "Invalid movie ID format");

    let err = client
        .update_movie("2b0c8f7e-5d1a-4c3b-9e8f-7a6b5c4d3e2f", &dune())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn list_screen_loads_and_deletes() {
    let client = spawn_server().await;
    let first = client.create_movie(&MovieDraft { name: "First".into(), ..dune() }).await.unwrap();
    client.create_movie(&MovieDraft { name: "Second".into(), ..dune() }).await.unwrap();

    let mut screen = ListScreen::new(client);
    screen.load().await;
    assert!(screen.notice().is_none());
    assert!(!screen.is_loading());
    let names: Vec<&str> = screen.movies().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Second", "First"]);

    screen.delete(&first.id).await;
    assert_eq!(screen.movies().len(), 1);
    assert_eq!(screen.movies()[0].name, "Second");
}

#[tokio::test]
async fn create_screen_submits_and_navigates() {
    let client = spawn_server().await;
    let mut screen = CreateScreen::new(client.clone());
    screen.form.name = "Heat".to_string();
    screen.form.description = "Crime in LA".to_string();
    screen.form.year = "1995".to_string();
    screen.form.image = "https://x.com/h.jpg".to_string();

    assert_eq!(screen.submit().await, Some(Navigation::List));
    assert!(screen.status_error().is_none());
    assert!(screen.form.name.is_empty());

    let movies = client.list_movies().await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].year, 1995);
}

#[tokio::test]
async fn edit_screen_prefills_and_saves() {
    let client = spawn_server().await;
    let created = client.create_movie(&dune()).await.unwrap();

    let mut screen = EditScreen::load(client.clone(), created.id.clone()).await;
    assert!(screen.is_loaded());
    assert_eq!(screen.form.name, "Dune");
    assert_eq!(screen.form.year, "2021");

    screen.form.year = "abc".to_string();
    assert_eq!(screen.submit().await, None);
    assert_eq!(screen.field_error(Field::Year), Some("Year must be a whole number"));

    screen.form.year = "2022".to_string();
    assert_eq!(screen.submit().await, Some(Navigation::List));
    assert_eq!(client.get_movie(&created.id).await.unwrap().year, 2022);
}

#[tokio::test]
async fn edit_screen_reports_missing_movie() {
    let client = spawn_server().await;
    let screen = EditScreen::load(client, "2b0c8f7e-5d1a-4c3b-9e8f-7a6b5c4d3e2f").await;
    assert!(!screen.is_loaded());
    assert_eq!(screen.status_error(), Some("Movie not found"));
}
