//! State behind the list, create, and edit screens. Rendering lives
//! elsewhere; these types hold what the screens show and perform the calls
//! their buttons trigger.

use crate::{
    client::{ClientError, MovieClient},
    models::{Movie, MovieDraft, MovieInput, YearInput},
    validation::{self, Field, ValidationErrors},
};

/// Where a screen asks to go next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    List,
}

/// A transient, dismissible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub retry: bool,
}

pub struct ListScreen {
    client: MovieClient,
    movies: Vec<Movie>,
    loading: bool,
    notice: Option<Notice>,
}

impl ListScreen {
    pub fn new(client: MovieClient) -> Self {
        Self { client, movies: Vec::new(), loading: false, notice: None }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.client.list_movies().await {
            Ok(movies) => {
                self.movies = movies;
                self.notice = None;
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to load movies");
                self.notice = Some(Notice { message: err.message().to_string(), retry: true });
            },
        }
        self.loading = false;
    }

    /// Reloads after a failed load. Returns false when there is nothing to
    /// retry.
    pub async fn retry(&mut self) -> bool {
        if !self.notice.as_ref().is_some_and(|n| n.retry) {
            return false;
        }
        self.load().await;
        true
    }

    pub async fn delete(&mut self, id: &str) {
        match self.client.delete_movie(id).await {
            Ok(()) => self.load().await,
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "failed to delete movie");
                self.notice = Some(Notice { message: err.message().to_string(), retry: false });
            },
        }
    }
}

/// The four inputs as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub name: String,
    pub description: String,
    pub year: String,
    pub image: String,
}

impl MovieForm {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            name: movie.name.clone(),
            description: movie.description.clone(),
            year: movie.year.to_string(),
            image: movie.image.clone(),
        }
    }

    pub fn validate(&self) -> Result<MovieDraft, ValidationErrors> {
        validation::validate(&MovieInput {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            year: Some(YearInput::Text(self.year.clone())),
            image: Some(self.image.clone()),
        })
    }
}

/// Validates locally, then hands the draft to `send`. Field errors and the
/// failure message land on the screen.
async fn submit_form<F, Fut>(
    form: &MovieForm,
    field_errors: &mut ValidationErrors,
    status_error: &mut Option<String>,
    send: F,
) -> Option<Navigation>
where
    F: FnOnce(MovieDraft) -> Fut,
    Fut: Future<Output = Result<Movie, ClientError>>,
{
    *status_error = None;
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            *field_errors = errors;
            return None;
        },
    };
    *field_errors = ValidationErrors::default();

    match send(draft).await {
        Ok(_) => Some(Navigation::List),
        Err(err) => {
            *status_error = Some(err.message().to_string());
            None
        },
    }
}

pub struct CreateScreen {
    client: MovieClient,
    pub form: MovieForm,
    field_errors: ValidationErrors,
    status_error: Option<String>,
}

impl CreateScreen {
    pub fn new(client: MovieClient) -> Self {
        Self {
            client,
            form: MovieForm::default(),
            field_errors: ValidationErrors::default(),
            status_error: None,
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.for_field(field)
    }

    pub fn status_error(&self) -> Option<&str> {
        self.status_error.as_deref()
    }

    pub async fn submit(&mut self) -> Option<Navigation> {
        let client = &self.client;
        let send = |draft: MovieDraft| async move { client.create_movie(&draft).await };
        let nav =
            submit_form(&self.form, &mut self.field_errors, &mut self.status_error, send).await;
        if nav.is_some() {
            self.form = MovieForm::default();
        }
        nav
    }
}

pub struct EditScreen {
    client: MovieClient,
    id: String,
    pub form: MovieForm,
    loaded: bool,
    field_errors: ValidationErrors,
    status_error: Option<String>,
}

impl EditScreen {
    /// Opens the editor for `id`, pre-populated from the stored record.
    pub async fn load(client: MovieClient, id: impl Into<String>) -> Self {
        let id = id.into();
        let (form, loaded, status_error) = match client.get_movie(&id).await {
            Ok(movie) => (MovieForm::from_movie(&movie), true, None),
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "failed to load movie for editing");
                (MovieForm::default(), false, Some(err.message().to_string()))
            },
        };
        Self { client, id, form, loaded, field_errors: ValidationErrors::default(), status_error }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.for_field(field)
    }

    pub fn status_error(&self) -> Option<&str> {
        self.status_error.as_deref()
    }

    pub async fn submit(&mut self) -> Option<Navigation> {
        let client = &self.client;
        let id = self.id.as_str();
        let send = |draft: MovieDraft| async move { client.update_movie(id, &draft).await };
        submit_form(&self.form, &mut self.field_errors, &mut self.status_error, send).await
    }
}
