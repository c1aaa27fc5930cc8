use crate::error::{AppError, Result};
use crate::model::AddUrlParams;
use crate::state::AppState;
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use burrow_core::ShortCode;
use tracing::info;

/// Input form rendered by `/add` when no URL is given.
pub const ADD_FORM: &str = r#"<html><body>
<form method="POST" action="/add">
URL: <input type="text" name="url">
<input type="submit" value="Add">
</form>
</body></html>
"#;

/// GET /{key}
///
/// Redirects to the URL stored under `key`. Lookups never touch the disk.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // Anything that is not a well-formed key cannot have been handed out.
    let key = ShortCode::new(&key).map_err(|_| AppError::NotFound)?;
    let url = state.store().get(key.as_str()).ok_or(AppError::NotFound)?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

/// GET /add?url=...
pub async fn add_query_handler(
    State(state): State<AppState>,
    Query(params): Query<AddUrlParams>,
) -> Html<String> {
    add(&state, params).await
}

/// POST /add (url-encoded form)
pub async fn add_form_handler(
    State(state): State<AppState>,
    Form(params): Form<AddUrlParams>,
) -> Html<String> {
    add(&state, params).await
}

async fn add(state: &AppState, params: AddUrlParams) -> Html<String> {
    if params.url.is_empty() {
        return Html(ADD_FORM.to_owned());
    }
    let key = state.store().put(&params.url).await;
    info!(key = %key, url = %params.url, "stored url");
    Html(key.to_string())
}
