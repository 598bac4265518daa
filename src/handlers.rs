use crate::errors::AppError;
use crate::models::{PredictionReport, Survey};
use crate::scoring::{breakdown, build_report};
use crate::session::{Outcome, Page, session_cookie, set_cookie_value};
use crate::state::AppState;
use crate::ui::{render_form, render_results};
use axum::{
    Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match find_session(&state, &headers).await {
        Some((id, Page::Form { draft })) => with_session(Some(id), Html(render_form(draft.as_ref(), None))),
        Some((id, Page::Results(outcome))) => with_session(Some(id), Html(render_results(&outcome))),
        None => Html(render_form(None, None)).into_response(),
    }
}

pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<Survey>, FormRejection>,
) -> Response {
    let id = find_session(&state, &headers).await.map(|(id, _)| id);

    let survey = match form {
        Ok(Form(survey)) => survey,
        Err(rejection) => {
            warn!("unreadable survey form: {}", rejection.body_text());
            let message = format!("Please check your answers: {}", rejection.body_text());
            return with_session(id, Html(render_form(None, Some(&message))));
        }
    };

    if let Err(err) = survey.validate() {
        return with_session(id, Html(render_form(Some(&survey), Some(&err.to_string()))));
    }

    match state.predictor.predict(&survey).await {
        Ok(footprint) => {
            let id = state
                .sessions
                .lock()
                .await
                .show_results(id, Outcome { footprint, survey }, Utc::now());
            with_session(Some(id), Redirect::to("/"))
        }
        Err(err) => {
            warn!("prediction failed: {err}");
            with_session(id, Html(render_form(Some(&survey), Some(&err.to_string()))))
        }
    }
}

pub async fn reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let id = find_session(&state, &headers).await.map(|(id, _)| id);
    if let Some(id) = id {
        state.sessions.lock().await.show_form(id, Utc::now());
    }
    with_session(id, Redirect::to("/"))
}

pub async fn api_predict(
    State(state): State<AppState>,
    payload: Result<Json<Survey>, JsonRejection>,
) -> Result<Json<PredictionReport>, AppError> {
    let Json(survey) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    survey.validate()?;
    let footprint = state.predictor.predict(&survey).await?;
    info!(footprint, "api prediction served");
    Ok(Json(build_report(footprint, &breakdown(&survey))))
}

pub async fn health() -> &'static str {
    "ok"
}

async fn find_session(state: &AppState, headers: &HeaderMap) -> Option<(Uuid, Page)> {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(session_cookie);
    state.sessions.lock().await.lookup(cookie, Utc::now())
}

/// Refreshes the session cookie when the browser has a session.
fn with_session(id: Option<Uuid>, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    if let Some(value) = id.and_then(|id| HeaderValue::from_str(&set_cookie_value(id)).ok()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
