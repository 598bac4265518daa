use crate::models::Survey;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub const COOKIE_NAME: &str = "carbon_session";

/// A finished prediction and the answers that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub footprint: f64,
    pub survey: Survey,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// The survey, optionally pre-filled with the previous answers.
    Form { draft: Option<Survey> },
    Results(Outcome),
}

impl Default for Page {
    fn default() -> Self {
        Page::Form { draft: None }
    }
}

#[derive(Debug, Clone)]
struct Session {
    page: Page,
    last_seen: DateTime<Utc>,
}

/// In-memory per-browser page state. Nothing here outlives the process.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Looks up the session named by the cookie value. Nothing is created
    /// here; a browser only gets a session once it has a result to keep.
    pub fn lookup(&mut self, cookie: Option<&str>, now: DateTime<Utc>) -> Option<(Uuid, Page)> {
        self.prune(now);

        let id = cookie.and_then(|value| Uuid::parse_str(value).ok())?;
        let session = self.sessions.get_mut(&id)?;
        session.last_seen = now;
        Some((id, session.page.clone()))
    }

    /// Shows the results page, opening a session when `id` is `None`.
    pub fn show_results(&mut self, id: Option<Uuid>, outcome: Outcome, now: DateTime<Utc>) -> Uuid {
        let id = id.unwrap_or_else(|| {
            let id = Uuid::new_v4();
            debug!(%id, "opening session");
            id
        });
        self.set_page(id, Page::Results(outcome), now);
        id
    }

    /// Returns to the survey, keeping the last answers as the draft.
    /// Unknown ids are ignored.
    pub fn show_form(&mut self, id: Uuid, now: DateTime<Utc>) {
        let draft = match self.sessions.get(&id).map(|session| &session.page) {
            Some(Page::Results(outcome)) => Some(outcome.survey.clone()),
            Some(Page::Form { draft }) => draft.clone(),
            None => return,
        };
        self.set_page(id, Page::Form { draft }, now);
    }

    fn set_page(&mut self, id: Uuid, page: Page, now: DateTime<Utc>) {
        self.sessions.insert(id, Session { page, last_seen: now });
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, session| now - session.last_seen <= ttl);
        let dropped = before - self.sessions.len();
        if dropped > 0 {
            debug!(dropped, "pruned idle sessions");
        }
    }
}

/// Extracts our session id from a `Cookie` header value.
pub fn session_cookie(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == COOKIE_NAME).then_some(value)
    })
}

pub fn set_cookie_value(id: Uuid) -> String {
    format!("{COOKIE_NAME}={id}; Path=/; HttpOnly; SameSite=Lax")
}
