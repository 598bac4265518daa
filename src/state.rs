use crate::session::SessionStore;
use crate::watson::WatsonClient;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub predictor: WatsonClient,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(predictor: WatsonClient, sessions: SessionStore) -> Self {
        Self {
            predictor,
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }
}
