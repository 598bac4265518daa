pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod scoring;
pub mod session;
pub mod state;
pub mod ui;
pub mod watson;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
