pub mod app;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod survey;
pub mod sync;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::RemoteStorage;
