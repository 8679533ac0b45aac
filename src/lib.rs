pub mod api_client;
pub mod app;
pub mod charts;
pub mod config;
pub mod controller;
pub mod credentials;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod sentiment;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod testing;

pub use api_client::{ApiClient, ApiError, HttpTransport, Transport};
pub use app::router;
pub use charts::ChartBinder;
pub use config::Config;
pub use controller::{Route, View, ViewController};
pub use notify::{MessageArea, Notifier};
pub use session::{FileSessionStore, MemorySession, Session, SessionProvider};
pub use state::AppState;
pub use storage::load_data;
pub use ui::PageModel;
