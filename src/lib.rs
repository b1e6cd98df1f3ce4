pub mod app;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod picker;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use picker::DatePicker;
pub use state::AppState;
