mod app;
mod config;
mod console;
mod effects;

pub use app::run_app;
