pub mod app;
pub mod config;
pub mod persona;
pub mod provider;
pub mod shared;
pub mod tui;
