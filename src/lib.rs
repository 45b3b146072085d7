pub mod app;
pub mod config;
pub mod error;
pub mod provider;
pub mod recipes;
pub mod state;
pub mod users;
