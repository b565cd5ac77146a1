//! JSON API over a loaded dashboard.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
