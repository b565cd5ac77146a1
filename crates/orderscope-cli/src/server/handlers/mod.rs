//! API request handlers.

mod outliers;
mod states;
mod view;

pub use outliers::*;
pub use states::*;
pub use view::*;

use serde::Deserialize;

/// Region selection shared by every endpoint: `?states=SP,RJ`.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub states: Option<String>,
}
