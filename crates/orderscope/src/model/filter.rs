//! Region selection over a loaded order collection.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::order::OrderRecord;

/// Selects orders by `customer_state`. An empty filter selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFilter {
    #[serde(default)]
    states: IndexSet<String>,
}

impl RegionFilter {
    /// A filter that selects every order.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter on the given states. Blank entries are ignored.
    pub fn states<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let states = states
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { states }
    }

    /// Parse a comma-separated list such as `SP,RJ,MG`.
    pub fn parse(list: &str) -> Self {
        Self::states(list.split(','))
    }

    /// Selected states in the order they were given.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.as_str())
    }

    /// Whether this filter selects everything.
    pub fn is_all(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether an order passes this filter.
    pub fn matches(&self, order: &OrderRecord) -> bool {
        if self.states.is_empty() {
            return true;
        }
        order
            .customer_state
            .as_deref()
            .is_some_and(|state| self.states.contains(state))
    }

    /// The orders that pass this filter, in input order.
    pub fn apply<'a>(&self, orders: &'a [OrderRecord]) -> Vec<&'a OrderRecord> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}
