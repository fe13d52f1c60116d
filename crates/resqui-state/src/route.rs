//! Dashboard views.

use std::fmt;

/// The view currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Nothing chosen yet; replaced once stats arrive.
    Root,
    Queue(String),
    Failed,
    Workers,
}

impl Route {
    pub fn queue_name(&self) -> Option<&str> {
        match self {
            Self::Queue(name) => Some(name),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Root => "Home",
            Self::Queue(name) => name,
            Self::Failed => "Failed",
            Self::Workers => "Workers",
        }
    }

    /// Tab order: every queue in backend order, then Failed, then Workers.
    pub fn tabs(queues: &[String]) -> Vec<Route> {
        queues
            .iter()
            .cloned()
            .map(Route::Queue)
            .chain([Route::Failed, Route::Workers])
            .collect()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
