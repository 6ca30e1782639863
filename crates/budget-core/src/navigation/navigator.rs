use std::sync::Mutex;

/// Client-side navigation provided by the host environment.
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: &str);
}

/// Navigator that remembers every route it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes visited so far, oldest first
    pub fn visited(&self) -> Vec<String> {
        match self.visited.lock() {
            Ok(visited) => visited.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: &str) {
        match self.visited.lock() {
            Ok(mut visited) => visited.push(route.to_string()),
            Err(poisoned) => poisoned.into_inner().push(route.to_string()),
        }
    }
}
