//! Route guard enforcing the session invariant on every navigation.
//!
//! Unauthenticated sessions only ever see the login route, and authenticated
//! sessions never see it. The check uses local state only: an expired token
//! passes here and is caught by the gateway on the first 401.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::CredentialStore;

use super::Navigator;

/// Default login route
pub const LOGIN_ROUTE: &str = "/login";

/// Default landing route after authentication
pub const LANDING_ROUTE: &str = "/transactions";

/// The two routes the guard knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routes {
    pub login: String,
    pub landing: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            login: LOGIN_ROUTE.to_string(),
            landing: LANDING_ROUTE.to_string(),
        }
    }
}

impl Routes {
    pub fn is_login(&self, path: &str) -> bool {
        path == self.login
    }
}

/// Outcome of a single navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToLanding,
}

impl GuardDecision {
    /// Decide from session presence and the target path alone
    pub fn evaluate(authenticated: bool, path: &str, routes: &Routes) -> Self {
        match (authenticated, routes.is_login(path)) {
            (false, false) => GuardDecision::RedirectToLogin,
            (true, true) => GuardDecision::RedirectToLanding,
            _ => GuardDecision::Allow,
        }
    }

    /// Route to send the user to, if the navigation was replaced
    pub fn target<'a>(&self, routes: &'a Routes) -> Option<&'a str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(&routes.login),
            GuardDecision::RedirectToLanding => Some(&routes.landing),
        }
    }

    pub fn is_redirect(&self) -> bool {
        !matches!(self, GuardDecision::Allow)
    }
}

pub struct NavigationGuard {
    credentials: Arc<CredentialStore>,
    routes: Routes,
}

impl NavigationGuard {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self::with_routes(credentials, Routes::default())
    }

    pub fn with_routes(credentials: Arc<CredentialStore>, routes: Routes) -> Self {
        Self {
            credentials,
            routes,
        }
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Evaluate a navigation to `path` against the current session
    pub fn check(&self, path: &str) -> GuardDecision {
        let authenticated = self.credentials.read().is_some();
        let decision = GuardDecision::evaluate(authenticated, path, &self.routes);
        debug!(path, authenticated, ?decision, "Route guard evaluated");
        decision
    }

    /// Evaluate and, on a redirect, send the navigator to the replacement route.
    /// Returns the route that ends up rendered.
    pub fn enforce<'a>(&'a self, path: &'a str, navigator: &dyn Navigator) -> &'a str {
        match self.check(path).target(&self.routes) {
            Some(target) => {
                navigator.go_to(target);
                target
            }
            None => path,
        }
    }
}
