use budget_core::navigation::Navigator;

/// Navigator for the terminal: a route change is reported on stderr.
#[derive(Debug)]
pub struct TerminalNavigator {
    login_route: String,
}

impl TerminalNavigator {
    pub fn new(login_route: String) -> Self {
        Self { login_route }
    }

    fn notice(&self, route: &str) -> String {
        if route == self.login_route {
            format!("Redirected to {}. Sign in with `budget login`.", route)
        } else {
            format!("Redirected to {}", route)
        }
    }
}

impl Navigator for TerminalNavigator {
    fn go_to(&self, route: &str) {
        eprintln!("{}", self.notice(route));
    }
}
