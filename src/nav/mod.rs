//! Client-side routing surface, kept headless: the UI shell asks the
//! [`Navigator`] where it should be, the gateway uses it for the 401
//! redirect, and the login screen consumes the preserved destination.

use std::sync::Mutex;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Courses,
    Categories,
    Items,
    LevelRanges,
    Orders,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/" | "/dashboard" => Self::Dashboard,
            "/login" => Self::Login,
            "/courses" => Self::Courses,
            "/categories" => Self::Categories,
            "/items" => Self::Items,
            "/level-ranges" => Self::LevelRanges,
            "/orders" => Self::Orders,
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Courses => "/courses",
            Self::Categories => "/categories",
            Self::Items => "/items",
            Self::LevelRanges => "/level-ranges",
            Self::Orders => "/orders",
            Self::NotFound => "/404",
        }
    }

    /// Everything except the login screen (and the 404 page) needs a session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }
}

#[derive(Debug)]
pub struct Navigator {
    current: Mutex<Route>,
    // where to go after the next successful login
    pending: Mutex<Option<Route>>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            current: Mutex::new(initial),
            pending: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Route {
        *self.current.lock().unwrap()
    }

    /// Navigate with the auth guard: a protected route without a session
    /// lands on login instead, remembering the requested destination.
    pub fn go(&self, session: &Session, route: Route) {
        if route.requires_auth() && !session.is_authenticated() {
            *self.pending.lock().unwrap() = Some(route);
            *self.current.lock().unwrap() = Route::Login;
            return;
        }
        *self.current.lock().unwrap() = route;
    }

    /// The 401 path: bounce to login, preserving where the user was. No-op
    /// when already on the login screen.
    pub fn force_login(&self) -> bool {
        let mut current = self.current.lock().unwrap();
        if *current == Route::Login {
            return false;
        }
        *self.pending.lock().unwrap() = Some(*current);
        *current = Route::Login;
        true
    }

    /// Deliberate logout: land on login with no preserved destination.
    pub fn reset_to_login(&self) {
        *self.pending.lock().unwrap() = None;
        *self.current.lock().unwrap() = Route::Login;
    }

    /// Destination after a successful login: the preserved route, or the
    /// dashboard.
    pub fn take_pending(&self) -> Route {
        self.pending
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Route::Dashboard)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

#[cfg(test)]
mod test {
    use crate::session::MemoryTokenStore;

    use super::*;

    fn signed_out_session() -> Session {
        Session::init(Box::new(MemoryTokenStore::new()))
    }

    #[test]
    fn parse_known_and_unknown_paths() {
        assert_eq!(Route::parse("/courses"), Route::Courses);
        assert_eq!(Route::parse("/level-ranges/"), Route::LevelRanges);
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse("/no-such-page"), Route::NotFound);
        assert_eq!(Route::parse(Route::Orders.path()), Route::Orders);
    }

    #[test]
    fn guard_redirects_and_preserves_destination() {
        let nav = Navigator::default();
        let session = signed_out_session();

        nav.go(&session, Route::Items);
        assert_eq!(nav.current(), Route::Login);
        assert_eq!(nav.take_pending(), Route::Items);
        // consumed: next login falls back to the dashboard
        assert_eq!(nav.take_pending(), Route::Dashboard);
    }

    #[test]
    fn force_login_is_a_noop_on_login() {
        let nav = Navigator::new(Route::Courses);
        assert!(nav.force_login());
        assert_eq!(nav.current(), Route::Login);
        assert!(!nav.force_login());
        assert_eq!(nav.take_pending(), Route::Courses);
    }
}
