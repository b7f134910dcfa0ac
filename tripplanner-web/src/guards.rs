//! Route guards.
//!
//! Guards are pure functions of the authentication flag. They are evaluated
//! on every render of a routed view and never cached.

use crate::routes::MainRoute;

/// Access rule attached to a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Only reachable without a session; authenticated users go home.
    GuestOnly,
    /// Only reachable with a session; guests go to the login view.
    AuthenticatedOnly,
    /// Reachable by everyone.
    Public,
}

/// Outcome of evaluating a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(MainRoute),
}

impl RouteGuard {
    pub fn evaluate(self, is_authenticated: bool) -> NavigationDecision {
        match (self, is_authenticated) {
            (Self::GuestOnly, true) => NavigationDecision::Redirect(MainRoute::Home),
            (Self::AuthenticatedOnly, false) => NavigationDecision::Redirect(MainRoute::Login),
            _ => NavigationDecision::Allow,
        }
    }
}

/// Decides whether `route` may render for the given authentication state.
pub fn check(route: &MainRoute, is_authenticated: bool) -> NavigationDecision {
    route.guard().evaluate(is_authenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_guest_only_guard() {
        assert_eq!(
            RouteGuard::GuestOnly.evaluate(true),
            NavigationDecision::Redirect(MainRoute::Home)
        );
        assert_eq!(RouteGuard::GuestOnly.evaluate(false), NavigationDecision::Allow);
    }

    #[test]
    fn test_authenticated_only_guard() {
        assert_eq!(
            RouteGuard::AuthenticatedOnly.evaluate(false),
            NavigationDecision::Redirect(MainRoute::Login)
        );
        assert_eq!(
            RouteGuard::AuthenticatedOnly.evaluate(true),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn test_public_guard_always_allows() {
        assert_eq!(RouteGuard::Public.evaluate(true), NavigationDecision::Allow);
        assert_eq!(RouteGuard::Public.evaluate(false), NavigationDecision::Allow);
    }

    #[test]
    fn test_guest_routes_unreachable_when_authenticated() {
        for route in [MainRoute::Login, MainRoute::Signup] {
            assert_eq!(
                check(&route, true),
                NavigationDecision::Redirect(MainRoute::Home)
            );
            assert_eq!(check(&route, false), NavigationDecision::Allow);
        }
    }

    #[test]
    fn test_protected_routes_unreachable_as_guest() {
        for route in [MainRoute::Home, MainRoute::Plan] {
            assert_eq!(
                check(&route, false),
                NavigationDecision::Redirect(MainRoute::Login)
            );
            assert_eq!(check(&route, true), NavigationDecision::Allow);
        }
    }

    #[test]
    fn test_redirect_targets_are_never_redirected_again() {
        // a redirect must land on a route that renders for the same state
        for route in MainRoute::iter() {
            for is_authenticated in [true, false] {
                if let NavigationDecision::Redirect(target) = check(&route, is_authenticated) {
                    assert_eq!(check(&target, is_authenticated), NavigationDecision::Allow);
                }
            }
        }
    }
}
