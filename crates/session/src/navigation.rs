//! Role-derived navigation for the current session.

use opsdeck_auth::routes::{self, RouteEntry};

use crate::manager::SessionManager;

/// Navigation entries visible to the current session, in table order.
///
/// Logged out, expired, or malformed all mean nothing is visible:
/// authorization fails closed.
pub fn visible_routes(manager: &SessionManager) -> Vec<&'static RouteEntry> {
    match manager.current_session() {
        Some(session) => routes::main_routes_for_all(&session.claims.resolved_roles()),
        None => Vec::new(),
    }
}

/// Complete set of paths the current session may reach, subroutes included.
///
/// For guard checks rather than rendered navigation; deduplicated across the
/// profile's roles.
pub fn reachable_paths(manager: &SessionManager) -> Vec<&'static str> {
    match manager.current_session() {
        Some(session) => routes::all_paths_for_all(&session.claims.resolved_roles()),
        None => Vec::new(),
    }
}
