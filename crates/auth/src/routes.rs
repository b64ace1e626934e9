//! Static route table and role-based filtering.
//!
//! The table is declared once at compile time and never mutated. Entries with
//! an empty `roles` slice match no caller — public/unauthenticated routes are
//! handled entirely outside this table by the surrounding router.

use crate::Role;

/// A secondary navigation target nested under a main route.
#[derive(Debug, PartialEq, Eq)]
pub struct SubRoute {
    pub name: &'static str,
    pub href: &'static str,
}

/// A statically declared navigation/authorization unit.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub icon: &'static str,
    pub name: &'static str,
    pub href: &'static str,
    /// Declared membership: which roles may see/reach this entry.
    pub roles: &'static [Role],
    pub subroutes: &'static [SubRoute],
}

/// Console route table, in navigation order.
pub static ROUTE_TABLE: [RouteEntry; 9] = [
    RouteEntry {
        icon: "gauge",
        name: "Dashboard",
        href: "/dashboard",
        roles: &[Role::SuperAdmin, Role::Admin, Role::Moderator, Role::User],
        subroutes: &[],
    },
    RouteEntry {
        icon: "building",
        name: "Tenants",
        href: "/tenants",
        roles: &[Role::SuperAdmin],
        subroutes: &[SubRoute {
            name: "Provisioning",
            href: "/tenants/provisioning",
        }],
    },
    RouteEntry {
        icon: "users",
        name: "Users",
        href: "/users",
        roles: &[Role::SuperAdmin, Role::Admin],
        subroutes: &[SubRoute {
            name: "Invitations",
            href: "/users/invitations",
        }],
    },
    RouteEntry {
        icon: "activity",
        name: "Operations",
        href: "/operations",
        roles: &[Role::SuperAdmin, Role::Admin, Role::Moderator],
        subroutes: &[
            SubRoute {
                name: "Queue",
                href: "/operations/queue",
            },
            SubRoute {
                name: "History",
                href: "/operations/history",
            },
        ],
    },
    RouteEntry {
        icon: "boxes",
        name: "Inventory",
        href: "/inventory",
        roles: &[Role::SuperAdmin, Role::Admin, Role::Moderator, Role::User],
        subroutes: &[SubRoute {
            name: "Receiving",
            href: "/inventory/receiving",
        }],
    },
    RouteEntry {
        icon: "file-text",
        name: "Reports",
        href: "/reports",
        roles: &[Role::SuperAdmin, Role::Admin],
        subroutes: &[SubRoute {
            name: "Exports",
            href: "/reports/exports",
        }],
    },
    RouteEntry {
        icon: "shield",
        name: "Moderation",
        href: "/moderation",
        roles: &[Role::SuperAdmin, Role::Admin, Role::Moderator],
        subroutes: &[],
    },
    RouteEntry {
        icon: "scroll",
        name: "Audit Log",
        href: "/audit",
        roles: &[Role::SuperAdmin, Role::Admin],
        subroutes: &[],
    },
    RouteEntry {
        icon: "settings",
        name: "Settings",
        href: "/settings",
        roles: &[Role::SuperAdmin, Role::Admin, Role::User],
        subroutes: &[SubRoute {
            name: "Profile",
            href: "/settings/profile",
        }],
    },
];

/// Entries visible to `role`, preserving declared table order.
pub fn main_routes_for(role: Role) -> Vec<&'static RouteEntry> {
    routes_matching(&ROUTE_TABLE, role)
}

/// Every path reachable by `role`: matching entries' hrefs plus their
/// flattened subroutes. For guard checks rather than rendered navigation.
pub fn all_paths_for(role: Role) -> Vec<&'static str> {
    paths_matching(&ROUTE_TABLE, role)
}

/// Union of [`main_routes_for`] over a profile's role set.
///
/// A route reachable via more than one role appears exactly once (set
/// semantics on `href`), in first-occurrence order.
pub fn main_routes_for_all(roles: &[Role]) -> Vec<&'static RouteEntry> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for role in roles {
        for entry in routes_matching(&ROUTE_TABLE, *role) {
            if !seen.contains(&entry.href) {
                seen.push(entry.href);
                out.push(entry);
            }
        }
    }
    out
}

/// Union of [`all_paths_for`] over a profile's role set, deduplicated.
pub fn all_paths_for_all(roles: &[Role]) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for role in roles {
        for path in paths_matching(&ROUTE_TABLE, *role) {
            if !out.contains(&path) {
                out.push(path);
            }
        }
    }
    out
}

fn routes_matching(table: &'static [RouteEntry], role: Role) -> Vec<&'static RouteEntry> {
    table.iter().filter(|entry| entry.roles.contains(&role)).collect()
}

fn paths_matching(table: &'static [RouteEntry], role: Role) -> Vec<&'static str> {
    let mut paths = Vec::new();
    for entry in table.iter().filter(|entry| entry.roles.contains(&role)) {
        paths.push(entry.href);
        paths.extend(entry.subroutes.iter().map(|sub| sub.href));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_sees_eight_of_nine_entries_in_table_order() {
        let routes = main_routes_for(Role::Admin);
        assert_eq!(routes.len(), 8);

        let hrefs: Vec<_> = routes.iter().map(|r| r.href).collect();
        assert_eq!(
            hrefs,
            vec![
                "/dashboard",
                "/users",
                "/operations",
                "/inventory",
                "/reports",
                "/moderation",
                "/audit",
                "/settings",
            ]
        );
        assert!(!hrefs.contains(&"/tenants"));
    }

    #[test]
    fn tenants_is_super_admin_only() {
        assert!(main_routes_for(Role::SuperAdmin).iter().any(|r| r.href == "/tenants"));
        for role in [Role::Admin, Role::Moderator, Role::User] {
            assert!(!main_routes_for(role).iter().any(|r| r.href == "/tenants"));
        }
    }

    #[test]
    fn all_paths_include_flattened_subroutes() {
        let paths = all_paths_for(Role::Moderator);
        assert!(paths.contains(&"/operations"));
        assert!(paths.contains(&"/operations/queue"));
        assert!(paths.contains(&"/operations/history"));
        assert!(!paths.contains(&"/users/invitations"));
    }

    #[test]
    fn multi_role_union_has_no_duplicate_hrefs() {
        let paths = all_paths_for_all(&[Role::Admin, Role::User]);
        for (i, path) in paths.iter().enumerate() {
            assert!(!paths[..i].contains(path), "duplicate href {path}");
        }
        // Shared routes appear once; the union covers both roles' sets.
        assert!(paths.contains(&"/dashboard"));
        assert!(paths.contains(&"/reports"));
    }

    #[test]
    fn union_preserves_first_occurrence_order() {
        let routes = main_routes_for_all(&[Role::User, Role::Admin]);
        let hrefs: Vec<_> = routes.iter().map(|r| r.href).collect();
        // User's entries come first in table order, then admin-only additions.
        assert_eq!(
            hrefs,
            vec![
                "/dashboard",
                "/inventory",
                "/settings",
                "/users",
                "/operations",
                "/reports",
                "/moderation",
                "/audit",
            ]
        );
    }

    #[test]
    fn entry_with_empty_roles_matches_no_caller() {
        static UNREACHABLE: [RouteEntry; 1] = [RouteEntry {
            icon: "ghost",
            name: "Hidden",
            href: "/hidden",
            roles: &[],
            subroutes: &[],
        }];
        for role in Role::ALL {
            assert!(routes_matching(&UNREACHABLE, role).is_empty());
            assert!(paths_matching(&UNREACHABLE, role).is_empty());
        }
    }
}
