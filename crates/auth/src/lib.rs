//! `opsdeck-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from storage and transport: it
//! decodes tokens it is handed, normalizes role claims, and filters the static
//! route table by role. Signature verification is delegated to the issuing
//! server.

pub mod claims;
pub mod codec;
pub mod roles;
pub mod routes;

pub use claims::Claims;
pub use codec::{decode, has_token_shape};
pub use roles::{Role, resolve_roles};
pub use routes::{
    ROUTE_TABLE, RouteEntry, SubRoute, all_paths_for, all_paths_for_all, main_routes_for,
    main_routes_for_all,
};
