//! Reading and writing static-route files (`/etc/network/routes` format).
//!
//! ```text
//! <network> <netmask> <gateway> <interface> [<options...>]
//! ```
//!
//! [`parse`] turns file text into [`RouteRecord`]s and [`format`] turns any
//! [`RouteFields`] implementor back into file text. Neither touches the
//! filesystem.

pub mod config;
pub mod error;
pub mod routes;

pub use error::{MalformedReason, RouteField, RouteFileError, RouteFileResult};
pub use routes::formatter::format;
pub use routes::netmask::{AddressFamily, NetmaskError};
pub use routes::parser::parse;
pub use routes::{RouteDraft, RouteFields, RouteOptions, RouteRecord};
