#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Hydrator
//!
//! Builds strongly-typed objects from loosely-typed key/value records by
//! matching record keys to constructor parameter names.
//!
//! ## Overview
//!
//! Raw records (decoded JSON objects, maps) rarely follow the naming
//! convention of the types they populate. For each constructor parameter the
//! hydrator tries three candidate keys, in order:
//!
//! 1. the snake_case form (`userId` -> `user_id`)
//! 2. the snake_case form with letters and trailing digits split (`alpha2` -> `alpha_2`)
//! 3. the parameter name exactly as declared
//!
//! When every parameter matches, the type is constructed from the matched
//! values in declaration order. Otherwise the zero-argument constructor is
//! used, and only a type without one turns the mismatch into an error.
//!
//! ## Module Organization
//!
//! - [`hydrator`] - Resolution and construction, single records and collections
//! - [`keys`] - Candidate key heuristic
//! - [`record`] - Raw record abstraction
//! - [`signature`] - Constructor signatures and positional call arguments
//! - [`hydratable`] - Compile-time type descriptors
//! - [`registry`] - Runtime type descriptors addressed by name
//! - [`config`] - Collection execution settings
//! - [`logging`] - Console logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use hydrator::{hydratable, Hydrator};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! hydratable!(User { userId: u64, displayName: String } => |id, name| User { id, name });
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hydrator = Hydrator::new();
//! let user: User = hydrator.hydrate(&json!({"user_id": 42, "display_name": "Ada"}))?;
//! assert_eq!(user, User { id: 42, name: "Ada".to_string() });
//!
//! let users: Vec<User> = hydrator.hydrate_collection(&[
//!     json!({"user_id": 1, "display_name": "Grace"}),
//!     json!({"userId": 2, "displayName": "Linus"}),
//! ])?;
//! assert_eq!(users.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod hydratable;
pub mod hydrator;
pub mod keys;
pub mod logging;
mod macros;
pub mod record;
pub mod registry;
pub mod signature;

#[doc(hidden)]
pub use tracing;

pub use crate::config::HydratorConfig;
pub use error::{HydrationError, HydrationResult};
pub use hydratable::Hydratable;
pub use hydrator::{resolve_arguments, Hydrator, Resolution};
pub use keys::{candidate_keys, CandidateKeys};
pub use record::RawRecord;
pub use registry::{HydratedObject, TypeRegistry, TypeSchema};
pub use signature::{CallArguments, ConstructorSignature, ParameterDescriptor, ResolvedArgument};
