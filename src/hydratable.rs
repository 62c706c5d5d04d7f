//! # Hydratable Types
//!
//! Rust erases parameter names at compile time, so a hydratable type states
//! its constructor signature explicitly: the ordered parameter names, the
//! argument constructor, and optionally a zero-argument constructor.
//!
//! ```rust
//! use hydrator::{hydratable, Hydrator};
//! use serde_json::json;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! hydratable!(Point { x: i64, y: i64 } => |x, y| Point { x, y }, default => Point::default());
//!
//! let point: Point = Hydrator::new().hydrate(&json!({"x": 3, "y": 4})).unwrap();
//! assert_eq!(point, Point { x: 3, y: 4 });
//! ```

use crate::error::{HydrationError, HydrationResult};
use crate::signature::CallArguments;

/// A type the hydrator can construct from a raw record
pub trait Hydratable: Sized {
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Constructor parameter names in declaration order
    fn constructor_parameters() -> &'static [&'static str];

    /// Construct from fully resolved positional arguments
    fn construct(args: CallArguments) -> HydrationResult<Self>;

    /// Whether [`construct_default`](Self::construct_default) is overridden
    fn has_default_constructor() -> bool {
        false
    }

    /// Zero-argument construction used when the arguments cannot all be resolved.
    ///
    /// Types without a default constructor keep this implementation.
    fn construct_default() -> HydrationResult<Self> {
        Err(HydrationError::no_default_constructor(
            Self::type_name(),
            Self::constructor_parameters(),
        ))
    }
}
