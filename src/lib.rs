//! # lodars
//!
//! A functional-utilities toolkit for Rust providing collection operators,
//! function composition, lazy method chaining, and time-based call-rate
//! controllers.
//!
//! ## Overview
//!
//! The toolkit operates on a dynamic [`Value`](value::Value) model so that
//! heterogeneous collections, first-class (possibly non-callable) iteratees
//! and mid-chain type changes can all be expressed, the way a dynamically
//! typed utility belt would. It includes:
//!
//! - **Values**: a shareable, cycle-tolerant value model with deep copy
//! - **Collection Operators**: `map`, `filter`, `reduce` with explicit
//!   per-call failure handling
//! - **Composition**: value-level `curry`, `compose`, `pipe`
//! - **Lazy Chaining**: a wrapper that records operations and evaluates them
//!   only when forced
//! - **Rate Controllers**: `debounce` and `throttle` state machines over a
//!   pluggable timer port
//!
//! ## Feature Flags
//!
//! - `collection`: Collection operators (`map`, `filter`, `reduce`)
//! - `compose`: Composition utilities (`curry`, `compose`, `pipe`)
//! - `chain`: The lazy chain wrapper (implies `collection`)
//! - `control`: Rate controllers and the timer port
//! - `async`: A tokio-backed timer adapter (implies `control`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lodars::prelude::*;
//! use lodars::{Value, list};
//!
//! let doubled = Value::function(1, |_, args| {
//!     let n = args[0].as_number().unwrap_or(0.0);
//!     Ok(Value::number(n * 2.0))
//! });
//! let big = Value::function(1, |_, args| {
//!     let n = args[0].as_number().unwrap_or(0.0);
//!     Ok(Value::bool(n > 5.0))
//! });
//!
//! let result = chain(&list![1, 2, 3, 4, 5])
//!     .map(doubled)
//!     .filter(big)
//!     .value()
//!     .unwrap();
//! assert_eq!(result, list![6, 8, 10]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use lodars::prelude::*;
/// ```
pub mod prelude {

    pub use crate::error::*;
    pub use crate::value::*;

    #[cfg(feature = "collection")]
    pub use crate::collection::*;

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "chain")]
    pub use crate::chain::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;
}

pub mod error;
pub mod value;

#[cfg(feature = "collection")]
pub mod collection;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "chain")]
pub mod chain;

#[cfg(feature = "control")]
pub mod control;

pub use error::{CallFailure, OperatorError};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports() {
        let value = Value::number(1.0);
        assert_eq!(value.kind(), "number");
        assert_eq!(
            OperatorError::EmptyReduceNoInitial.to_string(),
            "reduce of empty collection with no initial value"
        );
        assert_eq!(CallFailure::new("x").to_string(), "call failed: x");
    }
}
