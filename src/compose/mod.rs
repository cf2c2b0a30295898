//! Function composition utilities over first-class [`Value`] callables.
//!
//! This module provides value-level composition in a functional programming
//! style: since iteratees, reducers and wrapped targets all travel as
//! [`Value::Function`]s, composition has to happen at the value level too.
//!
//! # Overview
//!
//! - [`curry`]: Convert a function value into curried form; arguments
//!   accumulate across applications in any grouping
//! - [`compose`]: Compose function values right-to-left (mathematical
//!   composition)
//! - [`pipe`]: Compose function values left-to-right (data flow style)
//!
//! # Helper Functions
//!
//! - [`identity`]: A function value that returns its argument unchanged
//! - [`constant`]: A function value that always returns the same value
//! - [`flip`]: Swaps the first two arguments of a function value
//!
//! # Examples
//!
//! ## Currying
//!
//! ```rust
//! use lodars::compose::curry;
//! use lodars::Value;
//!
//! let add = Value::function(2, |_, args| {
//!     let a = args[0].as_number().unwrap_or(0.0);
//!     let b = args[1].as_number().unwrap_or(0.0);
//!     Ok(Value::number(a + b))
//! });
//!
//! let curried = curry(&add).unwrap();
//! let add_five = curried
//!     .as_function()
//!     .unwrap()
//!     .call(&Value::Nil, &[Value::number(5.0)])
//!     .unwrap();
//! let result = add_five
//!     .as_function()
//!     .unwrap()
//!     .call(&Value::Nil, &[Value::number(3.0)])
//!     .unwrap();
//! assert_eq!(result, Value::number(8.0));
//! ```
//!
//! ## Composition (right-to-left)
//!
//! ```rust
//! use lodars::compose::{compose, pipe};
//! use lodars::Value;
//!
//! let add_one = Value::function(1, |_, args| {
//!     Ok(Value::number(args[0].as_number().unwrap_or(0.0) + 1.0))
//! });
//! let double = Value::function(1, |_, args| {
//!     Ok(Value::number(args[0].as_number().unwrap_or(0.0) * 2.0))
//! });
//!
//! // compose(f, g)(x) = f(g(x))
//! let composed = compose(&[add_one.clone(), double.clone()]).unwrap();
//! let result = composed
//!     .as_function()
//!     .unwrap()
//!     .call(&Value::Nil, &[Value::number(5.0)])
//!     .unwrap();
//! assert_eq!(result, Value::number(11.0));
//!
//! // pipe runs left-to-right instead.
//! let piped = pipe(&[double, add_one]).unwrap();
//! let result = piped
//!     .as_function()
//!     .unwrap()
//!     .call(&Value::Nil, &[Value::number(5.0)])
//!     .unwrap();
//! assert_eq!(result, Value::number(11.0));
//! ```
//!
//! # Laws
//!
//! - **Associativity**: `compose(f, compose(g, h)) == compose(compose(f, g), h)`
//! - **Left Identity**: `compose(identity, f) == f`
//! - **Right Identity**: `compose(f, identity) == f`
//! - **Curry Equivalence**: `curry(f)(a)(b) == f(a, b)` for every grouping
//!   of the arguments
//!
//! [`Value`]: crate::value::Value
//! [`Value::Function`]: crate::value::Value::Function

mod curry;
mod pipeline;
mod utils;

pub use curry::curry;
pub use pipeline::{compose, pipe};
pub use utils::{constant, flip, identity};
