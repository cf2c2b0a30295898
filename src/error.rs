//! Error types for the toolkit.
//!
//! This module provides the error taxonomy shared by the collection
//! operators, the composition utilities, the chain wrapper and the rate
//! controllers. Type errors ([`OperatorError`]) are raised synchronously at
//! construction or entry; failures produced *by* a wrapped callback travel
//! as explicit [`CallFailure`] values that each operator inspects to decide
//! inclusion or continuation, rather than as unwinding.

/// Represents a type or contract error raised at an operator's entry point.
///
/// These errors are returned synchronously to the caller and are never
/// retried by the toolkit.
///
/// # Examples
///
/// ```rust
/// use lodars::error::OperatorError;
///
/// let error = OperatorError::NotCallable { found: "number" };
/// assert_eq!(format!("{}", error), "expected a function but got number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// A function-valued argument was expected but something else was given.
    NotCallable {
        /// The kind of value that was found instead.
        found: &'static str,
    },
    /// An ordered finite sequence was expected but something else was given.
    NotCollection {
        /// The kind of value that was found instead.
        found: &'static str,
    },
    /// `reduce` was applied to an empty sequence with no initial value.
    EmptyReduceNoInitial,
}

impl std::fmt::Display for OperatorError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotCallable { found } => {
                write!(formatter, "expected a function but got {found}")
            }
            Self::NotCollection { found } => {
                write!(formatter, "expected a collection but got {found}")
            }
            Self::EmptyReduceNoInitial => {
                write!(formatter, "reduce of empty collection with no initial value")
            }
        }
    }
}

impl std::error::Error for OperatorError {}

/// An explicit per-call failure produced by a wrapped callback.
///
/// Callables in this toolkit return `Result<Value, CallFailure>`. The
/// collection operators inspect the outcome of every callback invocation:
/// `map` substitutes the failure into the output position, `filter` treats
/// it as "exclude", and `reduce` aborts the fold early. The chain wrapper
/// and the rate controllers add no recovery of their own; a failure raised
/// during a deferred (timer-fired) invocation propagates to whatever
/// invoked the timer callback.
///
/// # Examples
///
/// ```rust
/// use lodars::error::CallFailure;
///
/// let failure = CallFailure::new("division by zero");
/// assert_eq!(format!("{}", failure), "call failed: division by zero");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    /// A human-readable description of what went wrong.
    pub message: String,
}

impl CallFailure {
    /// Creates a new failure with the given message.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CallFailure {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "call failed: {}", self.message)
    }
}

impl std::error::Error for CallFailure {}

/// The outcome of invoking a callable value.
pub type CallOutcome = Result<crate::value::Value, CallFailure>;
