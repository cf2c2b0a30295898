//! The lazy chain engine.
//!
//! [`chain`] wraps a deep, independent copy of a value and records operator
//! calls as descriptors instead of running them. Nothing executes until the
//! wrapper is forced with [`Chain::value`]; the recorded operations then
//! fold over the snapshot in call order, each step's output feeding the
//! next step.
//!
//! Once forced, the wrapper is permanently eager: further operator calls
//! execute immediately against the snapshot. [`Chain::run`] forces the
//! wrapper but returns the wrapper itself, so an eager chain can keep
//! going fluently.
//!
//! The engine adds no error semantics of its own — it only sequences the
//! collection operators. A step error (say, mapping over a scalar) is
//! reported by `value()` and latched, so the wrapper keeps answering with
//! the same error.
//!
//! # Examples
//!
//! ```rust
//! use lodars::chain::chain;
//! use lodars::{Value, list};
//!
//! let double = Value::function(1, |_, args| {
//!     Ok(Value::number(args[0].as_number().unwrap_or(0.0) * 2.0))
//! });
//! let big = Value::function(1, |_, args| {
//!     Ok(Value::bool(args[0].as_number().unwrap_or(0.0) > 5.0))
//! });
//!
//! let mut wrapper = chain(&list![1, 2, 3, 4, 5]).map(double).filter(big);
//! // Nothing has run yet; value() forces the recorded steps in order.
//! assert_eq!(wrapper.value().unwrap(), list![6, 8, 10]);
//! ```

use smallvec::SmallVec;

use crate::collection;
use crate::error::OperatorError;
use crate::value::{Value, deep_clone};

/// A recorded, not-yet-applied operation.
#[derive(Debug, Clone)]
enum PendingOp {
    Map(Value),
    Filter(Value),
    Reduce {
        reducer: Value,
        initial: Option<Value>,
    },
}

fn apply_operation(operation: &PendingOp, input: &Value) -> Result<Value, OperatorError> {
    match operation {
        PendingOp::Map(iteratee) => collection::map(input, iteratee),
        PendingOp::Filter(predicate) => collection::filter(input, predicate),
        PendingOp::Reduce { reducer, initial } => {
            collection::reduce(input, reducer, initial.clone())
        }
    }
}

/// A value wrapper that defers operations until forced.
///
/// Created by [`chain`]. Operator methods are fluent (they consume and
/// return the wrapper); in lazy mode they record a descriptor, in eager
/// mode (after [`value`](Self::value) or [`run`](Self::run)) they execute
/// immediately.
#[derive(Debug)]
pub struct Chain {
    snapshot: Value,
    pending: SmallVec<[PendingOp; 4]>,
    evaluated: bool,
    failed: Option<OperatorError>,
}

/// Wraps `value` for lazy chaining.
///
/// Construction deep-copies the value (cycle-safe, see
/// [`deep_clone`]), so later mutation of the caller's original
/// never affects the chain.
pub fn chain(value: &Value) -> Chain {
    Chain::new(value)
}

impl Chain {
    /// Wraps `value` for lazy chaining; see [`chain`].
    pub fn new(value: &Value) -> Self {
        Self {
            snapshot: deep_clone(value),
            pending: SmallVec::new(),
            evaluated: false,
            failed: None,
        }
    }

    /// Whether the wrapper has been forced into eager mode.
    #[inline]
    pub const fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// The number of recorded, not-yet-applied operations.
    #[inline]
    pub fn pending_operations(&self) -> usize {
        self.pending.len()
    }

    /// Chains a `map` step with the given iteratee.
    pub fn map(self, iteratee: Value) -> Self {
        self.record_or_apply(PendingOp::Map(iteratee))
    }

    /// Chains a `filter` step with the given predicate.
    pub fn filter(self, predicate: Value) -> Self {
        self.record_or_apply(PendingOp::Filter(predicate))
    }

    /// Chains an unseeded `reduce` step (the first element seeds the fold).
    pub fn reduce(self, reducer: Value) -> Self {
        self.record_or_apply(PendingOp::Reduce {
            reducer,
            initial: None,
        })
    }

    /// Chains a seeded `reduce` step.
    pub fn reduce_with(self, reducer: Value, initial: Value) -> Self {
        self.record_or_apply(PendingOp::Reduce {
            reducer,
            initial: Some(initial),
        })
    }

    /// Forces the chain and returns the result.
    ///
    /// Pending operations fold over the snapshot in recorded order and the
    /// result becomes the new snapshot. With nothing pending this is
    /// idempotent: the stored result is returned without re-running any
    /// recorded step.
    ///
    /// # Errors
    ///
    /// The first step error ([`OperatorError`]) is returned and latched;
    /// subsequent calls keep returning it.
    pub fn value(&mut self) -> Result<Value, OperatorError> {
        if let Some(error) = &self.failed {
            return Err(error.clone());
        }
        let operations = std::mem::take(&mut self.pending);
        let mut current = self.snapshot.clone();
        for operation in &operations {
            match apply_operation(operation, &current) {
                Ok(next) => current = next,
                Err(error) => {
                    self.failed = Some(error.clone());
                    self.evaluated = true;
                    return Err(error);
                }
            }
        }
        self.snapshot = current;
        self.evaluated = true;
        Ok(self.snapshot.clone())
    }

    /// Forces the chain like [`value`](Self::value) but returns the wrapper
    /// itself, leaving it in eager mode for continued chaining.
    ///
    /// # Errors
    ///
    /// Propagates the first step error, as `value()` does.
    pub fn run(mut self) -> Result<Self, OperatorError> {
        self.value()?;
        Ok(self)
    }

    fn record_or_apply(mut self, operation: PendingOp) -> Self {
        if self.failed.is_some() {
            return self;
        }
        if self.evaluated {
            match apply_operation(&operation, &self.snapshot) {
                Ok(next) => self.snapshot = next,
                Err(error) => self.failed = Some(error),
            }
        } else {
            self.pending.push(operation);
        }
        self
    }
}
