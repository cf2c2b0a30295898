//! The dynamic value model the toolkit operates on.
//!
//! The original problem domain is dynamically typed: collections may be
//! heterogeneous, iteratees are first-class values that may or may not be
//! callable, `reduce` can collapse a list to a scalar mid-chain, and deep
//! copy must survive reference cycles. [`Value`] expresses that directly:
//!
//! - Scalars: [`Value::Nil`], [`Value::Bool`], [`Value::Number`], [`Value::Text`]
//! - Containers: [`Value::List`] and [`Value::Record`], shared through
//!   `Rc<RefCell<...>>` so aliasing and reference cycles are representable
//! - [`Value::Function`]: a native callable with an explicit invocation
//!   context threaded alongside its positional arguments
//! - [`Value::Failure`]: a captured per-call failure usable as a value
//!   (`map` substitutes these into output positions)
//!
//! Equality and `Debug` are cycle-safe: comparing or printing a
//! self-referential value terminates instead of recursing forever.
//!
//! # Examples
//!
//! ```rust
//! use lodars::{Value, list};
//!
//! let numbers = list![1, 2, 3];
//! assert_eq!(numbers.sequence_length(), Some(3));
//! assert_eq!(numbers.element_at(1), Value::number(2.0));
//!
//! let double = Value::function(1, |_, args| {
//!     let n = args[0].as_number().unwrap_or(0.0);
//!     Ok(Value::number(n * 2.0))
//! });
//! assert!(double.is_callable());
//! ```

mod clone;

pub use clone::deep_clone;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{CallFailure, CallOutcome};

/// The largest length an array-like record may declare (2^53 - 1).
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A native callable wrapped as a value.
///
/// The body receives an explicit invocation context (the `this`-equivalent)
/// as its first parameter and the positional arguments as a slice, and
/// returns a [`CallOutcome`]. Failures are ordinary values of the outcome,
/// never unwinding.
pub struct NativeFunction {
    arity: usize,
    body: Box<dyn Fn(&Value, &[Value]) -> CallOutcome>,
}

impl NativeFunction {
    /// Creates a native function with the given declared arity.
    pub fn new(arity: usize, body: impl Fn(&Value, &[Value]) -> CallOutcome + 'static) -> Self {
        Self {
            arity,
            body: Box::new(body),
        }
    }

    /// The declared arity, used by `curry` to decide saturation.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Invokes the function with an explicit context and arguments.
    #[inline]
    pub fn call(&self, context: &Value, arguments: &[Value]) -> CallOutcome {
        (self.body)(context, arguments)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<function/{}>", self.arity)
    }
}

/// A dynamically typed value.
///
/// `Value` is `Clone`, and cloning is shallow: lists and records share their
/// backing storage through `Rc`. Use [`deep_clone`] for an independent
/// structural copy.
///
/// # Thread Safety
///
/// `Value` is NOT thread-safe (`Rc`-based by design); the toolkit assumes a
/// single-threaded cooperative host.
#[derive(Clone)]
pub enum Value {
    /// The absent value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    Text(Rc<str>),
    /// An ordered, mutable, shareable sequence.
    List(Rc<RefCell<Vec<Value>>>),
    /// A string-keyed object. A record with an integral `"length"` field is
    /// treated as array-like by the sequence accessors.
    Record(Rc<RefCell<BTreeMap<String, Value>>>),
    /// A native callable.
    Function(Rc<NativeFunction>),
    /// A captured per-call failure.
    Failure(Rc<CallFailure>),
}

static_assertions::assert_impl_all!(Value: Clone, PartialEq);
static_assertions::assert_not_impl_any!(Value: Send, Sync);

// =============================================================================
// Constructors
// =============================================================================

impl Value {
    /// Creates a boolean value.
    #[inline]
    pub const fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    /// Creates a number value.
    #[inline]
    pub const fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a text value.
    #[inline]
    pub fn text(value: impl AsRef<str>) -> Self {
        Self::Text(Rc::from(value.as_ref()))
    }

    /// Creates a list value owning the given elements.
    #[inline]
    pub fn list(elements: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(elements)))
    }

    /// Creates a record value from key/value entries.
    #[inline]
    pub fn record(entries: impl IntoIterator<Item = (String, Self)>) -> Self {
        Self::Record(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Creates a function value with the given declared arity.
    #[inline]
    pub fn function(
        arity: usize,
        body: impl Fn(&Self, &[Self]) -> CallOutcome + 'static,
    ) -> Self {
        Self::Function(Rc::new(NativeFunction::new(arity, body)))
    }

    /// Wraps a call failure as a value.
    #[inline]
    pub fn failure(failure: CallFailure) -> Self {
        Self::Failure(Rc::new(failure))
    }
}

// =============================================================================
// Accessors
// =============================================================================

impl Value {
    /// The kind of this value, as used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Function(_) => "function",
            Self::Failure(_) => "failure",
        }
    }

    /// Returns the number if this value is one.
    #[inline]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text if this value is one.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the shared list storage if this value is a list.
    #[inline]
    pub const fn as_list(&self) -> Option<&Rc<RefCell<Vec<Self>>>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the shared record storage if this value is a record.
    #[inline]
    pub const fn as_record(&self) -> Option<&Rc<RefCell<BTreeMap<String, Self>>>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the native function if this value is callable.
    #[inline]
    pub const fn as_function(&self) -> Option<&Rc<NativeFunction>> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Whether this value can be invoked.
    #[inline]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Whether this value is a captured call failure.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Truthiness: `Nil`, `false`, zero, `NaN` and the empty string are
    /// falsy; every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(value) => !value.is_empty(),
            _ => true,
        }
    }

    /// Whether `self` and `other` share the same backing allocation.
    ///
    /// Only lists, records, functions and failures carry identity; scalars
    /// always answer `false`.
    pub fn shares_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(left), Self::List(right)) => Rc::ptr_eq(left, right),
            (Self::Record(left), Self::Record(right)) => Rc::ptr_eq(left, right),
            (Self::Function(left), Self::Function(right)) => Rc::ptr_eq(left, right),
            (Self::Failure(left), Self::Failure(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

// =============================================================================
// Sequence access
// =============================================================================

/// The declared length of an array-like record, if it has a valid one.
pub(crate) fn array_like_length(fields: &BTreeMap<String, Value>) -> Option<usize> {
    match fields.get("length") {
        Some(Value::Number(length))
            if *length >= 0.0 && length.fract() == 0.0 && *length <= MAX_SAFE_INTEGER =>
        {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(*length as usize)
        }
        _ => None,
    }
}

impl Value {
    /// The length of this value viewed as a sequence.
    ///
    /// Lists report their element count, text its character count, and a
    /// record with a non-negative integral `"length"` field its declared
    /// length. Everything else is not a sequence and answers `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lodars::{Value, list, record};
    ///
    /// assert_eq!(list![1, 2].sequence_length(), Some(2));
    /// assert_eq!(Value::text("abc").sequence_length(), Some(3));
    /// assert_eq!(record! {"length" => 2, "0" => "a"}.sequence_length(), Some(2));
    /// assert_eq!(Value::Nil.sequence_length(), None);
    /// ```
    pub fn sequence_length(&self) -> Option<usize> {
        match self {
            Self::List(items) => Some(items.borrow().len()),
            Self::Text(text) => Some(text.chars().count()),
            Self::Record(fields) => array_like_length(&fields.borrow()),
            _ => None,
        }
    }

    /// Whether this value is an ordered finite sequence.
    #[inline]
    pub fn is_sequence(&self) -> bool {
        self.sequence_length().is_some()
    }

    /// The element at `index`, or `Nil` for holes and out-of-bounds access.
    ///
    /// Array-like records are indexed through their decimal string keys, so
    /// a missing key (a hole) yields `Nil` while the declared length still
    /// drives iteration.
    pub fn element_at(&self, index: usize) -> Self {
        match self {
            Self::List(items) => items.borrow().get(index).cloned().unwrap_or(Self::Nil),
            Self::Text(text) => text
                .chars()
                .nth(index)
                .map_or(Self::Nil, |character| Self::text(character.to_string())),
            Self::Record(fields) => {
                let fields = fields.borrow();
                if array_like_length(&fields).is_some_and(|length| index < length) {
                    fields.get(&index.to_string()).cloned().unwrap_or(Self::Nil)
                } else {
                    Self::Nil
                }
            }
            _ => Self::Nil,
        }
    }

    /// Snapshots the present elements of this sequence into a `Vec`.
    ///
    /// Unlike [`element_at`](Self::element_at) driven iteration, holes in an
    /// array-like record are skipped rather than reported as `Nil`. Answers
    /// `None` when the value is not a sequence.
    pub fn to_items(&self) -> Option<Vec<Self>> {
        match self {
            Self::List(items) => Some(items.borrow().clone()),
            Self::Text(text) => Some(
                text.chars()
                    .map(|character| Self::text(character.to_string()))
                    .collect(),
            ),
            Self::Record(fields) => {
                let fields = fields.borrow();
                let length = array_like_length(&fields)?;
                Some(
                    (0..length)
                        .filter_map(|index| fields.get(&index.to_string()).cloned())
                        .collect(),
                )
            }
            _ => None,
        }
    }
}

// =============================================================================
// Cycle-safe equality
// =============================================================================

fn values_equal(left: &Value, right: &Value, visited: &mut Vec<(usize, usize)>) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        (Value::Failure(a), Value::Failure(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let pair = (Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize);
            // A pair already under comparison is assumed equal; this is what
            // makes comparing cyclic structures terminate.
            if visited.contains(&pair) {
                return true;
            }
            visited.push(pair);
            let left_items = a.borrow();
            let right_items = b.borrow();
            left_items.len() == right_items.len()
                && left_items
                    .iter()
                    .zip(right_items.iter())
                    .all(|(x, y)| values_equal(x, y, visited))
        }
        (Value::Record(a), Value::Record(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let pair = (Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize);
            if visited.contains(&pair) {
                return true;
            }
            visited.push(pair);
            let left_fields = a.borrow();
            let right_fields = b.borrow();
            left_fields.len() == right_fields.len()
                && left_fields.iter().zip(right_fields.iter()).all(
                    |((left_key, left_value), (right_key, right_value))| {
                        left_key == right_key && values_equal(left_value, right_value, visited)
                    },
                )
        }
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other, &mut Vec::new())
    }
}

// =============================================================================
// Cycle-safe Debug
// =============================================================================

fn format_value(
    value: &Value,
    formatter: &mut fmt::Formatter<'_>,
    visited: &mut Vec<usize>,
) -> fmt::Result {
    match value {
        Value::Nil => write!(formatter, "nil"),
        Value::Bool(inner) => write!(formatter, "{inner:?}"),
        Value::Number(inner) => write!(formatter, "{inner:?}"),
        Value::Text(inner) => write!(formatter, "{inner:?}"),
        Value::Function(function) => write!(formatter, "{function:?}"),
        Value::Failure(failure) => write!(formatter, "<failure: {}>", failure.message),
        Value::List(items) => {
            let key = Rc::as_ptr(items) as usize;
            if visited.contains(&key) {
                return write!(formatter, "<cycle>");
            }
            visited.push(key);
            write!(formatter, "[")?;
            for (index, element) in items.borrow().iter().enumerate() {
                if index > 0 {
                    write!(formatter, ", ")?;
                }
                format_value(element, formatter, visited)?;
            }
            visited.pop();
            write!(formatter, "]")
        }
        Value::Record(fields) => {
            let key = Rc::as_ptr(fields) as usize;
            if visited.contains(&key) {
                return write!(formatter, "<cycle>");
            }
            visited.push(key);
            write!(formatter, "{{")?;
            for (index, (field, element)) in fields.borrow().iter().enumerate() {
                if index > 0 {
                    write!(formatter, ", ")?;
                }
                write!(formatter, "{field:?}: ")?;
                format_value(element, formatter, visited)?;
            }
            visited.pop();
            write!(formatter, "}}")
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_value(self, formatter, &mut Vec::new())
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::list(value)
    }
}

/// Builds a [`Value::List`] from elements convertible into [`Value`].
///
/// # Examples
///
/// ```rust
/// use lodars::{Value, list};
///
/// let numbers = list![1, 2, 3];
/// assert_eq!(numbers.sequence_length(), Some(3));
/// assert_eq!(list![], Value::list(Vec::new()));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::value::Value::list(::std::vec::Vec::new())
    };
    ($($element:expr),+ $(,)?) => {
        $crate::value::Value::list(::std::vec![
            $($crate::value::Value::from($element)),+
        ])
    };
}

/// Builds a [`Value::Record`] from `key => value` entries.
///
/// # Examples
///
/// ```rust
/// use lodars::{Value, record};
///
/// let array_like = record! {"length" => 2, "0" => "a", "1" => "b"};
/// assert_eq!(array_like.sequence_length(), Some(2));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::value::Value::record(::std::iter::empty())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::value::Value::record([
            $((::std::string::String::from($key), $crate::value::Value::from($value))),+
        ])
    };
}

pub use crate::{list, record};
