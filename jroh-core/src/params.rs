//! Parameter normalization for outgoing calls
//!
//! JSON-RPC 2.0 requires the `params` member of a request to be absent, a
//! JSON array, or a JSON object, never a bare scalar. This module owns the
//! rules that turn an ergonomic, variadic-feeling argument list into a
//! conformant `params` value.
//!
//! # Normalization Rules
//!
//! Evaluated in order over the serialized JSON shape of each argument:
//!
//! | Arguments                     | Resulting `params`            |
//! |-------------------------------|-------------------------------|
//! | none                          | omitted entirely              |
//! | one `null`                    | `[null]`                      |
//! | one array or object           | used unwrapped, as-is         |
//! | one scalar (number/string/bool) | wrapped: `[value]`          |
//! | two or more, any shapes       | wrapped: `[a1, a2, ...]`      |
//!
//! Empty composites are *not* special: an empty vec becomes `[]` and an
//! empty map becomes `{}`, on the wire literally. Only the complete absence
//! of arguments omits `params`.
//!
//! References need no special casing: serde serializes `&T`, `&&T`, `Box<T>`
//! and friends through to the pointed-to value, so `params![&person]` and
//! `params![person]` produce identical wire bytes.
//!
//! # The `params!` Macro
//!
//! Rust has no variadic functions, so the call-site ergonomics come from the
//! [`params!`](crate::params!) macro, which serializes each argument to a
//! [`serde_json::Value`] and applies the rules above:
//!
//! ```rust
//! use jroh_core::params;
//! use serde_json::json;
//!
//! assert!(params![].is_none());                      // omitted
//! assert_eq!(params![3].as_value(), Some(&json!([3])));
//! assert_eq!(params![1, 2].as_value(), Some(&json!([1, 2])));
//! ```
//!
//! # Escaping the Rules
//!
//! [`Params::raw`] bypasses normalization entirely for callers that need a
//! non-standard shape (including shapes the spec forbids); what they supply
//! is what goes on the wire.

use serde_json::Value;

/// Normalized `params` payload for a request or notification
///
/// A `Params` value is either "omitted" or a JSON value destined for the
/// `params` field. The only ways to build one are the closed constructor set
/// below ([`none`](Params::none), [`from_args`](Params::from_args),
/// [`raw`](Params::raw)) plus the [`params!`](crate::params!) macro, which
/// keeps every construction site on the normalization rules (or visibly
/// opted out of them).
///
/// # Examples
///
/// ```rust
/// use jroh_core::Params;
/// use serde_json::json;
///
/// // One composite argument passes through unwrapped.
/// let params = Params::from_args(vec![json!({"name": "Alex"})]);
/// assert_eq!(params.as_value(), Some(&json!({"name": "Alex"})));
///
/// // One scalar argument is wrapped.
/// let params = Params::from_args(vec![json!(42)]);
/// assert_eq!(params.as_value(), Some(&json!([42])));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params(Option<Value>);

impl Params {
    /// No parameters: the `params` field is omitted from serialization
    pub fn none() -> Self {
        Self(None)
    }

    /// Apply the normalization rules to an ordered argument list
    ///
    /// This is the core decision logic: zero arguments omit `params`, a
    /// single argument is classified by its JSON shape (composites pass
    /// through, scalars and null are wrapped), and two or more arguments
    /// always become an array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jroh_core::Params;
    /// use serde_json::{json, Value};
    ///
    /// assert!(Params::from_args(vec![]).is_none());
    /// assert_eq!(
    ///     Params::from_args(vec![Value::Null]).as_value(),
    ///     Some(&json!([null]))
    /// );
    /// assert_eq!(
    ///     Params::from_args(vec![json!([1, 2, 3])]).as_value(),
    ///     Some(&json!([1, 2, 3]))
    /// );
    /// ```
    pub fn from_args(mut args: Vec<Value>) -> Self {
        match args.len() {
            0 => Self(None),
            1 => {
                let only = args.remove(0);
                match only {
                    // A lone composite is already a valid params shape.
                    Value::Array(_) | Value::Object(_) => Self(Some(only)),
                    // Scalars and null must be wrapped to stay conformant.
                    scalar => Self(Some(Value::Array(vec![scalar]))),
                }
            }
            _ => Self(Some(Value::Array(args))),
        }
    }

    /// Use a value as `params` verbatim, bypassing normalization
    ///
    /// The escape hatch for non-standard servers: whatever is supplied here
    /// is serialized as-is, even shapes JSON-RPC 2.0 forbids (a bare scalar,
    /// for instance). Conformance is the caller's responsibility.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jroh_core::Params;
    /// use serde_json::json;
    ///
    /// // A bare scalar the normalizer would have wrapped.
    /// let params = Params::raw(json!(2));
    /// assert_eq!(params.as_value(), Some(&json!(2)));
    /// ```
    pub fn raw(value: Value) -> Self {
        Self(Some(value))
    }

    /// True when `params` will be omitted from serialization
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the normalized value, if any
    pub fn as_value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    /// Consume into the value destined for the envelope's `params` field
    pub fn into_value(self) -> Option<Value> {
        self.0
    }
}

/// Build a [`Params`] from a variadic-style argument list
///
/// Each argument is serialized to JSON with the same machinery as
/// [`serde_json::json!`], then the list is normalized by
/// [`Params::from_args`]. Anything implementing [`serde::Serialize`] works:
/// scalars, structs, maps, vectors, references, `Option`s.
///
/// # Examples
///
/// ```rust
/// use jroh_core::params;
/// use serde::Serialize;
/// use serde_json::json;
///
/// #[derive(Serialize)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let person = Person { name: "Alex".into(), age: 33 };
///
/// // Zero arguments: params omitted.
/// assert!(params![].is_none());
///
/// // One struct: passed through as an object.
/// assert_eq!(
///     params![&person].as_value(),
///     Some(&json!({"name": "Alex", "age": 33}))
/// );
///
/// // Several arguments: always an array.
/// assert_eq!(
///     params![1, "two", true].as_value(),
///     Some(&json!([1, "two", true]))
/// );
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::none()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::Params::from_args(vec![$($crate::json!($arg)),+])
    };
}
