//! Schema type definitions for declarative argv parsing.
//!
//! This module defines the data model a parse call consumes: per-field
//! [`ArgSpec`] descriptors bundled into a [`CommandSchema`]. The types are
//! designed for serialization with [`serde`] and round-trip through JSON, so
//! schemas can be embedded, generated, or shipped as data.
//!
//! Schemas are constructed once at startup and never mutated afterwards; a
//! parse call only reads them, so one schema instance can be shared freely
//! across threads.

use serde::{Deserialize, Serialize};

/// Where an argument's value comes from in the argument vector.
///
/// Every [`ArgSpec`] declares exactly one slot; the variants are mutually
/// exclusive by construction, so there is never a "positional or flag?"
/// question left to answer at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgSlot {
    /// Matched by name: `--name` or its single-character short alias.
    Option,
    /// A positional at a fixed, zero-based index.
    Fixed(usize),
    /// A variadic tail collecting every positional left over after all
    /// fixed slots are filled. At most one per schema.
    Rest,
}

/// Value type a field coerces its raw token(s) into.
///
/// # Examples
///
/// ```
/// use declarg_core::ValueKind;
///
/// let kind = ValueKind::Choice(vec!["fast".into(), "normal".into(), "detailed".into()]);
/// assert!(kind.takes_value());
/// assert!(!ValueKind::Bool.takes_value());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Presence flag. Seeing the option sets `true`; no value token is
    /// consumed.
    Bool,
    /// Raw string, passed through unchanged.
    Str,
    /// Signed integer, parsed as decimal.
    Int,
    /// Floating-point number, parsed as decimal. Non-finite results are
    /// rejected.
    Float,
    /// One of a fixed set of string values.
    Choice(Vec<String>),
}

impl ValueKind {
    /// Whether an option of this kind consumes the token following it.
    pub fn takes_value(&self) -> bool {
        !matches!(self, ValueKind::Bool)
    }

    /// Human-readable name used in help text and coercion errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use declarg_core::ValueKind;
    ///
    /// assert_eq!(ValueKind::Int.expected(), "integer");
    /// let choice = ValueKind::Choice(vec!["json".into(), "yaml".into()]);
    /// assert_eq!(choice.expected(), "one of: json, yaml");
    /// ```
    pub fn expected(&self) -> String {
        match self {
            ValueKind::Bool => "boolean".to_string(),
            ValueKind::Str => "string".to_string(),
            ValueKind::Int => "integer".to_string(),
            ValueKind::Float => "number".to_string(),
            ValueKind::Choice(values) => format!("one of: {}", values.join(", ")),
        }
    }
}

/// A coerced argument value.
///
/// Parsing produces one `ArgValue` per resolved field; defaults declared in
/// an [`ArgSpec`] use the same representation, so a defaulted field is
/// indistinguishable from a supplied one in the output.
///
/// # Examples
///
/// ```
/// use declarg_core::ArgValue;
///
/// let v = ArgValue::Int(5);
/// assert_eq!(v.as_i64(), Some(5));
/// assert_eq!(v.as_str(), None);
/// assert_eq!(v.to_string(), "5");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// Boolean flag state.
    Bool(bool),
    /// String value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Collected rest values, coerced element-wise.
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the elements if this is a `List`.
    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value is a legal default for the given [`ValueKind`].
    ///
    /// `Choice` fields take a `Str` default; membership in the declared set
    /// is checked separately by validation.
    pub fn matches_kind(&self, kind: &ValueKind) -> bool {
        matches!(
            (self, kind),
            (ArgValue::Bool(_), ValueKind::Bool)
                | (ArgValue::Str(_), ValueKind::Str)
                | (ArgValue::Str(_), ValueKind::Choice(_))
                | (ArgValue::Int(_), ValueKind::Int)
                | (ArgValue::Float(_), ValueKind::Float)
        )
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::Str(s) => write!(f, "{s}"),
            ArgValue::Int(n) => write!(f, "{n}"),
            ArgValue::Float(n) => write!(f, "{n}"),
            ArgValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(ArgValue::to_string).collect();
                write!(f, "{}", rendered.join(" "))
            }
        }
    }
}

/// Specification for a single argument field.
///
/// An `ArgSpec` describes where a field's value comes from ([`ArgSlot`]),
/// what type it coerces to ([`ValueKind`]), and the metadata the help
/// renderer shows. Use the constructors [`option`](ArgSpec::option),
/// [`positional`](ArgSpec::positional), and [`rest`](ArgSpec::rest), then
/// chain builder methods.
///
/// # Examples
///
/// ```
/// use declarg_core::{ArgSpec, ArgValue, ValueKind};
///
/// let limit = ArgSpec::option("limit", ValueKind::Int)
///     .with_short('l')
///     .with_default(ArgValue::Int(10))
///     .with_description("Maximum number of results");
///
/// assert!(limit.matches_long("limit"));
/// assert!(limit.matches_short('l'));
/// assert!(!limit.required);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgSpec {
    /// Field name; doubles as the long option form (`--name`).
    pub name: String,
    /// Where the value comes from.
    pub slot: ArgSlot,
    /// Type the raw token coerces to.
    pub value: ValueKind,
    /// Single-character short alias (`-x`), options only.
    pub short: Option<char>,
    /// Value used when no token is supplied.
    pub default: Option<ArgValue>,
    /// Description shown in help text.
    pub description: Option<String>,
    /// Whether an absent, non-defaulted field is a parse error. Booleans
    /// and rest fields are never required.
    pub required: bool,
}

impl ArgSpec {
    /// Creates a named option (`--name` / `-x`).
    ///
    /// Non-boolean options start out required; declare a default or call
    /// [`optional`](ArgSpec::optional) to relax that. Boolean options are
    /// never required — absence simply means `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use declarg_core::{ArgSpec, ValueKind};
    ///
    /// let verbose = ArgSpec::option("verbose", ValueKind::Bool).with_short('v');
    /// assert!(!verbose.required);
    ///
    /// let query = ArgSpec::option("query", ValueKind::Str);
    /// assert!(query.required);
    /// ```
    pub fn option(name: &str, value: ValueKind) -> Self {
        let required = value.takes_value();
        Self {
            name: name.to_string(),
            slot: ArgSlot::Option,
            value,
            short: None,
            default: None,
            description: None,
            required,
        }
    }

    /// Creates a fixed positional at the given zero-based index.
    ///
    /// # Examples
    ///
    /// ```
    /// use declarg_core::{ArgSpec, ArgSlot, ValueKind};
    ///
    /// let target = ArgSpec::positional("target", 0, ValueKind::Str);
    /// assert_eq!(target.slot, ArgSlot::Fixed(0));
    /// assert!(target.required);
    /// ```
    pub fn positional(name: &str, index: usize, value: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            slot: ArgSlot::Fixed(index),
            value,
            short: None,
            default: None,
            description: None,
            required: true,
        }
    }

    /// Creates a rest field collecting all leftover positionals.
    ///
    /// A rest field with no matching tokens parses to an empty list, never
    /// to a missing value.
    pub fn rest(name: &str, value: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            slot: ArgSlot::Rest,
            value,
            short: None,
            default: None,
            description: None,
            required: false,
        }
    }

    /// Adds a single-character short alias.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds a default value and marks the field optional.
    pub fn with_default(mut self, default: ArgValue) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Marks the field as optional without declaring a default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Whether this field fills from positional tokens.
    pub fn is_positional(&self) -> bool {
        matches!(self.slot, ArgSlot::Fixed(_) | ArgSlot::Rest)
    }

    /// Checks the long form against a bare option name (no dashes).
    pub fn matches_long(&self, name: &str) -> bool {
        self.slot == ArgSlot::Option && self.name == name
    }

    /// Checks the short alias against a single character.
    pub fn matches_short(&self, short: char) -> bool {
        self.slot == ArgSlot::Option && self.short == Some(short)
    }
}

/// Complete schema for one command.
///
/// This is the unit a parse call runs against: a named, described bundle of
/// [`ArgSpec`]s. Declared order is preserved and drives help rendering.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
///
/// let schema = CommandSchema::new("run")
///     .with_description("Run a script")
///     .with_arg(ArgSpec::positional("target", 0, ValueKind::Str))
///     .with_arg(ArgSpec::rest("args", ValueKind::Str))
///     .with_arg(ArgSpec::option("verbose", ValueKind::Bool).with_short('v'));
///
/// assert!(schema.find_long("verbose").is_some());
/// assert!(schema.find_short('v').is_some());
/// assert_eq!(schema.fixed_at(0).unwrap().name, "target");
/// assert_eq!(schema.rest_field().unwrap().name, "args");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Command name (e.g., "search").
    pub name: String,
    /// One-line description shown in help text.
    pub description: Option<String>,
    /// Argument fields, in declared order.
    pub args: Vec<ArgSpec>,
}

impl CommandSchema {
    /// Creates an empty schema with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds an argument field.
    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Finds an option field by long name.
    pub fn find_long(&self, name: &str) -> Option<&ArgSpec> {
        self.args.iter().find(|a| a.matches_long(name))
    }

    /// Finds an option field by short alias.
    pub fn find_short(&self, short: char) -> Option<&ArgSpec> {
        self.args.iter().find(|a| a.matches_short(short))
    }

    /// Finds the fixed positional declared at `index`.
    pub fn fixed_at(&self, index: usize) -> Option<&ArgSpec> {
        self.args.iter().find(|a| a.slot == ArgSlot::Fixed(index))
    }

    /// Finds the rest field, if one is declared.
    pub fn rest_field(&self) -> Option<&ArgSpec> {
        self.args.iter().find(|a| a.slot == ArgSlot::Rest)
    }

    /// Number of fixed positional slots.
    pub fn fixed_count(&self) -> usize {
        self.args
            .iter()
            .filter(|a| matches!(a.slot, ArgSlot::Fixed(_)))
            .count()
    }

    /// Fixed positionals in index order, followed by the rest field.
    ///
    /// This is the order help text lists positional slots in.
    pub fn positionals(&self) -> Vec<&ArgSpec> {
        let mut fixed: Vec<&ArgSpec> = self
            .args
            .iter()
            .filter(|a| matches!(a.slot, ArgSlot::Fixed(_)))
            .collect();
        fixed.sort_by_key(|a| match a.slot {
            ArgSlot::Fixed(i) => i,
            _ => usize::MAX,
        });
        fixed.extend(self.rest_field());
        fixed
    }

    /// Option fields in declared order.
    pub fn options(&self) -> Vec<&ArgSpec> {
        self.args
            .iter()
            .filter(|a| a.slot == ArgSlot::Option)
            .collect()
    }
}
