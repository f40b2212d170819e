//! Parse outcomes, typed results, and error aggregation.
//!
//! A parse call never panics and never throws its way out: every path ends
//! in one of three explicit outcomes — success, help requested, or a
//! validation failure carrying the full list of field problems plus rendered
//! help text. Help is ordinary data, not control flow.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use declarg_core::ArgValue;

/// A single field-level or resolution problem found during parsing.
///
/// Field-level issues (unknown options, missing values, coercion failures)
/// are collected across the whole argument vector so one invocation reports
/// every problem; resolution issues short-circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIssue {
    /// A `--x`/`-x` token matched no field in the schema.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// A required, non-defaulted field received no token.
    #[error("missing required value for --{field}")]
    MissingRequired {
        /// The field that received nothing.
        field: String,
    },
    /// A supplied token could not be coerced to the field's value kind.
    #[error("invalid value for --{field}: '{value}' (expected {expected})")]
    InvalidValue {
        /// The field being coerced.
        field: String,
        /// The offending raw token.
        value: String,
        /// Human-readable description of what was expected.
        expected: String,
    },
    /// The leading token matched no command and no default is configured.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Aggregated parse failure.
///
/// Holds every [`ParseIssue`] found in one pass. `Display` renders one
/// issue per line.
///
/// # Examples
///
/// ```
/// use declarg::{ParseError, ParseIssue};
///
/// let error = ParseError::new(vec![
///     ParseIssue::UnknownOption("--frobnicate".into()),
///     ParseIssue::MissingRequired { field: "query".into() },
/// ]);
/// assert_eq!(error.issues.len(), 2);
/// assert!(error.to_string().contains("--frobnicate"));
/// assert!(error.to_string().contains("query"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseError {
    /// Every problem found, in scan order.
    pub issues: Vec<ParseIssue>,
}

impl ParseError {
    /// Wraps a list of issues.
    pub fn new(issues: Vec<ParseIssue>) -> Self {
        Self { issues }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.issues.iter().map(ParseIssue::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for ParseError {}

/// Typed record produced by a successful parse.
///
/// Field name → coerced [`ArgValue`], with defaults filled in. Declared
/// rest fields are always present (possibly as an empty list); optional
/// fields with no default and no token are simply absent.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
/// use declarg::{ParseOutcome, parse_args};
///
/// let schema = CommandSchema::new("search")
///     .with_arg(ArgSpec::positional("query", 0, ValueKind::Str))
///     .with_arg(ArgSpec::option("limit", ValueKind::Int).with_default(ArgValue::Int(10)));
///
/// let ParseOutcome::Success(args) = parse_args(&schema, &["rust"]) else {
///     panic!("expected success");
/// };
/// assert_eq!(args.get_str("query"), Some("rust"));
/// assert_eq!(args.get_i64("limit"), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ParsedArgs {
    values: BTreeMap<String, ArgValue>,
}

impl ParsedArgs {
    pub(crate) fn insert(&mut self, field: &str, value: ArgValue) {
        self.values.insert(field.to_string(), value);
    }

    /// Returns the raw coerced value for a field.
    pub fn get(&self, field: &str) -> Option<&ArgValue> {
        self.values.get(field)
    }

    /// Returns a string field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(ArgValue::as_str)
    }

    /// Returns an integer field.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(ArgValue::as_i64)
    }

    /// Returns a float field.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(ArgValue::as_f64)
    }

    /// Returns a boolean field, treating an absent field as `false`.
    pub fn get_bool(&self, field: &str) -> bool {
        self.get(field)
            .and_then(ArgValue::as_bool)
            .unwrap_or(false)
    }

    /// Returns a rest/list field.
    pub fn get_list(&self, field: &str) -> Option<&[ArgValue]> {
        self.get(field).and_then(ArgValue::as_list)
    }

    /// Whether any value is present for the field.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field resolved at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the record, yielding the underlying map.
    pub fn into_values(self) -> BTreeMap<String, ArgValue> {
        self.values
    }
}

/// Outcome of parsing one argument vector against one schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// All fields resolved; defaults filled.
    Success(ParsedArgs),
    /// A help flag was seen; the caller should display the text and stop.
    HelpRequested(String),
    /// One or more fields failed, with rendered help for the schema.
    Invalid {
        /// Every field problem found in this pass.
        error: ParseError,
        /// Usage text for the governing schema.
        help: String,
    },
}

impl ParseOutcome {
    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }
}

/// Outcome of parsing against a [`CommandSet`](declarg_core::CommandSet),
/// additionally identifying which command governed the parse.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedOutcome {
    /// The resolved command and its typed record.
    Success {
        /// Name of the command schema that governed the parse.
        command: String,
        /// The typed record.
        args: ParsedArgs,
    },
    /// Help was requested, at either the set or the subcommand level.
    HelpRequested(String),
    /// Resolution or field-level failure, with the relevant help text.
    Invalid {
        /// The aggregated problems.
        error: ParseError,
        /// Set-level or subcommand-level usage text.
        help: String,
    },
}

/// Signal raised by the strict entry points instead of returning an outcome
/// enum.
///
/// Callers translate this at the process boundary: print the text, then
/// exit `0` for `HelpRequested` or non-zero for `Invalid`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseSignal {
    /// Help was requested; the payload is the rendered text.
    #[error("help requested")]
    HelpRequested(String),
    /// Parsing failed; the payload carries the problems and usage text.
    #[error("{error}")]
    Invalid {
        /// The aggregated problems.
        error: ParseError,
        /// Usage text for the governing schema or set.
        help: String,
    },
}
