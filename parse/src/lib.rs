//! Declarative, schema-driven argv parsing.
//!
//! This crate turns an argument vector and a
//! [`CommandSchema`](declarg_core::CommandSchema) into a typed
//! [`ParsedArgs`] record in one pure, synchronous pass:
//!
//! - [`parse_args`] / [`parse_args_strict`] — the single-command path.
//! - [`parse_set`] / [`parse_set_strict`] — nested-subcommand dispatch over
//!   a [`CommandSet`](declarg_core::CommandSet), with optional
//!   default-command inference.
//! - [`render_command`] / [`render_set`] — usage text derived from the
//!   schema, also attached to every validation failure.
//!
//! Parsing never fails fast on field problems: one call reports every
//! unknown option, missing value, and coercion failure together. Help is an
//! explicit [`ParseOutcome::HelpRequested`] variant, never an error or an
//! unwind.
//!
//! A parse call allocates only call-scoped state and never mutates the
//! schema, so one schema instance can serve concurrent callers.
//!
//! # Example
//!
//! ```
//! use declarg_core::*;
//! use declarg::{NestedOutcome, parse_set};
//!
//! let set = CommandSet::new("articles")
//!     .with_command(
//!         CommandSchema::new("search")
//!             .with_arg(ArgSpec::positional("query", 0, ValueKind::Str))
//!             .with_arg(
//!                 ArgSpec::option("limit", ValueKind::Int)
//!                     .with_short('l')
//!                     .with_default(ArgValue::Int(10)),
//!             ),
//!     )
//!     .with_command(CommandSchema::new("list"))
//!     .with_default_command("search");
//!
//! // No leading command name: the default command parses the whole vector.
//! let NestedOutcome::Success { command, args } = parse_set(&set, &["rust", "-l", "5"]) else {
//!     panic!("expected success");
//! };
//! assert_eq!(command, "search");
//! assert_eq!(args.get_str("query"), Some("rust"));
//! assert_eq!(args.get_i64("limit"), Some(5));
//! ```

mod coerce;
mod help;
mod matcher;
mod outcome;
mod resolve;

pub use help::{render_command, render_set};
pub use outcome::{
    NestedOutcome, ParseError, ParseIssue, ParseOutcome, ParseSignal, ParsedArgs,
};

use declarg_core::{CommandSchema, CommandSet};

/// Parses an argument vector against a single command schema.
///
/// The "safe" entry point: every path comes back as a [`ParseOutcome`]
/// variant for the caller to branch on.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
/// use declarg::{ParseOutcome, parse_args};
///
/// let schema = CommandSchema::new("run")
///     .with_arg(ArgSpec::positional("target", 0, ValueKind::Str))
///     .with_arg(ArgSpec::option("verbose", ValueKind::Bool).with_short('v'));
///
/// let ParseOutcome::Success(args) = parse_args(&schema, &["script.js", "-v"]) else {
///     panic!("expected success");
/// };
/// assert_eq!(args.get_str("target"), Some("script.js"));
/// assert!(args.get_bool("verbose"));
/// ```
pub fn parse_args<S: AsRef<str>>(schema: &CommandSchema, argv: &[S]) -> ParseOutcome {
    let tokens: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
    parse_tokens(schema, &tokens)
}

/// Parses against a single schema, unwrapping success.
///
/// The "strict" entry point: returns the typed record directly, or a
/// [`ParseSignal`] the binary caller maps to an exit code (print help and
/// exit `0`, or print the error plus help and exit non-zero).
///
/// # Errors
///
/// [`ParseSignal::HelpRequested`] when a help flag was seen,
/// [`ParseSignal::Invalid`] when any field failed.
pub fn parse_args_strict<S: AsRef<str>>(
    schema: &CommandSchema,
    argv: &[S],
) -> Result<ParsedArgs, ParseSignal> {
    match parse_args(schema, argv) {
        ParseOutcome::Success(args) => Ok(args),
        ParseOutcome::HelpRequested(text) => Err(ParseSignal::HelpRequested(text)),
        ParseOutcome::Invalid { error, help } => Err(ParseSignal::Invalid { error, help }),
    }
}

/// Parses an argument vector against a command set.
///
/// Resolves the governing command first (explicit name, then default
/// command), then runs the single-command path; see [`NestedOutcome`] for
/// the shapes this produces. An empty vector or a leading `--help`/`-h`
/// yields set-level help without resolving a command.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
/// use declarg::{NestedOutcome, parse_set};
///
/// let set = CommandSet::new("tool")
///     .with_command(CommandSchema::new("list"));
///
/// assert!(matches!(parse_set(&set, &["--help"]), NestedOutcome::HelpRequested(_)));
/// let empty: &[&str] = &[];
/// assert!(matches!(parse_set(&set, empty), NestedOutcome::HelpRequested(_)));
/// ```
pub fn parse_set<S: AsRef<str>>(set: &CommandSet, argv: &[S]) -> NestedOutcome {
    let tokens: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
    resolve::resolve_and_parse(set, &tokens)
}

/// Parses against a command set, unwrapping success to the resolved command
/// name and its typed record.
///
/// # Errors
///
/// [`ParseSignal::HelpRequested`] when help was requested at either level,
/// [`ParseSignal::Invalid`] on resolution or field failures.
pub fn parse_set_strict<S: AsRef<str>>(
    set: &CommandSet,
    argv: &[S],
) -> Result<(String, ParsedArgs), ParseSignal> {
    match parse_set(set, argv) {
        NestedOutcome::Success { command, args } => Ok((command, args)),
        NestedOutcome::HelpRequested(text) => Err(ParseSignal::HelpRequested(text)),
        NestedOutcome::Invalid { error, help } => Err(ParseSignal::Invalid { error, help }),
    }
}

/// Single-command path over pre-collected tokens: match, coerce, then
/// assemble the outcome with help text attached to any failure.
pub(crate) fn parse_tokens(schema: &CommandSchema, tokens: &[&str]) -> ParseOutcome {
    let raw = matcher::match_tokens(schema, tokens);
    if raw.help {
        return ParseOutcome::HelpRequested(help::render_command(schema));
    }

    let (args, issues) = coerce::coerce_fields(schema, raw);
    if issues.is_empty() {
        ParseOutcome::Success(args)
    } else {
        ParseOutcome::Invalid {
            error: ParseError::new(issues),
            help: help::render_command(schema),
        }
    }
}
