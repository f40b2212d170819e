//! Schema-authoring validation.
//!
//! The parse engine assumes its schema is well formed; these checks catch
//! authoring mistakes — duplicate aliases, positional index gaps, defaults of
//! the wrong type — before the schema is ever handed to a parse call. Gaps in
//! fixed positional indexes are a schema-authoring error, never a runtime
//! condition.
//!
//! # Examples
//!
//! ```
//! use declarg_core::*;
//!
//! let schema = CommandSchema::new("search")
//!     .with_arg(ArgSpec::positional("query", 0, ValueKind::Str))
//!     .with_arg(ArgSpec::option("limit", ValueKind::Int).with_short('l'));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Fixed indexes must form 0..N-1 with no gaps
//! let gappy = CommandSchema::new("run")
//!     .with_arg(ArgSpec::positional("target", 1, ValueKind::Str));
//! assert!(!validate_schema(&gappy).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ArgSlot, CommandSchema, CommandSet, ValueKind};

/// Short alias reserved for the help control flag.
pub const HELP_SHORT: char = 'h';

/// Schema/set validation errors.
///
/// Each variant describes a specific structural problem found during
/// validation. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("schema command cannot be empty")]
    EmptyCommandName,
    /// An argument field has an empty name.
    #[error("argument name cannot be empty")]
    EmptyArgName,
    /// Two fields in the same schema share a name.
    #[error("duplicate argument field: {0}")]
    DuplicateField(String),
    /// Two option fields in the same schema share a short alias.
    #[error("duplicate short alias: -{0}")]
    DuplicateShort(char),
    /// A field declares `-h`, which is reserved for help.
    #[error("short alias -h is reserved for help (field: {0})")]
    ReservedShort(String),
    /// A positional field declares a short alias.
    #[error("positional field cannot have a short alias: {0}")]
    ShortOnPositional(String),
    /// More than one field declares the rest slot.
    #[error("schema declares more than one rest field: {0}")]
    MultipleRest(String),
    /// Two fields declare the same fixed positional index.
    #[error("duplicate fixed positional index: {0}")]
    DuplicateFixedIndex(usize),
    /// Fixed positional indexes do not form a contiguous `0..N-1` run.
    #[error("fixed positional indexes have a gap: expected {expected}, found {found}")]
    PositionalGap {
        /// Index the contiguous run requires next.
        expected: usize,
        /// Index actually declared.
        found: usize,
    },
    /// A positional field declares the `Bool` value kind.
    #[error("positional field cannot be boolean: {0}")]
    BoolPositional(String),
    /// A declared default's variant disagrees with the field's value kind.
    #[error("default value does not match declared kind for field: {0}")]
    DefaultTypeMismatch(String),
    /// A choice field's default is not a member of the declared set.
    #[error("default for field {field} is not an allowed choice: {value}")]
    DefaultNotInChoices {
        /// Field declaring the default.
        field: String,
        /// The out-of-set default value.
        value: String,
    },
    /// Two commands in the same set share a name.
    #[error("duplicate command in set: {0}")]
    DuplicateCommand(String),
    /// The configured default command names no member of the set.
    #[error("default command is not a member of the set: {0}")]
    UnknownDefaultCommand(String),
}

/// Validates a command set.
///
/// Checks for duplicate command names and default-command membership, and
/// validates each member schema.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
///
/// let set = CommandSet::new("tool")
///     .with_command(CommandSchema::new("search"))
///     .with_default_command("search");
/// assert!(validate_set(&set).is_empty());
///
/// let bad = CommandSet::new("tool")
///     .with_command(CommandSchema::new("search"))
///     .with_default_command("missing");
/// let errors = validate_set(&bad);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownDefaultCommand(_))));
/// ```
pub fn validate_set(set: &CommandSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for command in &set.commands {
        if !seen.insert(command.name.as_str()) {
            errors.push(ValidationError::DuplicateCommand(command.name.clone()));
        }
        errors.extend(validate_schema(command));
    }

    if let Some(default) = set.default_command.as_deref() {
        if set.find_command(default).is_none() {
            errors.push(ValidationError::UnknownDefaultCommand(default.to_string()));
        }
    }

    errors
}

/// Validates a command schema.
///
/// Returns every problem found rather than stopping at the first, so a
/// schema author sees the full list in one pass.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
///
/// let schema = CommandSchema::new("run")
///     .with_arg(ArgSpec::option("verbose", ValueKind::Bool).with_short('v'))
///     .with_arg(ArgSpec::option("quiet", ValueKind::Bool).with_short('v'));
///
/// let errors = validate_schema(&schema);
/// assert_eq!(errors, vec![ValidationError::DuplicateShort('v')]);
/// ```
pub fn validate_schema(schema: &CommandSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if schema.name.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandName);
    }

    let mut seen_fields: HashSet<&str> = HashSet::new();
    let mut seen_shorts: HashSet<char> = HashSet::new();
    let mut rest_seen = false;
    let mut fixed_indexes: Vec<usize> = Vec::new();

    for arg in &schema.args {
        if arg.name.trim().is_empty() {
            errors.push(ValidationError::EmptyArgName);
            continue;
        }
        if !seen_fields.insert(arg.name.as_str()) {
            errors.push(ValidationError::DuplicateField(arg.name.clone()));
        }

        if let Some(short) = arg.short {
            if arg.is_positional() {
                errors.push(ValidationError::ShortOnPositional(arg.name.clone()));
            } else if short == HELP_SHORT {
                errors.push(ValidationError::ReservedShort(arg.name.clone()));
            } else if !seen_shorts.insert(short) {
                errors.push(ValidationError::DuplicateShort(short));
            }
        }

        match arg.slot {
            ArgSlot::Fixed(index) => {
                if fixed_indexes.contains(&index) {
                    errors.push(ValidationError::DuplicateFixedIndex(index));
                } else {
                    fixed_indexes.push(index);
                }
            }
            ArgSlot::Rest => {
                if rest_seen {
                    errors.push(ValidationError::MultipleRest(arg.name.clone()));
                }
                rest_seen = true;
            }
            ArgSlot::Option => {}
        }

        if arg.is_positional() && arg.value == ValueKind::Bool {
            errors.push(ValidationError::BoolPositional(arg.name.clone()));
        }

        if let Some(default) = &arg.default {
            if !default.matches_kind(&arg.value) {
                errors.push(ValidationError::DefaultTypeMismatch(arg.name.clone()));
            } else if let (ValueKind::Choice(choices), Some(value)) = (&arg.value, default.as_str())
            {
                if !choices.iter().any(|c| c == value) {
                    errors.push(ValidationError::DefaultNotInChoices {
                        field: arg.name.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }
    }

    fixed_indexes.sort_unstable();
    for (expected, found) in fixed_indexes.iter().copied().enumerate() {
        if found != expected {
            errors.push(ValidationError::PositionalGap { expected, found });
            break;
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::{ArgSpec, ArgValue};

    use super::*;

    #[test]
    fn test_validate_schema_accepts_valid_schema() {
        let schema = CommandSchema::new("run")
            .with_arg(ArgSpec::positional("target", 0, ValueKind::Str))
            .with_arg(ArgSpec::rest("args", ValueKind::Str))
            .with_arg(ArgSpec::option("verbose", ValueKind::Bool).with_short('v'));

        assert!(validate_schema(&schema).is_empty());
    }

    #[test]
    fn test_validate_schema_rejects_positional_gap() {
        let schema = CommandSchema::new("run")
            .with_arg(ArgSpec::positional("first", 0, ValueKind::Str))
            .with_arg(ArgSpec::positional("third", 2, ValueKind::Str));

        let errors = validate_schema(&schema);
        assert_eq!(
            errors,
            vec![ValidationError::PositionalGap {
                expected: 1,
                found: 2
            }]
        );
    }

    #[test]
    fn test_validate_schema_rejects_second_rest_field() {
        let schema = CommandSchema::new("run")
            .with_arg(ArgSpec::rest("args", ValueKind::Str))
            .with_arg(ArgSpec::rest("extra", ValueKind::Str));

        let errors = validate_schema(&schema);
        assert_eq!(errors, vec![ValidationError::MultipleRest("extra".into())]);
    }

    #[test]
    fn test_validate_schema_rejects_reserved_help_short() {
        let schema = CommandSchema::new("run")
            .with_arg(ArgSpec::option("host", ValueKind::Str).with_short('h'));

        let errors = validate_schema(&schema);
        assert_eq!(errors, vec![ValidationError::ReservedShort("host".into())]);
    }

    #[test]
    fn test_validate_schema_rejects_mismatched_default() {
        let schema = CommandSchema::new("run")
            .with_arg(ArgSpec::option("limit", ValueKind::Int).with_default(ArgValue::Str("x".into())));

        let errors = validate_schema(&schema);
        assert_eq!(
            errors,
            vec![ValidationError::DefaultTypeMismatch("limit".into())]
        );
    }

    #[test]
    fn test_validate_schema_rejects_out_of_set_choice_default() {
        let schema = CommandSchema::new("run").with_arg(
            ArgSpec::option(
                "mode",
                ValueKind::Choice(vec!["fast".into(), "normal".into()]),
            )
            .with_default(ArgValue::Str("detailed".into())),
        );

        let errors = validate_schema(&schema);
        assert_eq!(
            errors,
            vec![ValidationError::DefaultNotInChoices {
                field: "mode".into(),
                value: "detailed".into()
            }]
        );
    }

    #[test]
    fn test_validate_set_collects_duplicates_and_bad_default() {
        let set = CommandSet::new("tool")
            .with_command(CommandSchema::new("search"))
            .with_command(CommandSchema::new("search"))
            .with_default_command("list");

        let errors = validate_set(&set);
        assert!(errors.contains(&ValidationError::DuplicateCommand("search".into())));
        assert!(errors.contains(&ValidationError::UnknownDefaultCommand("list".into())));
    }
}
