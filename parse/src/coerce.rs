//! Raw-token coercion and default filling.
//!
//! Takes the matcher's raw-field map and the schema, and produces the typed
//! record. Every field is checked even after the first failure, so one parse
//! call reports the complete set of problems.

use declarg_core::{ArgSlot, ArgValue, CommandSchema, ValueKind};

use crate::matcher::{RawField, RawMatch};
use crate::outcome::{ParseIssue, ParsedArgs};

/// Coerces every field in `schema` from the raw match.
///
/// Returns the (possibly partial) typed record together with all issues:
/// the matcher's unknown-option issues followed by missing-required and
/// coercion failures in schema declaration order.
pub(crate) fn coerce_fields(schema: &CommandSchema, raw: RawMatch) -> (ParsedArgs, Vec<ParseIssue>) {
    let RawMatch {
        mut fields,
        mut issues,
        ..
    } = raw;
    let mut args = ParsedArgs::default();

    for spec in &schema.args {
        let raw_field = fields.remove(&spec.name);

        if spec.slot == ArgSlot::Rest {
            let tokens = match raw_field {
                Some(RawField::Values(values)) => values,
                _ => Vec::new(),
            };
            match coerce_list(&spec.value, &tokens) {
                Ok(items) => args.insert(&spec.name, ArgValue::List(items)),
                Err(value) => issues.push(ParseIssue::InvalidValue {
                    field: spec.name.clone(),
                    value,
                    expected: spec.value.expected(),
                }),
            }
            continue;
        }

        match raw_field {
            Some(RawField::Flag) => args.insert(&spec.name, ArgValue::Bool(true)),
            Some(RawField::Values(values)) => {
                // Repeated scalar occurrences resolve last-wins.
                let token = values.last().map(String::as_str).unwrap_or_default();
                match coerce_scalar(&spec.value, token) {
                    Ok(value) => args.insert(&spec.name, value),
                    Err(()) => issues.push(ParseIssue::InvalidValue {
                        field: spec.name.clone(),
                        value: token.to_string(),
                        expected: spec.value.expected(),
                    }),
                }
            }
            None => {
                if let Some(default) = &spec.default {
                    args.insert(&spec.name, default.clone());
                } else if spec.value == ValueKind::Bool {
                    args.insert(&spec.name, ArgValue::Bool(false));
                } else if spec.required {
                    issues.push(ParseIssue::MissingRequired {
                        field: spec.name.clone(),
                    });
                }
            }
        }
    }

    (args, issues)
}

/// Coerces each collected token independently; the first offending element
/// fails the whole field and is reported by value.
fn coerce_list(kind: &ValueKind, tokens: &[String]) -> Result<Vec<ArgValue>, String> {
    let mut items = Vec::with_capacity(tokens.len());
    for token in tokens {
        match coerce_scalar(kind, token) {
            Ok(value) => items.push(value),
            Err(()) => return Err(token.clone()),
        }
    }
    Ok(items)
}

/// Coerces one raw token to the given value kind.
fn coerce_scalar(kind: &ValueKind, token: &str) -> Result<ArgValue, ()> {
    match kind {
        ValueKind::Str => Ok(ArgValue::Str(token.to_string())),
        ValueKind::Int => token.parse::<i64>().map(ArgValue::Int).map_err(|_| ()),
        ValueKind::Float => match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(ArgValue::Float(n)),
            _ => Err(()),
        },
        ValueKind::Choice(choices) => {
            if choices.iter().any(|c| c == token) {
                Ok(ArgValue::Str(token.to_string()))
            } else {
                Err(())
            }
        }
        ValueKind::Bool => match token {
            "true" => Ok(ArgValue::Bool(true)),
            "false" => Ok(ArgValue::Bool(false)),
            _ => Err(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use declarg_core::ArgSpec;

    use crate::matcher::match_tokens;

    use super::*;

    fn search_schema() -> CommandSchema {
        CommandSchema::new("search")
            .with_arg(ArgSpec::positional("query", 0, ValueKind::Str))
            .with_arg(
                ArgSpec::option("limit", ValueKind::Int)
                    .with_short('l')
                    .with_default(ArgValue::Int(10)),
            )
            .with_arg(
                ArgSpec::option(
                    "mode",
                    ValueKind::Choice(vec!["fast".into(), "normal".into(), "detailed".into()]),
                )
                .with_default(ArgValue::Str("normal".into())),
            )
            .with_arg(ArgSpec::option("verbose", ValueKind::Bool).with_short('v'))
    }

    fn coerce(schema: &CommandSchema, tokens: &[&str]) -> (ParsedArgs, Vec<ParseIssue>) {
        coerce_fields(schema, match_tokens(schema, tokens))
    }

    #[test]
    fn test_defaults_fill_absent_fields() {
        let schema = search_schema();
        let (args, issues) = coerce(&schema, &["rust"]);

        assert!(issues.is_empty());
        assert_eq!(args.get_str("query"), Some("rust"));
        assert_eq!(args.get_i64("limit"), Some(10));
        assert_eq!(args.get_str("mode"), Some("normal"));
        assert!(!args.get_bool("verbose"));
    }

    #[test]
    fn test_missing_required_and_bad_value_both_reported() {
        let schema = search_schema();
        let (_, issues) = coerce(&schema, &["--limit", "abc"]);

        assert_eq!(issues.len(), 2);
        assert!(matches!(
            &issues[0],
            ParseIssue::MissingRequired { field } if field == "query"
        ));
        assert!(matches!(
            &issues[1],
            ParseIssue::InvalidValue { field, value, .. }
                if field == "limit" && value == "abc"
        ));
    }

    #[test]
    fn test_choice_rejection_names_field_and_value() {
        let schema = search_schema();
        let (_, issues) = coerce(&schema, &["rust", "--mode", "turbo"]);

        assert_eq!(issues.len(), 1);
        let ParseIssue::InvalidValue {
            field,
            value,
            expected,
        } = &issues[0]
        else {
            panic!("expected InvalidValue, got {:?}", issues[0]);
        };
        assert_eq!(field, "mode");
        assert_eq!(value, "turbo");
        assert!(expected.contains("fast"));
    }

    #[test]
    fn test_rest_field_with_no_tokens_is_empty_list() {
        let schema = CommandSchema::new("run")
            .with_arg(ArgSpec::positional("target", 0, ValueKind::Str))
            .with_arg(ArgSpec::rest("args", ValueKind::Str));
        let (args, issues) = coerce(&schema, &["script.js"]);

        assert!(issues.is_empty());
        assert_eq!(args.get_list("args"), Some(&[][..]));
    }

    #[test]
    fn test_rest_elements_coerced_with_first_offender_reported() {
        let schema = CommandSchema::new("sum").with_arg(ArgSpec::rest("values", ValueKind::Int));
        let (_, issues) = coerce(&schema, &["1", "two", "3"]);

        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            ParseIssue::InvalidValue { field, value, .. }
                if field == "values" && value == "two"
        ));
    }

    #[test]
    fn test_repeated_scalar_option_resolves_last_wins() {
        let schema = search_schema();
        let (args, issues) = coerce(&schema, &["rust", "-l", "3", "--limit", "7"]);

        assert!(issues.is_empty());
        assert_eq!(args.get_i64("limit"), Some(7));
    }

    #[test]
    fn test_float_rejects_non_finite() {
        let schema =
            CommandSchema::new("calc").with_arg(ArgSpec::option("ratio", ValueKind::Float));
        let (_, issues) = coerce(&schema, &["--ratio", "NaN"]);

        assert_eq!(issues.len(), 1);
        let (args, issues) = coerce(&schema, &["--ratio", "2.5"]);
        assert!(issues.is_empty());
        assert_eq!(args.get_f64("ratio"), Some(2.5));
    }

    #[test]
    fn test_optional_field_without_default_stays_absent() {
        let schema = CommandSchema::new("get")
            .with_arg(ArgSpec::option("filter", ValueKind::Str).optional());
        let (args, issues) = coerce(&schema, &[]);

        assert!(issues.is_empty());
        assert!(!args.contains("filter"));
    }
}
