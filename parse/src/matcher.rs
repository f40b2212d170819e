//! Single-pass token classification.
//!
//! Walks the argument vector once, left to right, sorting every token into
//! a raw-field map the coercion stage consumes: long options (`--name`),
//! single-character short options (`-x`), their value tokens, and
//! positionals tracked by a cursor that fills fixed slots in order and then
//! feeds the rest field. No coercion happens here; values stay raw strings.

use std::collections::HashMap;

use tracing::{debug, trace};

use declarg_core::{ArgSpec, CommandSchema};

use crate::outcome::ParseIssue;

/// Raw tokens gathered for one field before coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawField {
    /// A boolean option was present.
    Flag,
    /// Value tokens, in scan order. Fixed positionals and scalar options
    /// may accumulate several when repeated; rest fields usually do.
    Values(Vec<String>),
}

/// Output of one matcher pass over an argument vector.
#[derive(Debug, Default)]
pub(crate) struct RawMatch {
    /// Field name → raw tokens. Fields never mentioned are absent.
    pub fields: HashMap<String, RawField>,
    /// Unknown-option issues, in scan order.
    pub issues: Vec<ParseIssue>,
    /// A `--help`/`-h` token was seen; the scan stopped there.
    pub help: bool,
}

impl RawMatch {
    fn push_value(&mut self, field: &str, value: &str) {
        match self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| RawField::Values(Vec::new()))
        {
            RawField::Values(values) => values.push(value.to_string()),
            RawField::Flag => {}
        }
    }
}

/// Classifies every token in `tokens` against `schema`.
///
/// A `--help`/`-h` token short-circuits the scan with `help` set; every
/// other path runs to the end of the vector so unknown-option issues
/// accumulate rather than failing fast.
pub(crate) fn match_tokens(schema: &CommandSchema, tokens: &[&str]) -> RawMatch {
    let mut out = RawMatch::default();
    let mut positional = 0usize;
    let mut i = 0usize;

    while i < tokens.len() {
        let token = tokens[i];

        if token == "--help" || token == "-h" {
            out.help = true;
            return out;
        }

        if let Some(name) = token.strip_prefix("--") {
            i += consume_option(schema.find_long(name), token, tokens, i, &mut out);
            continue;
        }

        if let Some(short) = single_short(token) {
            i += consume_option(schema.find_short(short), token, tokens, i, &mut out);
            continue;
        }

        if let Some(spec) = schema.fixed_at(positional) {
            trace!(token, field = %spec.name, "positional token fills fixed slot");
            out.push_value(&spec.name, token);
        } else if let Some(rest) = schema.rest_field() {
            out.push_value(&rest.name, token);
        } else {
            // Excess positionals are ignored, keeping thin wrappers that
            // prepend their own tokens backward compatible.
            debug!(token, "ignoring excess positional token");
        }
        positional += 1;
        i += 1;
    }

    out
}

/// Handles a long or short option token, returning how many tokens were
/// consumed (the option itself, plus its value when one is taken).
fn consume_option(
    spec: Option<&ArgSpec>,
    token: &str,
    tokens: &[&str],
    i: usize,
    out: &mut RawMatch,
) -> usize {
    let Some(spec) = spec else {
        out.issues.push(ParseIssue::UnknownOption(token.to_string()));
        return 1;
    };

    if !spec.value.takes_value() {
        out.fields.insert(spec.name.clone(), RawField::Flag);
        return 1;
    }

    match tokens.get(i + 1) {
        Some(value) => {
            out.push_value(&spec.name, value);
            2
        }
        // Trailing option with no value token: the field stays absent and
        // the coercion stage applies its default or flags it missing.
        None => 1,
    }
}

/// Returns the alias character if the token has the exact shape `-x`.
///
/// Anything else starting with `-` (`-abc`, a bare `-`) is not
/// option-shaped and falls through to positional handling.
fn single_short(token: &str) -> Option<char> {
    let rest = token.strip_prefix('-')?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use declarg_core::{ArgSpec, ValueKind};

    use super::*;

    fn run_schema() -> CommandSchema {
        CommandSchema::new("run")
            .with_arg(ArgSpec::positional("command", 0, ValueKind::Str))
            .with_arg(ArgSpec::positional("target", 1, ValueKind::Str))
            .with_arg(ArgSpec::rest("args", ValueKind::Str))
            .with_arg(ArgSpec::option("verbose", ValueKind::Bool).with_short('v'))
            .with_arg(ArgSpec::option("limit", ValueKind::Int).with_short('l'))
    }

    fn values(raw: &RawMatch, field: &str) -> Vec<String> {
        match raw.fields.get(field) {
            Some(RawField::Values(v)) => v.clone(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_fixed_slots_fill_in_order_then_rest_collects() {
        let schema = run_schema();
        let raw = match_tokens(
            &schema,
            &["run", "script.js", "arg1", "arg2", "arg3", "--verbose"],
        );

        assert_eq!(values(&raw, "command"), vec!["run"]);
        assert_eq!(values(&raw, "target"), vec!["script.js"]);
        assert_eq!(values(&raw, "args"), vec!["arg1", "arg2", "arg3"]);
        assert_eq!(raw.fields.get("verbose"), Some(&RawField::Flag));
        assert!(raw.issues.is_empty());
    }

    #[test]
    fn test_boolean_option_consumes_no_value() {
        let schema = run_schema();
        let raw = match_tokens(&schema, &["--verbose", "run", "script.js"]);

        assert_eq!(raw.fields.get("verbose"), Some(&RawField::Flag));
        assert_eq!(values(&raw, "command"), vec!["run"]);
        assert_eq!(values(&raw, "target"), vec!["script.js"]);
    }

    #[test]
    fn test_short_alias_resolves_to_same_field() {
        let schema = run_schema();
        let long = match_tokens(&schema, &["--limit", "5"]);
        let short = match_tokens(&schema, &["-l", "5"]);

        assert_eq!(values(&long, "limit"), values(&short, "limit"));
    }

    #[test]
    fn test_unknown_options_accumulate() {
        let schema = run_schema();
        let raw = match_tokens(&schema, &["--bogus", "-x", "run"]);

        assert_eq!(
            raw.issues,
            vec![
                ParseIssue::UnknownOption("--bogus".into()),
                ParseIssue::UnknownOption("-x".into()),
            ]
        );
        assert_eq!(values(&raw, "command"), vec!["run"]);
    }

    #[test]
    fn test_help_token_short_circuits() {
        let schema = run_schema();
        let raw = match_tokens(&schema, &["run", "-h", "--bogus"]);

        assert!(raw.help);
        assert!(raw.issues.is_empty());
    }

    #[test]
    fn test_excess_positionals_ignored_without_rest_field() {
        let schema = CommandSchema::new("one")
            .with_arg(ArgSpec::positional("only", 0, ValueKind::Str));
        let raw = match_tokens(&schema, &["first", "second", "third"]);

        assert_eq!(values(&raw, "only"), vec!["first"]);
        assert!(raw.issues.is_empty());
    }

    #[test]
    fn test_multi_char_dash_token_is_positional() {
        let schema = CommandSchema::new("one")
            .with_arg(ArgSpec::positional("only", 0, ValueKind::Str));
        let raw = match_tokens(&schema, &["-abc"]);

        assert_eq!(values(&raw, "only"), vec!["-abc"]);
        assert!(raw.issues.is_empty());
    }

    #[test]
    fn test_trailing_option_without_value_leaves_field_absent() {
        let schema = run_schema();
        let raw = match_tokens(&schema, &["--limit"]);

        assert!(!raw.fields.contains_key("limit"));
        assert!(raw.issues.is_empty());
    }
}
