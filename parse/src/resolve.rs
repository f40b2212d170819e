//! Nested command resolution.
//!
//! Decides which member schema of a [`CommandSet`] governs an argument
//! vector, then delegates to the single-command path. Resolution rules, in
//! priority order:
//!
//! 1. Empty argv, or a leading `--help`/`-h`, yields set-level help. This
//!    outranks the default command so help is never swallowed as a
//!    positional argument.
//! 2. A leading token naming a member command resolves to it; the rest of
//!    the vector is parsed against that schema.
//! 3. Otherwise the configured default command, if any, parses the *whole*
//!    vector — no token is dropped.
//! 4. Otherwise the leading token is an unknown command.

use tracing::debug;

use declarg_core::{CommandSchema, CommandSet};

use crate::help;
use crate::outcome::{NestedOutcome, ParseError, ParseIssue, ParseOutcome};
use crate::parse_tokens;

/// Resolves `tokens` against the set and parses under the chosen schema.
pub(crate) fn resolve_and_parse(set: &CommandSet, tokens: &[&str]) -> NestedOutcome {
    let Some(&first) = tokens.first() else {
        return NestedOutcome::HelpRequested(help::render_set(set));
    };

    if first == "--help" || first == "-h" {
        return NestedOutcome::HelpRequested(help::render_set(set));
    }

    if let Some(schema) = set.find_command(first) {
        debug!(command = %schema.name, "resolved command by name");
        return lift(schema, parse_tokens(schema, &tokens[1..]));
    }

    if let Some(schema) = set.default_schema() {
        debug!(command = %schema.name, "resolved via default command");
        return lift(schema, parse_tokens(schema, tokens));
    }

    NestedOutcome::Invalid {
        error: ParseError::new(vec![ParseIssue::UnknownCommand(first.to_string())]),
        help: help::render_set(set),
    }
}

/// Attaches the governing command name to a single-command outcome.
fn lift(schema: &CommandSchema, outcome: ParseOutcome) -> NestedOutcome {
    match outcome {
        ParseOutcome::Success(args) => NestedOutcome::Success {
            command: schema.name.clone(),
            args,
        },
        ParseOutcome::HelpRequested(text) => NestedOutcome::HelpRequested(text),
        ParseOutcome::Invalid { error, help } => NestedOutcome::Invalid { error, help },
    }
}

#[cfg(test)]
mod tests {
    use declarg_core::{ArgSpec, ArgValue, ValueKind};

    use super::*;

    fn article_set() -> CommandSet {
        CommandSet::new("articles")
            .with_command(
                CommandSchema::new("search")
                    .with_arg(ArgSpec::positional("query", 0, ValueKind::Str))
                    .with_arg(
                        ArgSpec::option("limit", ValueKind::Int)
                            .with_short('l')
                            .with_default(ArgValue::Int(10)),
                    ),
            )
            .with_command(CommandSchema::new("list"))
            .with_default_command("search")
    }

    #[test]
    fn test_empty_argv_yields_set_help() {
        let outcome = resolve_and_parse(&article_set(), &[]);
        assert!(matches!(outcome, NestedOutcome::HelpRequested(_)));
    }

    #[test]
    fn test_leading_help_flag_outranks_default_command() {
        let set = article_set();
        for argv in [&["--help"][..], &["-h"][..]] {
            let outcome = resolve_and_parse(&set, argv);
            let NestedOutcome::HelpRequested(text) = outcome else {
                panic!("expected help for {argv:?}");
            };
            assert!(text.contains("Commands:"));
        }
    }

    #[test]
    fn test_explicit_command_consumes_leading_token() {
        let outcome = resolve_and_parse(&article_set(), &["search", "rust", "-l", "5"]);

        let NestedOutcome::Success { command, args } = outcome else {
            panic!("expected success");
        };
        assert_eq!(command, "search");
        assert_eq!(args.get_str("query"), Some("rust"));
        assert_eq!(args.get_i64("limit"), Some(5));
    }

    #[test]
    fn test_default_command_parses_unshifted_argv() {
        let outcome = resolve_and_parse(&article_set(), &["keyword", "-l", "5"]);

        let NestedOutcome::Success { command, args } = outcome else {
            panic!("expected success");
        };
        assert_eq!(command, "search");
        assert_eq!(args.get_str("query"), Some("keyword"));
        assert_eq!(args.get_i64("limit"), Some(5));
    }

    #[test]
    fn test_subcommand_help_scoped_to_that_command() {
        let outcome = resolve_and_parse(&article_set(), &["search", "--help"]);

        let NestedOutcome::HelpRequested(text) = outcome else {
            panic!("expected help");
        };
        assert!(text.starts_with("Usage: search"));
    }

    #[test]
    fn test_unknown_command_without_default_is_invalid() {
        let set = CommandSet::new("tool").with_command(CommandSchema::new("list"));
        let outcome = resolve_and_parse(&set, &["frobnicate"]);

        let NestedOutcome::Invalid { error, help } = outcome else {
            panic!("expected invalid");
        };
        assert_eq!(
            error.issues,
            vec![ParseIssue::UnknownCommand("frobnicate".into())]
        );
        assert!(help.contains("Commands:"));
    }
}
