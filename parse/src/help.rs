//! Usage-text rendering.
//!
//! Pure functions from a schema (or a whole command set) to a line-oriented
//! usage block. Output is fully determined by the schema: declared field
//! order drives the listing, with no locale or environment dependence.

use declarg_core::{ArgSlot, ArgSpec, CommandSchema, CommandSet};

/// Renders usage text for one command schema.
///
/// The block contains a usage line (positionals in declared order, the rest
/// slot marked variadic), the description, an `Arguments:` section for
/// positionals, and an `Options:` section showing long form, short alias,
/// description, and default.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
/// use declarg::render_command;
///
/// let schema = CommandSchema::new("run")
///     .with_description("Run a script")
///     .with_arg(ArgSpec::positional("target", 0, ValueKind::Str))
///     .with_arg(ArgSpec::rest("args", ValueKind::Str))
///     .with_arg(ArgSpec::option("verbose", ValueKind::Bool).with_short('v'));
///
/// let help = render_command(&schema);
/// assert!(help.starts_with("Usage: run <target> [args...]"));
/// assert!(help.contains("--verbose, -v"));
/// ```
pub fn render_command(schema: &CommandSchema) -> String {
    let mut out = String::new();

    out.push_str(&format!("Usage: {}", schema.name));
    for spec in schema.positionals() {
        out.push(' ');
        out.push_str(&positional_form(spec));
    }
    if !schema.options().is_empty() {
        out.push_str(" [options]");
    }
    out.push('\n');

    if let Some(desc) = &schema.description {
        out.push('\n');
        out.push_str(desc);
        out.push('\n');
    }

    let positionals = schema.positionals();
    if !positionals.is_empty() {
        out.push_str("\nArguments:\n");
        let forms: Vec<String> = positionals.iter().map(|s| positional_form(s)).collect();
        let width = column_width(&forms);
        for (spec, form) in positionals.iter().zip(&forms) {
            out.push_str(&entry_line(form, width, spec));
        }
    }

    let mut option_lines: Vec<(String, Option<&ArgSpec>)> = schema
        .options()
        .into_iter()
        .map(|spec| (option_form(spec), Some(spec)))
        .collect();
    option_lines.push(("--help, -h".to_string(), None));

    out.push_str("\nOptions:\n");
    let forms: Vec<String> = option_lines.iter().map(|(f, _)| f.clone()).collect();
    let width = column_width(&forms);
    for (form, spec) in &option_lines {
        match spec {
            Some(spec) => out.push_str(&entry_line(form, width, spec)),
            None => out.push_str(&format!("  {form:width$}  Show this help\n")),
        }
    }

    out
}

/// Renders top-level usage text for a command set.
///
/// Lists every member command with its description; the configured default
/// command is marked.
///
/// # Examples
///
/// ```
/// use declarg_core::*;
/// use declarg::render_set;
///
/// let set = CommandSet::new("articles")
///     .with_description("Article management tool")
///     .with_command(CommandSchema::new("search").with_description("Search for articles"))
///     .with_command(CommandSchema::new("list"))
///     .with_default_command("search");
///
/// let help = render_set(&set);
/// assert!(help.starts_with("Usage: articles <command>"));
/// assert!(help.contains("(default)"));
/// ```
pub fn render_set(set: &CommandSet) -> String {
    let mut out = String::new();

    out.push_str(&format!("Usage: {} <command> [options]\n", set.name));

    if let Some(desc) = &set.description {
        out.push('\n');
        out.push_str(desc);
        out.push('\n');
    }

    out.push_str("\nCommands:\n");
    let names: Vec<String> = set.commands.iter().map(|c| c.name.clone()).collect();
    let width = column_width(&names);
    for command in &set.commands {
        let mut line = format!("  {:width$}", command.name);
        let is_default = set.default_command.as_deref() == Some(command.name.as_str());
        if command.description.is_some() || is_default {
            line.push_str("  ");
            if let Some(desc) = &command.description {
                line.push_str(desc);
            }
            if is_default {
                if command.description.is_some() {
                    line.push(' ');
                }
                line.push_str("(default)");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "\nRun '{} <command> --help' for command details.\n",
        set.name
    ));

    out
}

fn positional_form(spec: &ArgSpec) -> String {
    match spec.slot {
        ArgSlot::Rest => format!("[{}...]", spec.name),
        _ if spec.required => format!("<{}>", spec.name),
        _ => format!("[{}]", spec.name),
    }
}

fn option_form(spec: &ArgSpec) -> String {
    match spec.short {
        Some(short) => format!("--{}, -{}", spec.name, short),
        None => format!("--{}", spec.name),
    }
}

fn column_width(forms: &[String]) -> usize {
    forms.iter().map(String::len).max().unwrap_or(0)
}

fn entry_line(form: &str, width: usize, spec: &ArgSpec) -> String {
    let mut line = format!("  {form:width$}");
    let mut annotations = Vec::new();
    if let Some(desc) = &spec.description {
        annotations.push(desc.clone());
    }
    if let Some(default) = &spec.default {
        annotations.push(format!("[default: {default}]"));
    }
    if !annotations.is_empty() {
        line.push_str("  ");
        line.push_str(&annotations.join(" "));
    }
    let mut line = line.trim_end().to_string();
    line.push('\n');
    line
}
