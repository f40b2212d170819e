//! Core schema types for declarative argv parsing.
//!
//! This crate defines the foundational types the parse engine consumes:
//!
//! - [`ArgSpec`] — one argument field: slot ([`ArgSlot`]), value kind
//!   ([`ValueKind`]), short alias, default, description.
//! - [`CommandSchema`] — a named, described bundle of argument fields.
//! - [`CommandSet`] — command schemas keyed by name with an optional
//!   default command, for nested-subcommand dispatch.
//! - [`ArgValue`] — the coerced value representation parsing produces and
//!   defaults are declared in.
//!
//! Validation ([`validate_schema`], [`validate_set`]) catches authoring
//! errors such as duplicate short aliases, positional index gaps, and
//! defaults of the wrong type.
//!
//! # Example
//!
//! ```
//! use declarg_core::*;
//!
//! let search = CommandSchema::new("search")
//!     .with_description("Search for articles")
//!     .with_arg(ArgSpec::positional("query", 0, ValueKind::Str))
//!     .with_arg(
//!         ArgSpec::option("limit", ValueKind::Int)
//!             .with_short('l')
//!             .with_default(ArgValue::Int(10)),
//!     );
//!
//! let set = CommandSet::new("articles")
//!     .with_command(search)
//!     .with_command(CommandSchema::new("list"))
//!     .with_default_command("search");
//!
//! assert!(validate_set(&set).is_empty());
//! assert_eq!(set.find_command("search").unwrap().fixed_count(), 1);
//! ```

mod set;
mod types;
mod validate;

pub use set::CommandSet;
pub use types::*;
pub use validate::{HELP_SHORT, ValidationError, validate_schema, validate_set};
