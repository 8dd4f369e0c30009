//! Command option parsing.
//!
//! Each command variant declares its own capability set as a table of
//! [`OptionSpec`]s with an explicit argument arity; the same parse loop
//! serves every variant. Parsing consumes dash-prefixed tokens until the
//! first token that is not option-shaped; everything after that point
//! becomes the target list verbatim.
//!
//! # Public API
//! - [`OptionSpec`]: One option a command understands (name, aliases, arity)
//! - [`ParsedOption`]: A resolved option with its consumed arguments
//! - [`parse_options`]: The shared parse loop

use crate::core::error::{ClearNavError, Result};

/// One option in a command's capability table.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// Canonical name (without dashes); what `apply_option` receives
    pub name: &'static str,
    /// Accepted synonyms, typically the single-letter short form
    pub aliases: &'static [&'static str],
    /// Number of following tokens the option consumes
    pub arity: usize,
}

/// A resolved option and the argument tokens it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    pub name: &'static str,
    pub args: Vec<String>,
}

/// Does this token have the dash-prefixed option shape?
fn is_option_shaped(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && !token.trim_start_matches('-').is_empty()
}

/// Parse a command's remaining tokens against its option table.
///
/// Returns the resolved options in the order given plus the untouched
/// target tokens. Fails with [`ClearNavError::UnrecognizedOption`] when a
/// dash-prefixed token matches no table entry, and with
/// [`ClearNavError::MissingOptionArgument`] when an option's declared arity
/// cannot be satisfied.
pub fn parse_options(
    specs: &'static [OptionSpec],
    args: Vec<String>,
) -> Result<(Vec<ParsedOption>, Vec<String>)> {
    let mut options = Vec::new();
    let mut rest = args.into_iter().peekable();

    while let Some(token) = rest.peek() {
        if !is_option_shaped(token) {
            break;
        }
        let token = rest.next().expect("peeked");
        let name = token.trim_start_matches('-');
        let spec = specs
            .iter()
            .find(|s| s.name == name || s.aliases.contains(&name))
            .ok_or_else(|| ClearNavError::unrecognized_option(&token))?;

        let mut taken = Vec::with_capacity(spec.arity);
        for _ in 0..spec.arity {
            let arg = rest
                .next()
                .ok_or_else(|| ClearNavError::missing_option_argument(&token))?;
            taken.push(arg);
        }
        options.push(ParsedOption {
            name: spec.name,
            args: taken,
        });
    }

    Ok((options, rest.collect()))
}
