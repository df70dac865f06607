//! Statement Scanner
//!
//! Finds `@name`, `@name(args)` and `@@name` occurrences in literal text.
//! The regex picks the shortest argument group; when that group closes
//! early (inside a string, or around a nested call) the match is widened to
//! the next `)` until the tokenised arguments balance.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::balanced::has_balanced_parentheses;
use crate::error::{CompileError, Result};

/// Upper bound on how many times one statement may be widened.
pub const MAX_PAREN_RESCAN: usize = 256;

static STATEMENT_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\B@(@?\w+(?:::\w+)?)([ \t]*)(\(([\s\S]*?)\))?").unwrap());

/// One statement occurrence, as byte ranges into the scanned template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    pub start: usize,
    pub end: usize,
    /// Directive name, including the leading `@` of an escaped statement.
    pub name: &'a str,
    /// Spaces and tabs between the name and the argument group.
    pub whitespace: &'a str,
    /// Argument group including its parentheses.
    pub arguments: Option<&'a str>,
}

impl<'a> Statement<'a> {
    pub fn text(&self, template: &'a str) -> &'a str {
        &template[self.start..self.end]
    }

    pub fn is_escaped(&self) -> bool {
        self.name.starts_with('@')
    }
}

/// Scan `template` for statements, left to right. Statements swallowed by
/// a widened argument group are dropped.
pub fn scan(template: &str) -> Result<Vec<Statement<'_>>> {
    let mut statements: Vec<Statement<'_>> = Vec::new();
    let mut consumed = 0;

    for caps in STATEMENT_REGEXP.captures_iter(template) {
        let (Some(whole), Some(name), Some(whitespace)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if whole.start() < consumed {
            continue;
        }

        let mut statement = Statement {
            start: whole.start(),
            end: whole.end(),
            name: name.as_str(),
            whitespace: whitespace.as_str(),
            arguments: caps.get(3).map(|m| m.as_str()),
        };

        if let Some(arguments) = caps.get(3) {
            let arguments_start = arguments.start();
            let mut rescans = 0;

            while !has_balanced_parentheses(statement.text(template)) {
                let Some(offset) = template[statement.end..].find(')') else {
                    break;
                };
                rescans += 1;
                if rescans > MAX_PAREN_RESCAN {
                    return Err(CompileError::malformed(
                        statement.name,
                        format!(
                            "unbalanced parentheses after {} attempts",
                            MAX_PAREN_RESCAN
                        ),
                    ));
                }
                statement.end += offset + 1;
            }
            statement.arguments = Some(&template[arguments_start..statement.end]);
        }

        tracing::trace!(name = statement.name, start = statement.start, "statement");
        consumed = statement.end;
        statements.push(statement);
    }

    Ok(statements)
}
