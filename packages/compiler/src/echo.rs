//! Echo Compilation
//!
//! `{!! raw !!}`, `{{{ escaped }}}` and `{{ regular }}` output expressions.
//! A `@` prefix keeps the echo as literal template text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RAW_ECHO_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(@)?\{!!\s*(.+?)\s*!!\}(\r?\n)?").unwrap());

static ESCAPED_ECHO_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(@)?\{\{\{\s*(.+?)\s*\}\}\}(\r?\n)?").unwrap());

static REGULAR_ECHO_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(@)?\{\{\s*(.+?)\s*\}\}(\r?\n)?").unwrap());

static COMMENT_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{\{--(.*?)--\}\}").unwrap());

/// Remove `{{-- ... --}}` comments.
pub fn strip_comments(value: &str) -> String {
    COMMENT_REGEXP.replace_all(value, "").into_owned()
}

/// The runtime swallows one newline after `?>`, so a newline that followed
/// an echo is emitted twice.
fn trailing_whitespace(caps: &Captures) -> String {
    caps.get(3).map(|m| m.as_str().repeat(2)).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct EchoCompiler {
    /// `printf`-style format with a single `%s` for regular echoes.
    pub echo_format: String,
    /// Escaping function used by `{{{ }}}` echoes.
    pub escape_function: String,
    /// Route every echoed value through `$__compiler->applyEchoHandler`.
    pub uses_echo_handlers: bool,
}

impl EchoCompiler {
    pub fn new(escape_function: impl Into<String>) -> Self {
        let escape_function = escape_function.into();
        Self {
            echo_format: format!("{}(%s)", escape_function),
            escape_function,
            uses_echo_handlers: false,
        }
    }

    pub fn set_double_encoding(&mut self, double_encode: bool) {
        self.echo_format = format!("{}(%s, {})", self.escape_function, double_encode);
    }

    /// Compile every echo form, raw first.
    pub fn compile(&self, value: &str) -> String {
        let value = self.compile_raw_echos(value);
        let value = self.compile_escaped_echos(&value);
        self.compile_regular_echos(&value)
    }

    fn compile_raw_echos(&self, value: &str) -> String {
        RAW_ECHO_REGEXP
            .replace_all(value, |caps: &Captures| {
                if caps.get(1).is_some() {
                    return caps[0][1..].to_string();
                }
                format!(
                    "<?php echo {}; ?>{}",
                    self.wrap_in_echo_handler(&caps[2]),
                    trailing_whitespace(caps)
                )
            })
            .into_owned()
    }

    fn compile_escaped_echos(&self, value: &str) -> String {
        ESCAPED_ECHO_REGEXP
            .replace_all(value, |caps: &Captures| {
                if caps.get(1).is_some() {
                    return caps[0].to_string();
                }
                format!(
                    "<?php echo {}({}); ?>{}",
                    self.escape_function,
                    self.wrap_in_echo_handler(&caps[2]),
                    trailing_whitespace(caps)
                )
            })
            .into_owned()
    }

    fn compile_regular_echos(&self, value: &str) -> String {
        REGULAR_ECHO_REGEXP
            .replace_all(value, |caps: &Captures| {
                if caps.get(1).is_some() {
                    return caps[0][1..].to_string();
                }
                let wrapped = self
                    .echo_format
                    .replacen("%s", &self.wrap_in_echo_handler(&caps[2]), 1);
                format!("<?php echo {}; ?>{}", wrapped, trailing_whitespace(caps))
            })
            .into_owned()
    }

    fn wrap_in_echo_handler(&self, value: &str) -> String {
        let trimmed = value.trim();
        let value = match trimmed.rfind(';') {
            Some(index) if value.ends_with(';') => &trimmed[..index],
            _ => trimmed,
        };

        if self.uses_echo_handlers {
            format!("$__compiler->applyEchoHandler({})", value)
        } else {
            value.to_string()
        }
    }
}
