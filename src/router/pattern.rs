//! Route pattern compilation.
//!
//! A route pattern is a path template with named segments (`:id`) and greedy
//! wildcards (`**`). Compilation happens once, at registration time, and
//! produces a [`CompiledPattern`] that can test a whole path and extract
//! captures in declaration order.

use regex::{Captures, Regex};

/// Compiled matcher for one route pattern.
///
/// Matching is whole-path: a rule that only covers a leading substring of the
/// request path is treated as no-match. A single trailing `/` on the request
/// path never changes the outcome.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    capture_names: Vec<String>,
}

impl CompiledPattern {
    /// Compile a pattern string into a match rule.
    ///
    /// `:identifier` segments (identifier stops at `/ # ? ( ) .` or `\`)
    /// become named groups matching one-or-more non-separator characters.
    /// Each `**` becomes a group matching zero-or-more characters short of a
    /// fragment or query delimiter, named `_1`, `_2`, ... in order of
    /// appearance. Remaining text passes to the expression engine unescaped;
    /// there is no escape for a literal `:` or `**`.
    ///
    /// # Panics
    ///
    /// Panics when the substituted pattern is not a valid expression.
    /// Registration happens during the build phase, before traffic.
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        let named = Regex::new(r":[^/#?().\\]+").expect("named-segment scanner is valid");
        let mut compiled = named
            .replace_all(pattern, |caps: &Captures<'_>| {
                format!("(?P<{}>[^/#?]+)", &caps[0][1..])
            })
            .into_owned();

        let wildcard = Regex::new(r"\*\*").expect("wildcard scanner is valid");
        let mut index = 0;
        compiled = wildcard
            .replace_all(&compiled, |_: &Captures<'_>| {
                index += 1;
                format!("(?P<_{index}>[^#?]*)")
            })
            .into_owned();

        compiled.push_str("/?");

        let regex = Regex::new(&compiled).expect("route pattern produced an invalid expression");
        let capture_names = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();

        Self {
            regex,
            capture_names,
        }
    }

    /// Capture names in declaration order, synthetic wildcard names included.
    #[must_use]
    pub fn capture_names(&self) -> &[String] {
        &self.capture_names
    }

    /// Test `path` against the rule.
    ///
    /// Returns `Some` with the extracted captures (possibly empty) when the
    /// rule covers the entire path, `None` otherwise.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let caps = self.regex.captures(path)?;
        let whole = caps.get(0)?;
        if whole.as_str() != path {
            return None;
        }
        Some(
            self.capture_names
                .iter()
                .map(|name| {
                    let value = caps.name(name).map(|m| m.as_str()).unwrap_or("");
                    (name.clone(), value.to_string())
                })
                .collect(),
        )
    }
}
