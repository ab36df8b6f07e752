//! Directive expansion.
//!
//! Rewrites container directives such as
//!
//! ```text
//! :::warning[Heads up] icon="🔥"
//! Body
//! :::
//! ```
//!
//! into `<Alert>` tags surrounded by blank lines, so the Markdown renderer
//! passes the tags through as HTML blocks and still renders the body.
//! Lines inside fenced code are never touched.

use std::fmt::Write as _;

use crate::registry::RegistryConfig;
use crate::transform::fence::FenceState;

/// Parsed directive opening line (e.g. `:::note[Title] icon="x"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveOpening {
    /// Lowercased directive name.
    pub name: String,
    /// Title from bracket syntax `[...]`.
    pub bracket_title: Option<String>,
    /// `icon` attribute, if given.
    pub icon: Option<String>,
    /// Leading whitespace of the opening line.
    pub indent: String,
}

/// Parses an opening directive line. Any alphabetic name is accepted;
/// whether it maps to an alert is up to the registry.
pub fn parse_opening_directive(line: &str) -> Option<DirectiveOpening> {
    let indent_len = line.len() - line.trim_start().len();
    let indent = &line[..indent_len];
    if indent.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum::<usize>() > 3 {
        return None;
    }

    let rest = line.trim().strip_prefix(":::")?;
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let name = rest[..name_len].to_ascii_lowercase();
    let mut rest = &rest[name_len..];

    let mut bracket_title = None;
    if let Some(after) = rest.strip_prefix('[') {
        let close = after.find(']')?;
        bracket_title = Some(after[..close].to_string());
        rest = &after[close + 1..];
    }

    let icon = parse_attrs(rest)
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("icon"))
        .map(|(_, value)| value);

    Some(DirectiveOpening {
        name,
        bracket_title,
        icon,
        indent: indent.to_string(),
    })
}

/// Splits `key="value" key2='v' flag` into pairs, honouring quotes.
/// Surrounding `{}` (remark-directive attribute syntax) are ignored.
fn parse_attrs(attrs: &str) -> Vec<(String, String)> {
    let attrs = attrs.trim();
    let attrs = attrs
        .strip_prefix('{')
        .and_then(|a| a.strip_suffix('}'))
        .unwrap_or(attrs);

    let mut pairs = Vec::new();
    let mut chars = attrs.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let key: String = std::iter::from_fn(|| chars.next_if(|c| !c.is_whitespace() && *c != '='))
            .collect();
        if key.is_empty() {
            break;
        }
        let mut value = String::new();
        if chars.next_if_eq(&'=').is_some() {
            match chars.next_if(|c| *c == '"' || *c == '\'') {
                Some(quote) => {
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                None => {
                    value = std::iter::from_fn(|| chars.next_if(|c| !c.is_whitespace())).collect();
                }
            }
        }
        pairs.push((key, value));
    }
    pairs
}

/// Check if a line is a directive closer (`:::`).
pub fn is_directive_closer(line: &str) -> bool {
    line.trim() == ":::"
}

/// Rewrites registry-known directives into `<Alert>` tags.
///
/// Returns the rewritten text and the number of directives expanded.
/// Unknown directive names pass through untouched together with their
/// closers; known directives still open at the end of the input are closed
/// there.
pub fn rewrite_directives(input: &str, registry: &RegistryConfig) -> (String, usize) {
    let mut fence = FenceState::default();
    let mut output = String::with_capacity(input.len() + 64);
    // One entry per open block: the indent of an expanded alert, or `None`
    // for an unknown directive left as text.
    let mut open: Vec<Option<String>> = Vec::new();
    let mut count = 0usize;

    for line in input.lines() {
        if fence.advance(line) {
            writeln!(output, "{}", line).ok();
            continue;
        }

        if is_directive_closer(line) {
            match open.pop() {
                Some(Some(indent)) => {
                    write!(output, "\n{}</Alert>\n\n", indent).ok();
                }
                Some(None) | None => {
                    writeln!(output, "{}", line).ok();
                }
            }
            continue;
        }

        let Some(opening) = parse_opening_directive(line) else {
            writeln!(output, "{}", line).ok();
            continue;
        };
        let Some(mapping) = registry.get_directive_mapping(&opening.name) else {
            log::debug!("directive ':::{}' is not registered; leaving as text", opening.name);
            writeln!(output, "{}", line).ok();
            open.push(None);
            continue;
        };

        let indent = opening.indent;
        write!(output, "\n{}<Alert context=\"{}\"", indent, mapping.context).ok();
        if let Some(icon) = opening.icon.as_ref().or(mapping.icon.as_ref()) {
            write!(
                output,
                " icon=\"{}\"",
                html_escape::encode_double_quoted_attribute(icon)
            )
            .ok();
        }
        output.push_str(">\n\n");
        if let Some(title) = opening.bracket_title.filter(|t| !t.trim().is_empty()) {
            write!(
                output,
                "{}**{}**\n\n",
                indent,
                html_escape::encode_text(title.trim())
            )
            .ok();
        }
        open.push(Some(indent));
        count += 1;
    }

    let unclosed: Vec<String> = open.into_iter().flatten().collect();
    if !unclosed.is_empty() {
        log::warn!("{} directive block(s) not closed before end of input", unclosed.len());
        for indent in unclosed.iter().rev() {
            write!(output, "\n{}</Alert>\n\n", indent).ok();
        }
    }

    (output, count)
}
