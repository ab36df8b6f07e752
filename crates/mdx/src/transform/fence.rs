//! Line-by-line fenced code block tracking.

/// Open fence, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceState {
    /// Marker and length of the open fence.
    open: Option<(char, usize)>,
}

impl FenceState {
    /// True while inside a fenced block.
    pub fn inside(&self) -> bool {
        self.open.is_some()
    }

    /// Feeds one line and reports whether it belongs to a code fence
    /// (opener, contents, or closer).
    pub fn advance(&mut self, line: &str) -> bool {
        let Some(rest) = strip_fence_indent(line) else {
            return self.inside();
        };
        match (self.open, fence_marker(rest)) {
            (None, Some(marker)) => {
                self.open = Some(marker);
                true
            }
            (Some((ch, len)), Some((found, found_len)))
                if ch == found
                    && found_len >= len
                    && rest.trim_start_matches(found).trim().is_empty() =>
            {
                self.open = None;
                true
            }
            (open, _) => open.is_some(),
        }
    }
}

/// Strips up to three columns of indentation; `None` for indented code.
fn strip_fence_indent(line: &str) -> Option<&str> {
    let mut cols = 0;
    for (i, b) in line.bytes().enumerate() {
        match b {
            b' ' => cols += 1,
            b'\t' => cols += 4 - cols % 4,
            _ => return (cols <= 3).then(|| &line[i..]),
        }
        if cols > 3 {
            return None;
        }
    }
    Some("")
}

/// Returns the fence marker and run length when `rest` opens or closes a fence.
fn fence_marker(rest: &str) -> Option<(char, usize)> {
    let ch = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = rest.chars().take_while(|c| *c == ch).count();
    if len < 3 {
        return None;
    }
    // Backtick info strings may not contain backticks.
    if ch == '`' && rest[len..].contains('`') {
        return None;
    }
    Some((ch, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lines: &[&str]) -> Vec<bool> {
        let mut state = FenceState::default();
        lines.iter().map(|l| state.advance(l)).collect()
    }

    #[test]
    fn backtick_fence() {
        assert_eq!(
            track(&["a", "```rust", ":::note", "```", "b"]),
            vec![false, true, true, true, false]
        );
    }

    #[test]
    fn closer_must_match_marker_and_length() {
        assert_eq!(
            track(&["````", "```", "~~~~", "````", "x"]),
            vec![true, true, true, true, false]
        );
    }

    #[test]
    fn indented_code_is_not_a_fence() {
        assert_eq!(track(&["    ```", "x"]), vec![false, false]);
    }

    #[test]
    fn inline_backticks_are_not_fences() {
        assert_eq!(track(&["``` a ` b", "x"]), vec![false, false]);
    }
}
