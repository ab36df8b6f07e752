//! YAML frontmatter at the top of a documentation page.

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Frontmatter split off the top of a page.
#[derive(Debug)]
pub struct FrontmatterExtraction {
    /// Parsed frontmatter as a JSON object (empty when absent).
    pub value: JsonValue,
    /// Byte offset where the page body begins.
    pub body_start: usize,
}

impl FrontmatterExtraction {
    /// Page title, when the frontmatter sets one.
    pub fn title(&self) -> Option<&str> {
        self.value.get("title").and_then(JsonValue::as_str)
    }
}

/// Errors emitted while extracting frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Opening `---` without a closing one.
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Extracts YAML frontmatter from a page.
///
/// Leading blank lines and a byte-order mark are skipped. A page whose first
/// non-blank line is not `---` has no frontmatter.
pub fn extract_frontmatter(input: &str) -> Result<FrontmatterExtraction, FrontmatterError> {
    let mut offset = input.strip_prefix('\u{feff}').map_or(0, |_| '\u{feff}'.len_utf8());
    let mut lines = input[offset..].split_inclusive('\n');

    // Find the opening fence.
    loop {
        let Some(line) = lines.next() else {
            return Ok(empty(0));
        };
        offset += line.len();
        if line.trim().is_empty() {
            continue;
        }
        if !is_fence(line) {
            return Ok(empty(0));
        }
        let block_start = offset;
        for line in lines.by_ref() {
            if is_fence(line) {
                let block = &input[block_start..offset];
                let value = parse_block(block)?;
                return Ok(FrontmatterExtraction {
                    value,
                    body_start: offset + line.len(),
                });
            }
            offset += line.len();
        }
        return Err(FrontmatterError::Unterminated);
    }
}

fn empty(body_start: usize) -> FrontmatterExtraction {
    FrontmatterExtraction {
        value: JsonValue::Object(Default::default()),
        body_start,
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}

fn parse_block(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(JsonValue::Object(Default::default()));
    }
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))? {
        JsonValue::Null => Ok(JsonValue::Object(Default::default())),
        value @ JsonValue::Object(_) => Ok(value),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_frontmatter() {
        let result = extract_frontmatter("# Title\nBody").unwrap();
        assert_eq!(result.body_start, 0);
        assert!(result.title().is_none());
    }

    #[test]
    fn reads_title_and_body_offset() {
        let input = "---\ntitle: Install\ntags: [cli]\n---\n# Install";
        let result = extract_frontmatter(input).unwrap();
        assert_eq!(result.title(), Some("Install"));
        assert_eq!(result.body_start, input.find("# Install").unwrap());
    }

    #[test]
    fn skips_bom_and_blank_lines() {
        let input = "\u{feff}\n  \n---\r\nfoo: bar\r\n---\r\nBody";
        let result = extract_frontmatter(input).unwrap();
        assert_eq!(result.value["foo"], "bar");
        assert_eq!(result.body_start, input.find("Body").unwrap());
    }

    #[test]
    fn empty_block_is_empty_object() {
        let input = "---\n---\nBody";
        let result = extract_frontmatter(input).unwrap();
        assert_eq!(result.value, JsonValue::Object(Default::default()));
        assert_eq!(result.body_start, 8);
    }

    #[test]
    fn errors() {
        assert!(matches!(
            extract_frontmatter("---\ntitle: x").unwrap_err(),
            FrontmatterError::Unterminated
        ));
        assert!(matches!(
            extract_frontmatter("---\n[1, 2\n---\n").unwrap_err(),
            FrontmatterError::Parse(_)
        ));
        assert!(matches!(
            extract_frontmatter("---\n- a\n---\n").unwrap_err(),
            FrontmatterError::InvalidRootType
        ));
    }
}
