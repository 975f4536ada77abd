//! Front-matter codec.
//!
//! A document may begin with a metadata block delimited by lines whose
//! trimmed content starts with `---`. The block holds flat `key: scalar`
//! entries and `key:` lines that open ordered lists fed by `  - item` lines.
//! Everything after the closing delimiter is the body, verbatim.

use crate::value::{FrontMatter, Scalar, Value};

const DELIMITER: &str = "---";

fn is_delimiter(line: &str) -> bool {
    line.trim().starts_with(DELIMITER)
}

/// Split a document into its metadata block and body.
///
/// Returns `(None, text)` unchanged when the text does not start with a
/// delimiter line. A missing closing delimiter consumes the rest of the
/// text as metadata, leaving an empty body.
pub fn decode(text: &str) -> (Option<FrontMatter>, &str) {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, text);
    };
    if !is_delimiter(first) {
        return (None, text);
    }

    let block_start = first.len();
    let mut pos = block_start;
    let mut block_end = text.len();
    let mut body_start = text.len();
    for line in lines {
        if is_delimiter(line) {
            block_end = pos;
            body_start = pos + line.len();
            break;
        }
        pos += line.len();
    }

    let metadata = parse_block(&text[block_start..block_end]);
    (Some(metadata), &text[body_start..])
}

/// Serialize a metadata mapping back into a delimiter-bounded block.
///
/// Entries are emitted in insertion order, so
/// `decode(encode(m)).0 == Some(m)` for any mapping built from the
/// supported scalar and list kinds.
#[must_use]
pub fn encode(metadata: &FrontMatter) -> String {
    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    for (key, value) in metadata.iter() {
        match value {
            Value::Scalar(scalar) => out.push_str(&format!("{key}: {scalar}\n")),
            Value::List(items) => {
                out.push_str(&format!("{key}:\n"));
                for item in items {
                    out.push_str(&format!("  - {item}\n"));
                }
            }
        }
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out
}

/// Recombine a metadata block with a preserved body, inserting a newline
/// when the body would otherwise glue onto the closing delimiter.
#[must_use]
pub fn compose(metadata: &FrontMatter, body: &str) -> String {
    let mut text = encode(metadata);
    if !body.is_empty() && !body.starts_with('\n') {
        text.push('\n');
    }
    text.push_str(body);
    text
}

fn parse_block(block: &str) -> FrontMatter {
    let mut metadata = FrontMatter::new();

    // Pass 1: scalar entries and empty-valued keys, which open lists.
    // Duplicate keys: last write wins, first position kept.
    for raw in block.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("- ") {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if value.is_empty() {
            metadata.set(key, Value::List(Vec::new()));
        } else {
            metadata.set(key, Value::Scalar(parse_scalar(value)));
        }
    }

    // Pass 2: attach `- item` lines to the most recent empty-valued key.
    // Items outside any open list are ignored.
    let mut current: Option<String> = None;
    for raw in block.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(item) = line.strip_prefix("- ") {
            if let Some(key) = &current {
                if let Some(Value::List(items)) = metadata.get_mut(key) {
                    items.push(item.trim().to_string());
                }
            }
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            current = if value.trim().is_empty()
                && matches!(metadata.get(key), Some(Value::List(_)))
            {
                Some(key.to_string())
            } else {
                None
            };
        }
    }

    metadata
}

fn parse_scalar(raw: &str) -> Scalar {
    if raw.contains('.') {
        raw.parse::<f64>()
            .map(Scalar::Float)
            .unwrap_or_else(|_| Scalar::Str(raw.to_string()))
    } else {
        raw.parse::<i64>()
            .map(Scalar::Int)
            .unwrap_or_else(|_| Scalar::Str(raw.to_string()))
    }
}
