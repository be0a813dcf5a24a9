//! Named-region extraction from an HTML fragment document.
//!
//! The admin dashboard shell ships as a static HTML document; at request
//! time the server lifts the inner markup of the element carrying a known
//! id out of it and injects that into the page chrome. A missing region is
//! an explicit error the caller must surface, never a silent no-op.
//!
//! This is a lightweight scanner, not an HTML parser: it assumes the shell
//! is well-formed, matches the target element by its `id` attribute, and
//! balances open/close tags of that element's name. Comments and CDATA are
//! not special-cased.

use thiserror::Error;

/// Errors from region extraction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    /// No element with the requested id exists in the document.
    #[error("fragment region '{0}' not found")]
    RegionNotFound(String),
    /// The element was found but its closing tag was not.
    #[error("fragment region '{0}' is not terminated")]
    Unterminated(String),
}

/// Extract the inner markup of the element with the given `id`.
///
/// # Errors
///
/// Returns [`FragmentError::RegionNotFound`] if no element carries the id,
/// or [`FragmentError::Unterminated`] if its closing tag is missing.
pub fn extract_region(html: &str, id: &str) -> Result<String, FragmentError> {
    let not_found = || FragmentError::RegionNotFound(id.to_string());

    let attr_pos = find_id_attr(html, id).ok_or_else(not_found)?;

    // Walk back to the '<' that opens this tag.
    let tag_start = html
        .get(..attr_pos)
        .and_then(|prefix| prefix.rfind('<'))
        .ok_or_else(not_found)?;

    let tag_name: String = html
        .get(tag_start + 1..)
        .unwrap_or("")
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if tag_name.is_empty() {
        return Err(not_found());
    }

    // End of the opening tag.
    let open_end = html
        .get(tag_start..)
        .and_then(|rest| rest.find('>'))
        .map(|i| tag_start + i)
        .ok_or_else(|| FragmentError::Unterminated(id.to_string()))?;

    // The opening tag may be self-closing, in which case the region is empty.
    if html.get(..open_end).is_some_and(|s| s.ends_with('/')) {
        return Ok(String::new());
    }

    let inner_start = open_end + 1;
    let open_marker = format!("<{tag_name}");
    let close_marker = format!("</{tag_name}");

    let mut depth = 1usize;
    let mut pos = inner_start;
    while let Some(rest) = html.get(pos..) {
        let next_open = find_tag(rest, &open_marker);
        let next_close = find_tag(rest, &close_marker);

        match (next_open, next_close) {
            // Another element of the same name opens before the next close.
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                pos += o + open_marker.len();
            }
            (_, Some(c)) => {
                depth -= 1;
                if depth == 0 {
                    return html
                        .get(inner_start..pos + c)
                        .map(str::to_owned)
                        .ok_or_else(|| FragmentError::Unterminated(id.to_string()));
                }
                pos += c + close_marker.len();
            }
            (Some(o), None) => {
                depth += 1;
                pos += o + open_marker.len();
            }
            (None, None) => break,
        }
    }

    Err(FragmentError::Unterminated(id.to_string()))
}

/// Find an `id="..."` or `id='...'` attribute for the given id.
fn find_id_attr(html: &str, id: &str) -> Option<usize> {
    for quote in ['"', '\''] {
        let needle = format!("id={quote}{id}{quote}");
        if let Some(pos) = html.find(&needle) {
            return Some(pos);
        }
    }
    None
}

/// Find an opening tag occurrence, requiring a tag-name boundary after it.
fn find_tag(haystack: &str, marker: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(rel) = haystack.get(offset..)?.find(marker) {
        let pos = offset + rel;
        let after = haystack.get(pos + marker.len()..)?.chars().next();
        match after {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(pos),
            None => return None,
            _ => offset = pos + marker.len(),
        }
    }
    None
}
