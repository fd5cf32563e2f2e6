//! Placeholder extraction from raw text.
//!
//! Recognizes `${name}` and `${name:default}` references. Defaults may
//! themselves contain nested placeholders; nesting is balanced but never
//! recursed into, so `${a:${b}}` yields the single name `a` with default
//! `${b}`.

use std::collections::BTreeMap;

const PREFIX: &str = "${";

/// Extracts every placeholder from `text`, mapping name to default value
/// ("" when none is given). The first occurrence of a name wins; empty
/// names are skipped; unbalanced openings are ignored.
pub fn extract_placeholders(text: &str) -> BTreeMap<String, String> {
    let mut found = BTreeMap::new();
    let mut rest = text;
    while let Some(start) = rest.find(PREFIX) {
        let body_start = start + PREFIX.len();
        let Some(body_len) = find_closing_brace(&rest[body_start..]) else {
            // Unbalanced: skip this opening and keep looking.
            rest = &rest[body_start..];
            continue;
        };
        let body = &rest[body_start..body_start + body_len];
        let (name, default) = match body.find(':') {
            Some(colon) => (&body[..colon], &body[colon + 1..]),
            None => (body, ""),
        };
        if !name.is_empty() {
            found
                .entry(name.to_string())
                .or_insert_with(|| default.to_string());
        }
        rest = &rest[body_start + body_len + 1..];
    }
    found
}

/// Finds the byte offset of the `}` closing the placeholder whose body
/// starts at the beginning of `s`, counting nested `${` openings.
fn find_closing_brace(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'}' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
