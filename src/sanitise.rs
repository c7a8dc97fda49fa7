//! Plain-text sanitisation for storefront description fields.
//!
//! Storefront descriptions arrive as HTML fragments. [`sanitise`] reduces
//! them to single-line plain text: tags stripped, character entities
//! decoded, whitespace collapsed.

/// Longest entity span worth scanning for a terminating `;`.
const MAX_ENTITY_LEN: usize = 12;

/// Reduce an HTML fragment to clean plain text.
///
/// Strips `<...>` tag spans (shortest match; a `<` with no `>` after it is
/// kept as literal text), decodes common named and numeric character
/// entities, collapses whitespace runs to a single space, and trims the
/// ends. Pure and total: no input can fail.
pub fn sanitise(raw: &str) -> String {
    let stripped = strip_tags(raw);
    let decoded = decode_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Remove every `<...>` span, keeping the text between spans.
fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    loop {
        let Some(start) = rest.find('<') else {
            result.push_str(rest);
            break;
        };
        result.push_str(&rest[..start]);

        match rest[start..].find('>') {
            Some(offset) => rest = &rest[start + offset + 1..],
            None => {
                // No closing bracket ahead: the '<' is literal text.
                result.push_str(&rest[start..]);
                break;
            }
        }
    }

    result
}

/// Decode named and numeric character entities. Unrecognised entities are
/// kept verbatim.
fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        let tail = &rest[start..];
        match entity_at(tail) {
            Some((ch, len)) => {
                result.push(ch);
                rest = &tail[len..];
            }
            None => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Decode the entity at the start of `text` (which begins with `&`).
///
/// Returns the decoded character and the byte length of the entity span,
/// or `None` when the text does not start with a recognised entity.
fn entity_at(text: &str) -> Option<(char, usize)> {
    let semi = text
        .char_indices()
        .take(MAX_ENTITY_LEN)
        .find(|&(_, ch)| ch == ';')
        .map(|(index, _)| index)?;
    let body = &text[1..semi];

    let ch = match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "hellip" => Some('\u{2026}'),
        "copy" => Some('\u{a9}'),
        "reg" => Some('\u{ae}'),
        "trade" => Some('\u{2122}'),
        "bull" => Some('\u{2022}'),
        _ => numeric_entity(body),
    }?;

    Some((ch, semi + 1))
}

/// Decode a `#123` or `#x7B` entity body.
fn numeric_entity(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Collapse whitespace runs (including non-breaking spaces from entity
/// decoding) to a single space and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }

    result.trim().to_owned()
}
