//! Location display-name codec.
//!
//! Two naming eras exist on disk:
//! - current: `L Abdomen (Front)` (short side prefix, sub-area in parentheses)
//! - legacy:  `Left Front Abdomen` (long side prefix, last word is the body part)
//!
//! `decode` accepts both, `encode` only ever writes the current form.

use crate::models::location::{Laterality, LocationIdentity};

/// Parse a display name from either naming era.
///
/// An empty remainder after the side prefix yields an empty `body_part`;
/// callers decide whether that is acceptable.
pub fn decode(display_name: &str) -> LocationIdentity {
    let (laterality, remaining) = strip_laterality(display_name);

    let (body_part, sub_area) = match split_parenthesized(remaining) {
        Some((body, sub)) => (body.trim().to_string(), Some(sub.to_string())),
        None => decode_legacy_words(remaining),
    };

    LocationIdentity {
        body_part,
        sub_area,
        laterality,
    }
}

/// Render the current-era display name.
pub fn encode(identity: &LocationIdentity) -> String {
    let body = match &identity.sub_area {
        Some(sub) => format!("{} ({})", identity.body_part, sub),
        None => identity.body_part.clone(),
    };

    match identity.laterality {
        Some(side) => format!("{} {}", side.code(), body),
        None => body,
    }
}

/// Short prefixes win over long ones: `"L "` is checked before `"Left "`.
fn strip_laterality(name: &str) -> (Option<Laterality>, &str) {
    for side in [Laterality::Left, Laterality::Right] {
        if let Some(rest) = name.strip_prefix(side.code()).and_then(|r| r.strip_prefix(' ')) {
            return (Some(side), rest);
        }
    }

    for side in [Laterality::Left, Laterality::Right] {
        if let Some(rest) = name
            .strip_prefix(side.legacy_label())
            .and_then(|r| r.strip_prefix(' '))
        {
            return (Some(side), rest);
        }
    }

    (None, name)
}

/// `"Abdomen (Front)"` → `("Abdomen ", "Front")`. Requires a `(` followed
/// later by a `)`; text after the closing parenthesis is ignored.
fn split_parenthesized(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let close = text.find(')')?;
    if close <= open {
        return None;
    }
    Some((&text[..open], &text[open + 1..close]))
}

/// Legacy word order: the last space-separated word is the body part and
/// any preceding words form the sub-area.
pub(crate) fn decode_legacy_words(text: &str) -> (String, Option<String>) {
    let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();

    match words.split_last() {
        Some((last, [])) => (last.to_string(), None),
        Some((last, rest)) => (last.to_string(), Some(rest.join(" "))),
        None => (text.to_string(), None),
    }
}
