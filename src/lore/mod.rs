//! Item description ("lore") parsing.
//!
//! Descriptions and display names carry `§`-prefixed decoration codes
//! (colors and styles). Everything that matches on text works on the
//! stripped form; only the valuator looks at raw codes.

pub mod modifiers;
pub mod vocabulary;

pub use modifiers::{ModifierExtractor, ModifierToken};
pub use vocabulary::Vocabulary;

/// Sentinel that introduces a one-character decoration code.
pub const DECORATION_SENTINEL: char = '§';

/// Decoration code that renders text obfuscated. Its presence in a
/// description marks a recombobulated item.
pub const OBFUSCATED_CODE: &str = "§k";

/// Roman numerals in level order, index + 1 == value.
const ROMAN_LEVELS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

fn is_decoration_code(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}

/// Remove every `§<code>` sequence. A sentinel followed by anything that
/// is not a known code is kept verbatim.
pub fn strip_decoration(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == DECORATION_SENTINEL {
            if let Some(&code) = chars.peek() {
                if is_decoration_code(code) {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Canonical item name: decoration removed, whitespace trimmed.
pub fn normalize_name(name: &str) -> String {
    strip_decoration(name).trim().to_string()
}

fn roman_value(c: char) -> Option<u32> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        _ => None,
    }
}

/// Decode a roman numeral over {I, V, X} with a subtractive pairwise scan.
///
/// Returns `None` for an empty string or any other symbol.
pub fn decode_roman(numeral: &str) -> Option<u32> {
    let values = numeral
        .chars()
        .map(roman_value)
        .collect::<Option<Vec<u32>>>()?;
    if values.is_empty() {
        return None;
    }

    let mut total: i64 = 0;
    for (i, &current) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if next > current => total -= current as i64,
            _ => total += current as i64,
        }
    }
    u32::try_from(total).ok()
}

/// Parse an enchantment level written as one of the canonical numerals
/// `I..=max_level`. Non-canonical spellings ("IIII", "VV") are rejected.
pub fn parse_level(numeral: &str, max_level: usize) -> Option<u32> {
    let limit = max_level.min(ROMAN_LEVELS.len());
    if !ROMAN_LEVELS[..limit].contains(&numeral) {
        return None;
    }
    decode_roman(numeral)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
