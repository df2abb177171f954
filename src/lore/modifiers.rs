//! Modifier extraction.
//!
//! Two passes over the same stripped description:
//! - `display_modifiers` produces the human-readable signature used in
//!   grouping keys;
//! - `tokens` produces commodity ids used by the sum-of-parts valuator.
//!
//! The passes share their line matchers but are otherwise independent. A
//! line that matches both the ultimate and the regular enchantment tables
//! is recorded by both.

use std::collections::BTreeSet;
use std::fmt;

use super::vocabulary::Vocabulary;
use super::{parse_level, strip_decoration};

/// Glyph that marks a gemstone slot line, e.g. `[❂ Perfect Jasper]`.
pub const GEMSTONE_GLYPH: char = '❂';

const ULTIMATE_MAX_LEVEL: usize = 5;
const ENCHANTMENT_MAX_LEVEL: usize = 10;

/// Machine-readable identifier of one value-relevant trait.
///
/// Equal tokens name the same commodity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModifierToken(String);

impl ModifierToken {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModifierToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Line-level matches shared by both passes.
struct LineMatch<'a> {
    ultimate: Option<(&'a str, u32)>,
    enchantment: Option<(&'a str, u32)>,
}

/// Extracts modifiers from item descriptions using a `Vocabulary`.
#[derive(Debug, Clone, Default)]
pub struct ModifierExtractor {
    vocabulary: Vocabulary,
}

impl ModifierExtractor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Sorted, de-duplicated display strings of the grouping-relevant
    /// modifiers in `description`.
    pub fn display_modifiers(&self, description: &str) -> Vec<String> {
        let mut found = BTreeSet::new();

        for line in Self::lines(description) {
            let matched = self.match_enchantments(&line);
            if matched.ultimate.is_some() {
                found.insert(line.clone());
            }
            if matched.enchantment.is_some() {
                found.insert(line.clone());
            }

            if line.contains(GEMSTONE_GLYPH) {
                let gem = line
                    .replace(['[', ']'], "")
                    .replacen(GEMSTONE_GLYPH, "", 1)
                    .trim()
                    .to_string();
                if !gem.is_empty() {
                    found.insert(gem);
                }
            }

            for booster in self.vocabulary.static_boosters.iter().filter(|b| b.keyed) {
                if line.contains(booster.label.as_str()) {
                    found.insert(booster.label.clone());
                }
            }
        }

        found.into_iter().collect()
    }

    /// Commodity tokens for every priced modifier in `description`.
    ///
    /// Duplicates are kept: two identical gemstones are two tokens.
    pub fn tokens(&self, description: &str) -> Vec<ModifierToken> {
        let mut tokens = Vec::new();

        for line in Self::lines(description) {
            let matched = self.match_enchantments(&line);
            if let Some((id, level)) = matched.ultimate {
                tokens.push(ModifierToken::new(format!("{id}_{level}_BOOK")));
            }
            if let Some((id, level)) = matched.enchantment {
                tokens.push(ModifierToken::new(format!("ENCHANTMENT_{id}_{level}")));
            }

            if line.contains(GEMSTONE_GLYPH) {
                if let Some(token) = self.gemstone_token(&line) {
                    tokens.push(token);
                }
            }

            for booster in &self.vocabulary.static_boosters {
                if line.contains(booster.label.as_str()) {
                    tokens.push(ModifierToken::new(booster.token.as_str()));
                }
            }
        }

        tokens
    }

    // -- Internal helpers ------------------------------------------------

    /// Stripped, trimmed, non-blank lines.
    fn lines(description: &str) -> Vec<String> {
        strip_decoration(description)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }

    fn match_enchantments(&self, line: &str) -> LineMatch<'_> {
        LineMatch {
            ultimate: Self::match_table(
                &self.vocabulary.ultimate_enchantments,
                line,
                ULTIMATE_MAX_LEVEL,
            ),
            enchantment: Self::match_table(
                &self.vocabulary.enchantments,
                line,
                ENCHANTMENT_MAX_LEVEL,
            ),
        }
    }

    /// First table entry whose line is exactly `<name> <numeral>`.
    fn match_table<'a>(
        table: &'a [(String, String)],
        line: &str,
        max_level: usize,
    ) -> Option<(&'a str, u32)> {
        table.iter().find_map(|(name, id)| {
            let numeral = line.strip_prefix(name.as_str())?.strip_prefix(' ')?;
            let level = parse_level(numeral, max_level)?;
            Some((id.as_str(), level))
        })
    }

    /// `[❂ <Tier> <Type>]` → `<TIER>_<TYPE>_GEM` when both words are known.
    fn gemstone_token(&self, line: &str) -> Option<ModifierToken> {
        let cleaned = line.replace(['[', ']', GEMSTONE_GLYPH], "");
        let parts: Vec<&str> = cleaned.trim().split(' ').collect();
        let [tier, kind] = parts.as_slice() else {
            return None;
        };
        let tier = self.vocabulary.gemstone_tiers.get(*tier)?;
        let kind = self.vocabulary.gemstone_types.get(*kind)?;
        Some(ModifierToken::new(format!("{tier}_{kind}_GEM")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
