use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Locale used to order human-readable strings.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Locale {
    /// French dictionary order: accents and case only break ties.
    #[default]
    #[serde(rename = "fr")]
    #[strum(serialize = "fr")]
    French,
    /// Plain code point order.
    #[serde(rename = "binary")]
    #[strum(serialize = "binary")]
    Binary,
}

/// Compares strings according to a [`Locale`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collator {
    locale: Locale,
}

impl Collator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Total order over strings. Strings compare equal only when identical.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self.locale {
            Locale::Binary => a.cmp(b),
            Locale::French => base_letters(a)
                .cmp(base_letters(b))
                .then_with(|| accented(a).cmp(accented(b)))
                .then_with(|| {
                    // lowercase sorts before uppercase
                    a.chars()
                        .map(char::is_uppercase)
                        .cmp(b.chars().map(char::is_uppercase))
                })
                .then_with(|| a.cmp(b)),
        }
    }
}

/// Letters with accents stripped and case folded.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
