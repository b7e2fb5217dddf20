//! Local script detection and romanized-Hindi normalization.
//!
//! This is the first step of every voice turn, before any network call. It
//! never translates non-Latin text: a script-range hit tags the utterance and
//! returns it unchanged, so the backend can decide what to do with it. Only
//! Latin-script input goes through the token vocabulary.

use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Lang {
    #[strum(serialize = "en")]
    #[serde(rename = "en")]
    En,
    #[strum(serialize = "hi")]
    #[serde(rename = "hi")]
    Hi,
    #[strum(serialize = "ta")]
    #[serde(rename = "ta")]
    Ta,
    #[strum(serialize = "te")]
    #[serde(rename = "te")]
    Te,
    #[strum(serialize = "kn")]
    #[serde(rename = "kn")]
    Kn,
    #[strum(serialize = "ml")]
    #[serde(rename = "ml")]
    Ml,
    /// Latin script that may be romanized Hindi; token substitution applied.
    #[strum(serialize = "en-or-hi")]
    #[serde(rename = "en-or-hi")]
    EnOrHi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    pub text: String,
    pub detected_lang: Lang,
}

/// Script ranges checked in fixed priority order. First hit wins.
const SCRIPT_RANGES: &[(Lang, std::ops::RangeInclusive<char>)] = &[
    (Lang::Hi, '\u{0900}'..='\u{097F}'),
    (Lang::Ta, '\u{0B80}'..='\u{0BFF}'),
    (Lang::Te, '\u{0C00}'..='\u{0C7F}'),
    (Lang::Kn, '\u{0C80}'..='\u{0CFF}'),
    (Lang::Ml, '\u{0D00}'..='\u{0D7F}'),
];

fn romanized_hindi(token: &str) -> Option<&'static str> {
    let mapped = match token {
        "ek" => "one",
        "do" => "two",
        "teen" => "three",
        "char" => "four",
        "paanch" => "five",
        "chhe" => "six",
        "saath" => "seven",
        "aath" => "eight",
        "nau" => "nine",
        "das" => "ten",
        "jodo" => "add",
        "nikalo" | "ghatao" | "baahar" | "hatao" => "remove",
        "kharido" | "kharidna" => "buy",
        _ => return None,
    };
    Some(mapped)
}

/// Detect the script family of `text` and, for Latin input, replace whole
/// tokens found in the closed romanized-Hindi vocabulary.
///
/// Non-Latin hits return the input untouched, with no lowercasing and no
/// substitution. Latin input is lowercased, split on single spaces, mapped
/// token-by-token, and rejoined; unknown tokens pass through verbatim, so
/// word order and count are preserved.
pub fn detect_and_normalize(text: &str) -> Normalized {
    if text.is_empty() {
        return Normalized {
            text: String::new(),
            detected_lang: Lang::En,
        };
    }

    for (lang, range) in SCRIPT_RANGES {
        if text.chars().any(|c| range.contains(&c)) {
            return Normalized {
                text: text.to_string(),
                detected_lang: *lang,
            };
        }
    }

    let lower = text.to_lowercase();
    let mapped: Vec<&str> = lower
        .split(' ')
        .map(|w| romanized_hindi(w).unwrap_or(w))
        .collect();

    Normalized {
        text: mapped.join(" "),
        detected_lang: Lang::EnOrHi,
    }
}
