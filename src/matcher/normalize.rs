//! Release-title normalization.
//!
//! Provider feeds carry titles like `Jane.Doe.The.Long.Road.2020.EPUB` or
//! `Author - Title [epub mobi]`. Before a title can be compared against a
//! wanted item it is flattened: a fixed substitution table collapses
//! punctuation and digits, accented characters fold to ASCII, and runs of
//! whitespace collapse to a single space. Case is preserved; the fuzzy
//! scorer folds case at comparison time.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Ordered substitution table applied to raw titles. Order matters: the
/// ellipsis entry has to run before single dots become spaces.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("...", ""),
    (".", " "),
    (" & ", " "),
    (" = ", " "),
    ("?", ""),
    ("$", "s"),
    (" + ", " "),
    ("\"", ""),
    (",", " "),
    ("*", ""),
    ("(", ""),
    (")", ""),
    ("[", ""),
    ("]", ""),
    ("#", ""),
    ("0", ""),
    ("1", ""),
    ("2", ""),
    ("3", ""),
    ("4", ""),
    ("5", ""),
    ("6", ""),
    ("7", ""),
    ("8", ""),
    ("9", ""),
    ("'", ""),
    (":", ""),
    ("!", ""),
    ("-", " "),
];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\s+").unwrap());

/// Normalize a raw release title into a comparable form.
///
/// Deterministic and pure; an all-digit or all-punctuation title
/// normalizes to an empty string, which downstream scoring tolerates.
pub fn normalize(raw_title: &str) -> String {
    let mut title = raw_title.to_string();
    for (from, to) in SUBSTITUTIONS {
        title = title.replace(from, to);
    }
    let folded = fold_to_ascii(&title);
    WHITESPACE_RUN.replace_all(folded.trim(), " ").into_owned()
}

/// Fold Latin-1 accented characters to ASCII approximations.
///
/// Letters transliterate (À→A, æ→ae, ß→ss), a handful of symbols map to
/// ASCII punctuation, every other non-ASCII character is dropped.
pub fn fold_to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        match code {
            0xc0..=0xc5 => out.push('A'),
            0xc6 => out.push_str("Ae"),
            0xc7 => out.push('C'),
            0xc8..=0xcb => out.push('E'),
            0xcc..=0xcf => out.push('I'),
            0xd0 => out.push_str("Th"),
            0xd1 => out.push('N'),
            0xd2..=0xd6 | 0xd8 => out.push('O'),
            0xd9..=0xdc => out.push('U'),
            0xdd => out.push('Y'),
            0xde | 0xfe => out.push_str("th"),
            0xdf => out.push_str("ss"),
            0xe0..=0xe5 => out.push('a'),
            0xe6 => out.push_str("ae"),
            0xe7 => out.push('c'),
            0x86 | 0x0259 | 0xe8..=0xeb => out.push('e'),
            0xec..=0xef => out.push('i'),
            0xf0 => out.push_str("th"),
            0xf1 => out.push('n'),
            0xf2..=0xf6 | 0xf8 => out.push('o'),
            0xf9..=0xfc => out.push('u'),
            0xfd | 0xff => out.push('y'),
            0xa1 => out.push('!'),
            0xa6 => out.push('|'),
            0xab => out.push_str("<<"),
            0xbb => out.push_str(">>"),
            0xad => out.push('-'),
            0xb4 => out.push('\''),
            0xb7 | 0xd7 => out.push('*'),
            0xbf => out.push('?'),
            0xf7 => out.push('/'),
            _ if code >= 0x80 => {}
            _ => out.push(ch),
        }
    }
    out
}
