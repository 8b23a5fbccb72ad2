//! Fragment normalization
//!
//! Document text arrives with non-breaking spaces, typographic characters
//! and layout whitespace that differ between filings. Normalization maps
//! every fragment onto a comparable ASCII string.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

static NBSP_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\x{a0}\s*)+").expect("valid NBSP pattern"));

static CHAR_REF_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(&#\d+;\s*)+").expect("valid character reference pattern"));

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*\]").expect("valid bracket pattern"));

/// Canonicalize a raw text fragment.
///
/// NBSP runs become one space, remaining non-ASCII code points are
/// rewritten as numeric character references, and runs of those
/// references collapse to a single space. The result is trimmed; an empty
/// result means the fragment carries no fact text.
pub fn normalize(raw: &str) -> String {
    let spaced = NBSP_RUN.replace_all(raw, " ");

    let mut ascii = String::with_capacity(spaced.len());
    for c in spaced.chars() {
        if c.is_ascii() {
            ascii.push(c);
        } else {
            // Writing to a String cannot fail
            let _ = write!(ascii, "&#{};", c as u32);
        }
    }

    CHAR_REF_RUN.replace_all(&ascii, " ").trim().to_string()
}

/// Drop any namespace prefixes: `us-gaap:Assets` becomes `Assets`.
pub fn strip_prefix(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Split a camel-case taxonomy name into words.
///
/// `us-gaap:AccountsPayableCurrent` becomes `Accounts Payable Current`.
/// Names that are entirely upper case are returned unchanged.
pub fn detach_words(name: &str) -> String {
    let local = strip_prefix(name);

    let mut cased = local.chars().filter(|c| c.is_alphabetic()).peekable();
    let all_upper = cased.peek().is_some() && cased.all(|c| c.is_uppercase());
    if all_upper {
        return local.to_string();
    }

    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for (i, c) in local.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    words.push(current);
    words.join(" ")
}

/// Remove bracketed qualifiers such as `[Abstract]` or `[Member]` from a label.
pub fn clean_label(label: &str) -> String {
    BRACKETED.replace_all(label, "").trim().to_string()
}
