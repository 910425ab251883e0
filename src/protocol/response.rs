//! Server response classification
//!
//! Minecraft servers answer RCON commands with human-readable text in the
//! server's locale, optionally decorated with `§` formatting codes. This
//! module turns that text into a closed set of semantic classes.
//!
//! # Policy
//!
//! Classification is table-driven: every known phrasing, in every supported
//! locale, is one row of [`PHRASES`]. A row is a list of lowercase fragments
//! that must all appear, in order, in the lowercased response. Rows are
//! checked top to bottom and the first match wins, so more specific classes
//! (already present, not present) sit above the generic success phrases
//! their text may also contain.
//!
//! Text that matches no row is [`ResponseClass::Unclassified`]. The
//! classifier never guesses success.
//!
//! Adding a locale means adding rows, not code.

use crate::types::is_nickname_char;

/// Formatting escape prefix used by Minecraft chat components
pub const FORMAT_PREFIX: char = '§';

/// Semantic class of a server response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseClass {
    /// The requested mutation was applied
    Success,
    /// Add of a name already on the list
    AlreadyPresent,
    /// Remove of a name not on the list
    NotPresent,
    /// The server does not know this player
    NotFound,
    /// The server reported an error; carries the cleaned text
    Failed(String),
    /// Matched no known phrase; carries the cleaned text
    Unclassified(String),
}

/// Class assigned by one phrase-table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhraseClass {
    AlreadyPresent,
    NotPresent,
    NotFound,
    Success,
    Failed,
}

/// Ordered phrase table: `(fragments in order, class)`
const PHRASES: &[(&[&str], PhraseClass)] = &[
    // Already present (en)
    (&["player is already whitelisted"], PhraseClass::AlreadyPresent),
    (&["already whitelisted"], PhraseClass::AlreadyPresent),
    (&["already in the whitelist"], PhraseClass::AlreadyPresent),
    // Already present (ru)
    (&["уже добавлен в белый список"], PhraseClass::AlreadyPresent),
    (&["уже", "в белом списке"], PhraseClass::AlreadyPresent),
    (&["уже", "вайтлист"], PhraseClass::AlreadyPresent),
    // Not present (en)
    (&["player is not whitelisted"], PhraseClass::NotPresent),
    (&["not whitelisted"], PhraseClass::NotPresent),
    (&["not in the whitelist"], PhraseClass::NotPresent),
    // Not present (ru)
    (&["не находится в белом списке"], PhraseClass::NotPresent),
    (&["нет в белом списке"], PhraseClass::NotPresent),
    // Unknown player
    (&["does not exist"], PhraseClass::NotFound),
    (&["не существует"], PhraseClass::NotFound),
    // Mutation applied (en)
    (&["added", "to the whitelist"], PhraseClass::Success),
    (&["removed", "from the whitelist"], PhraseClass::Success),
    (&["removed from whitelist"], PhraseClass::Success),
    // Mutation applied (ru)
    (&["добавлен в белый список"], PhraseClass::Success),
    (&["удален из белого списка"], PhraseClass::Success),
    (&["удалён из белого списка"], PhraseClass::Success),
    // Generic failure
    (&["error"], PhraseClass::Failed),
    (&["ошибка"], PhraseClass::Failed),
];

/// Phrases meaning the whitelist is empty
const EMPTY_LIST_PHRASES: &[&str] = &[
    "there are no whitelisted players",
    "нет игроков в белом списке",
];

/// Prefixes introducing the comma-separated player section
const LIST_PREFIXES: &[&str] = &[
    "whitelisted players:",
    "whitelisted player(s):",
    "игроки в белом списке:",
];

/// Words from the list-response template that look like nicknames
const LIST_STOPLIST: &[&str] = &["there", "are", "whitelisted", "players", "player"];

/// Substrings marking an arbitrary command as failed
const ERROR_MARKERS: &[&str] = &["error", "ошибка"];

/// Check whether `c` is a formatting code character (`0-9`, `a-f`, `k-o`, `r`)
#[inline]
const fn is_format_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}

/// Remove `§x` formatting escapes and surrounding whitespace
///
/// # Examples
/// ```
/// use rcon_whitelist::protocol::strip_formatting;
///
/// assert_eq!(strip_formatting("§aAdded §lSteve§r to the whitelist "), "Added Steve to the whitelist");
/// ```
#[must_use]
pub fn strip_formatting(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == FORMAT_PREFIX
            && let Some(&code) = chars.peek()
            && is_format_code(code)
        {
            chars.next();
            continue;
        }
        out.push(c);
    }

    out.trim().to_string()
}

/// True when every fragment occurs in `haystack`, in order, without overlap
fn contains_in_order(haystack: &str, fragments: &[&str]) -> bool {
    let mut rest = haystack;
    for fragment in fragments {
        match rest.find(fragment) {
            Some(pos) => rest = &rest[pos + fragment.len()..],
            None => return false,
        }
    }
    true
}

/// Classify a raw command response
///
/// The body is cleaned with [`strip_formatting`] first; the text carried by
/// `Failed`/`Unclassified` is the cleaned text.
#[must_use]
pub fn classify(raw: &str) -> ResponseClass {
    let text = strip_formatting(raw);
    let lower = text.to_lowercase();

    let matched = PHRASES
        .iter()
        .find(|(fragments, _)| contains_in_order(&lower, fragments))
        .map(|(_, class)| *class);

    match matched {
        Some(PhraseClass::AlreadyPresent) => ResponseClass::AlreadyPresent,
        Some(PhraseClass::NotPresent) => ResponseClass::NotPresent,
        Some(PhraseClass::NotFound) => ResponseClass::NotFound,
        Some(PhraseClass::Success) => ResponseClass::Success,
        Some(PhraseClass::Failed) => ResponseClass::Failed(text),
        None => ResponseClass::Unclassified(text),
    }
}

/// True when an arbitrary command's response reports an error
///
/// Arbitrary commands have no fixed success vocabulary, so absence of an
/// error marker is the only success signal available.
#[must_use]
pub fn is_error_response(raw: &str) -> bool {
    let lower = strip_formatting(raw).to_lowercase();
    ERROR_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// True when `raw` has the shape of a whitelist listing
///
/// Either the empty-list phrase or a recognized player-section prefix is
/// present. Names inside a listing are never checked for error markers, so
/// a player called `Terror99` does not turn the listing into a failure.
#[must_use]
pub fn is_list_response(raw: &str) -> bool {
    let lower = strip_formatting(raw).to_lowercase();
    EMPTY_LIST_PHRASES.iter().any(|p| lower.contains(p))
        || LIST_PREFIXES.iter().any(|p| lower.contains(p))
}

/// Parse the response of the whitelist list command
///
/// 1. An explicit "no whitelisted players" phrase yields an empty list.
/// 2. A recognized prefix (`whitelisted players:`) is followed by a
///    comma-separated section; everything after the first `:` is split.
/// 3. Otherwise nickname-shaped tokens are extracted and template words
///    from [`LIST_STOPLIST`] dropped.
#[must_use]
pub fn parse_whitelist(raw: &str) -> Vec<String> {
    let text = strip_formatting(raw);
    let lower = text.to_lowercase();

    if EMPTY_LIST_PHRASES.iter().any(|p| lower.contains(p)) {
        return Vec::new();
    }

    if LIST_PREFIXES.iter().any(|p| lower.contains(p))
        && let Some((_, players)) = text.split_once(':')
    {
        return players
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }

    extract_nickname_tokens(&text)
}

/// Fallback tokenizer for list responses of unknown shape
///
/// A token is a maximal run of word characters (any alphanumeric or `_`,
/// Unicode included); it is kept when it is 3-16 ASCII nickname characters
/// and not a template word.
fn extract_nickname_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| (3..=16).contains(&token.len()))
        .filter(|token| token.chars().all(is_nickname_char))
        .filter(|token| !LIST_STOPLIST.contains(&token.to_lowercase().as_str()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests;
