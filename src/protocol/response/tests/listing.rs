//! Tests for whitelist list-response parsing

use crate::protocol::response::*;

#[test]
fn test_empty_whitelist() {
    assert!(parse_whitelist("There are no whitelisted players").is_empty());
    assert!(parse_whitelist("§eThere are no whitelisted players").is_empty());
    assert!(parse_whitelist("Нет игроков в белом списке").is_empty());
}

#[test]
fn test_prefixed_list() {
    assert_eq!(
        parse_whitelist("There are 3 whitelisted players: Alex, Steve, Notch_99"),
        vec!["Alex", "Steve", "Notch_99"]
    );
}

#[test]
fn test_prefixed_list_modern_wording() {
    assert_eq!(
        parse_whitelist("There are 2 whitelisted player(s): Alex, Steve"),
        vec!["Alex", "Steve"]
    );
}

#[test]
fn test_prefixed_list_russian() {
    assert_eq!(
        parse_whitelist("Игроки в белом списке: Alex, Steve"),
        vec!["Alex", "Steve"]
    );
}

#[test]
fn test_prefixed_list_preserves_order_and_case() {
    assert_eq!(
        parse_whitelist("whitelisted players: zed, Alpha, mIxEd"),
        vec!["zed", "Alpha", "mIxEd"]
    );
}

#[test]
fn test_prefixed_list_skips_empty_entries() {
    assert_eq!(
        parse_whitelist("There are 2 whitelisted players: Alex,, Steve, "),
        vec!["Alex", "Steve"]
    );
}

#[test]
fn test_prefixed_list_with_nothing_after_colon() {
    assert!(parse_whitelist("There are 0 whitelisted players:").is_empty());
}

#[test]
fn test_fallback_extracts_nicknames() {
    assert_eq!(
        parse_whitelist("Whitelist: Alex Steve123 there are players"),
        vec!["Whitelist", "Alex", "Steve123"]
    );
}

#[test]
fn test_fallback_drops_template_words_case_insensitively() {
    assert_eq!(
        parse_whitelist("THERE ARE Player Players Bob_1"),
        vec!["Bob_1"]
    );
}

#[test]
fn test_fallback_length_bounds() {
    assert_eq!(
        parse_whitelist("ab abc ABCDEFGHIJKLMNOP ABCDEFGHIJKLMNOPQ"),
        vec!["abc", "ABCDEFGHIJKLMNOP"]
    );
}

#[test]
fn test_fallback_ignores_tokens_glued_to_cyrillic() {
    // "Steveигрок" is one word run; it is not a nickname
    assert_eq!(parse_whitelist("Steveигрок Alex"), vec!["Alex"]);
}

#[test]
fn test_unrecognized_garbage_yields_no_names() {
    assert!(parse_whitelist("!!! ?? --").is_empty());
}

#[test]
fn test_names_containing_error_are_listed() {
    let reply = "There are 2 whitelisted players: Terror99, MrError";
    assert!(is_list_response(reply));
    assert_eq!(parse_whitelist(reply), vec!["Terror99", "MrError"]);
}

#[test]
fn test_list_shape_detection() {
    assert!(is_list_response("§eThere are no whitelisted players"));
    assert!(is_list_response("Игроки в белом списке: Alex"));
    assert!(!is_list_response(
        "Unknown or incomplete command, see below for error"
    ));
}
