//! Regex match collection, highlight segmentation, and replacement.
//!
//! The engine wraps the `regex` crate with bounded iteration and preview
//! reconstruction:
//! - `compile_regex` turns a pattern plus JS-style flag letters into a
//!   `CompiledPattern`; compilation failures come back as strings, never
//!   panics.
//! - `collect_matches` walks the haystack with an explicit local cursor
//!   (no hidden pattern-object state), recording up to `limit` matches.
//! - `build_highlight_segments` partitions a bounded preview of the input
//!   into alternating matched/unmatched runs whose concatenation equals
//!   the preview exactly.

use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::BTreeMap;

/// Flag letters accepted by `compile_regex`, in canonical order.
pub const ALLOWED_FLAGS: [char; 6] = ['g', 'i', 'm', 's', 'u', 'y'];

/// A compiled pattern plus the two flags the regex crate has no syntax
/// for: `global` drives repeated collection, `sticky` anchors each match
/// attempt to the cursor.
#[derive(Debug)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub global: bool,
    pub sticky: bool,
}

#[derive(Debug, Clone, Serialize)]
/// One match occurrence. Offsets are byte positions into the scanned
/// text; `end - index` equals the matched text's byte length. Unmatched
/// capture groups are `None`.
pub struct RegexMatch {
    pub index: usize,
    pub end: usize,
    pub text: String,
    pub groups: Vec<Option<String>>,
    pub named_groups: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
/// All matches recorded for one scan. `truncated` is set when the match
/// limit stopped collection.
pub struct MatchCollection {
    pub matches: Vec<RegexMatch>,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
/// A run of preview text, either inside a match or between matches.
/// `match_index` points into the caller's original match array.
pub struct HighlightSegment {
    pub text: String,
    pub is_match: bool,
    pub match_index: Option<usize>,
}

#[derive(Debug, Serialize)]
/// Preview text split into highlight segments. `truncated` is set when
/// the input was longer than the preview window.
pub struct HighlightResult {
    pub preview_text: String,
    pub segments: Vec<HighlightSegment>,
    pub truncated: bool,
}

/// Filter a flag list against `ALLOWED_FLAGS`, emitting allowed letters
/// in canonical order, deduplicated.
pub fn normalize_flags<S: AsRef<str>>(flags: &[S]) -> String {
    let mut out = String::new();
    for allowed in ALLOWED_FLAGS {
        let present = flags.iter().any(|f| {
            let f = f.as_ref();
            f.len() == 1 && f.chars().next() == Some(allowed)
        });
        if present {
            out.push(allowed);
        }
    }
    out
}

/// Compile `pattern` with JS-style flag letters.
///
/// `i`, `m`, `s`, and `u` map onto builder options; `g` and `y` are
/// carried on the result for the collector. Unknown letters and invalid
/// patterns return the error message as a string.
pub fn compile_regex(pattern: &str, flags: &str) -> Result<CompiledPattern, String> {
    let mut builder = RegexBuilder::new(pattern);
    let mut global = false;
    let mut sticky = false;
    for flag in flags.chars() {
        match flag {
            'g' => global = true,
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'u' => {
                builder.unicode(true);
            }
            'y' => sticky = true,
            other => return Err(format!("unsupported flag '{}'", other)),
        }
    }
    let regex = builder.build().map_err(|e| e.to_string())?;
    Ok(CompiledPattern {
        regex,
        global,
        sticky,
    })
}

fn record_match(regex: &Regex, caps: &Captures) -> RegexMatch {
    let (index, end, text) = match caps.get(0) {
        Some(m) => (m.start(), m.end(), m.as_str().to_string()),
        None => (0, 0, String::new()),
    };
    let groups = (1..caps.len())
        .map(|i| caps.get(i).map(|g| g.as_str().to_string()))
        .collect();
    let mut named_groups = BTreeMap::new();
    for name in regex.capture_names().flatten() {
        if let Some(group) = caps.name(name) {
            named_groups.insert(name.to_string(), group.as_str().to_string());
        }
    }
    RegexMatch {
        index,
        end,
        text,
        groups,
        named_groups,
    }
}

/// Byte offset of the next char boundary after `pos`.
fn advance_one(text: &str, pos: usize) -> usize {
    match text[pos..].chars().next() {
        Some(c) => pos + c.len_utf8(),
        None => pos + 1,
    }
}

/// Collect matches of `pattern` over `text`, bounded by `limit`.
///
/// Non-global patterns get exactly one match attempt and are never
/// truncated. Global patterns iterate from a local cursor; a zero-length
/// match advances the cursor one character so collection always
/// terminates. Sticky patterns only accept a match that starts exactly
/// at the cursor.
pub fn collect_matches(text: &str, pattern: &CompiledPattern, limit: usize) -> MatchCollection {
    let mut matches: Vec<RegexMatch> = Vec::new();
    let mut truncated = false;
    let mut cursor = 0usize;
    loop {
        let caps = match pattern.regex.captures_at(text, cursor) {
            Some(c) => c,
            None => break,
        };
        let (start, end) = match caps.get(0) {
            Some(m) => (m.start(), m.end()),
            None => (cursor, cursor),
        };
        if pattern.sticky && start != cursor {
            break;
        }
        matches.push(record_match(&pattern.regex, &caps));
        if !pattern.global {
            break;
        }
        if matches.len() >= limit {
            truncated = true;
            break;
        }
        cursor = if end == start {
            advance_one(text, end)
        } else {
            end
        };
        if cursor > text.len() {
            break;
        }
    }
    MatchCollection { matches, truncated }
}

/// Largest char-boundary offset that is `<= i`.
fn floor_char_boundary(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    let mut i = i;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Split a bounded preview of `text` into matched/unmatched segments.
///
/// Matches are ordered by ascending index internally (callers do not
/// have to pre-sort), but each match segment is tagged with the match's
/// position in the caller's original array. Empty matches, matches
/// starting beyond the preview, and spans already consumed by an
/// earlier match are skipped. Concatenating all segment texts
/// reconstructs the preview exactly.
pub fn build_highlight_segments(
    text: &str,
    matches: &[RegexMatch],
    max_length: usize,
) -> HighlightResult {
    let window = floor_char_boundary(text, max_length);
    let preview = &text[..window];
    let truncated = text.len() > max_length;

    let mut order: Vec<usize> = (0..matches.len()).collect();
    order.sort_by_key(|&i| matches[i].index);

    let mut segments: Vec<HighlightSegment> = Vec::new();
    let mut cursor = 0usize;
    for original_index in order {
        let m = &matches[original_index];
        if m.text.is_empty() || m.index >= window {
            continue;
        }
        let end = m.end.min(window);
        if end <= cursor {
            continue;
        }
        let start = m.index.max(cursor);
        if start > cursor {
            segments.push(HighlightSegment {
                text: text[cursor..start].to_string(),
                is_match: false,
                match_index: None,
            });
        }
        segments.push(HighlightSegment {
            text: text[start..end].to_string(),
            is_match: true,
            match_index: Some(original_index),
        });
        cursor = end;
    }
    if cursor < preview.len() {
        segments.push(HighlightSegment {
            text: text[cursor..window].to_string(),
            is_match: false,
            match_index: None,
        });
    }
    HighlightResult {
        preview_text: preview.to_string(),
        segments,
        truncated,
    }
}

/// Rewrite matches of `pattern` using a replacement template.
///
/// Global patterns replace every occurrence (bounded by `limit` when
/// nonzero); non-global patterns replace at most the first. The template
/// uses the regex crate's `$1`/`$name` interpolation. Returns the
/// rewritten text and the number of replacements made.
pub fn apply_replace(
    text: &str,
    pattern: &CompiledPattern,
    template: &str,
    limit: usize,
) -> (String, usize) {
    let max = if pattern.global { limit } else { 1 };
    let available = pattern.regex.find_iter(text).count();
    let replaced = if max == 0 { available } else { available.min(max) };
    let result = pattern.regex.replacen(text, max, template);
    (result.into_owned(), replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(segments: &[HighlightSegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_normalize_flags_canonical_order_dedup() {
        let flags = ["i", "g", "g", "z"].map(String::from);
        assert_eq!(normalize_flags(&flags), "gi");
        assert_eq!(normalize_flags::<&str>(&[]), "");
        let all = ["y", "u", "s", "m", "i", "g"];
        assert_eq!(normalize_flags(&all), "gimsuy");
    }

    #[test]
    fn test_compile_invalid_pattern_returns_error_string() {
        let err = compile_regex("(unclosed", "g").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_compile_rejects_unknown_flag() {
        let err = compile_regex("a", "gx").unwrap_err();
        assert!(err.contains('x'));
    }

    #[test]
    fn test_non_global_single_attempt() {
        let pattern = compile_regex(r"\d+", "").unwrap();
        let result = collect_matches("a1 b22 c333", &pattern, 10);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].text, "1");
        assert!(!result.truncated);
    }

    #[test]
    fn test_non_global_no_match() {
        let pattern = compile_regex(r"\d", "").unwrap();
        let result = collect_matches("abc", &pattern, 10);
        assert!(result.matches.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn test_global_collects_all_with_groups() {
        let pattern = compile_regex(r"#(\d+)", "g").unwrap();
        let result = collect_matches("Order #1 #2 #3", &pattern, 10);
        assert_eq!(result.matches.len(), 3);
        assert!(!result.truncated);
        let m = &result.matches[1];
        assert_eq!(m.text, "#2");
        assert_eq!(m.index, 9);
        assert_eq!(m.end, 11);
        assert_eq!(m.groups, vec![Some("2".to_string())]);
    }

    #[test]
    fn test_global_limit_truncates() {
        let pattern = compile_regex(r"#(\d+)", "g").unwrap();
        let result = collect_matches("Order #1 #2 #3", &pattern, 2);
        assert_eq!(result.matches.len(), 2);
        assert!(result.truncated);
    }

    #[test]
    fn test_named_groups_recorded() {
        let pattern = compile_regex(r"(?P<key>\w+)=(?P<value>\w+)", "g").unwrap();
        let result = collect_matches("a=1 b=2", &pattern, 10);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(
            result.matches[0].named_groups.get("key").map(String::as_str),
            Some("a")
        );
        assert_eq!(
            result.matches[1]
                .named_groups
                .get("value")
                .map(String::as_str),
            Some("2")
        );
    }

    #[test]
    fn test_unmatched_group_is_none() {
        let pattern = compile_regex(r"(a)|(b)", "g").unwrap();
        let result = collect_matches("ab", &pattern, 10);
        assert_eq!(result.matches[0].groups, vec![Some("a".to_string()), None]);
        assert_eq!(result.matches[1].groups, vec![None, Some("b".to_string())]);
    }

    #[test]
    fn test_zero_length_matches_terminate() {
        let pattern = compile_regex(r"\b", "g").unwrap();
        let result = collect_matches("one two", &pattern, 100);
        assert_eq!(result.matches.len(), 4);
        assert!(result.matches.iter().all(|m| m.index == m.end));
        assert!(!result.truncated);
    }

    #[test]
    fn test_zero_length_matches_on_multibyte_text() {
        let pattern = compile_regex("", "g").unwrap();
        let text = "héé";
        let result = collect_matches(text, &pattern, 100);
        // One empty match per character boundary, including the end.
        assert_eq!(result.matches.len(), text.chars().count() + 1);
    }

    #[test]
    fn test_case_insensitive_flag() {
        let pattern = compile_regex("select", "gi").unwrap();
        let result = collect_matches("SELECT Select select", &pattern, 10);
        assert_eq!(result.matches.len(), 3);
    }

    #[test]
    fn test_sticky_stops_at_first_gap() {
        let pattern = compile_regex(r"\d", "gy").unwrap();
        let result = collect_matches("12a34", &pattern, 10);
        assert_eq!(result.matches.len(), 2);
        let pattern = compile_regex(r"\d", "y").unwrap();
        let result = collect_matches("a1", &pattern, 10);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_highlight_reconstructs_text() {
        let pattern = compile_regex(r"\d+", "g").unwrap();
        let text = "a1 bb22 ccc333";
        let collection = collect_matches(text, &pattern, 10);
        let result = build_highlight_segments(text, &collection.matches, text.len());
        assert_eq!(concat(&result.segments), text);
        assert_eq!(result.preview_text, text);
        assert!(!result.truncated);
        let matched: Vec<_> = result
            .segments
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(matched, vec!["1", "22", "333"]);
    }

    #[test]
    fn test_highlight_match_index_points_into_original_array() {
        let pattern = compile_regex(r"\d+", "g").unwrap();
        let text = "x1y2";
        let collection = collect_matches(text, &pattern, 10);
        let result = build_highlight_segments(text, &collection.matches, text.len());
        let indices: Vec<_> = result
            .segments
            .iter()
            .filter_map(|s| s.match_index)
            .collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_highlight_unsorted_input_is_sorted_internally() {
        let pattern = compile_regex(r"\d+", "g").unwrap();
        let text = "x1y2";
        let mut matches = collect_matches(text, &pattern, 10).matches;
        matches.reverse();
        let result = build_highlight_segments(text, &matches, text.len());
        assert_eq!(concat(&result.segments), text);
        // Tags still point at the reversed (caller-supplied) array.
        let indices: Vec<_> = result
            .segments
            .iter()
            .filter_map(|s| s.match_index)
            .collect();
        assert_eq!(indices, vec![1, 0]);
    }

    #[test]
    fn test_highlight_skips_empty_and_out_of_window_matches() {
        let empty = RegexMatch {
            index: 0,
            end: 0,
            text: String::new(),
            groups: Vec::new(),
            named_groups: BTreeMap::new(),
        };
        let beyond = RegexMatch {
            index: 50,
            end: 52,
            text: "zz".to_string(),
            groups: Vec::new(),
            named_groups: BTreeMap::new(),
        };
        let result = build_highlight_segments("abcdef", &[empty, beyond], 4);
        assert_eq!(result.preview_text, "abcd");
        assert!(result.truncated);
        assert_eq!(result.segments.len(), 1);
        assert!(!result.segments[0].is_match);
        assert_eq!(concat(&result.segments), "abcd");
    }

    #[test]
    fn test_highlight_clips_match_straddling_window() {
        let m = RegexMatch {
            index: 2,
            end: 6,
            text: "cdef".to_string(),
            groups: Vec::new(),
            named_groups: BTreeMap::new(),
        };
        let result = build_highlight_segments("abcdef", &[m], 4);
        assert_eq!(concat(&result.segments), "abcd");
        assert_eq!(result.segments[1].text, "cd");
        assert!(result.segments[1].is_match);
    }

    #[test]
    fn test_highlight_overlapping_duplicate_consumed() {
        let first = RegexMatch {
            index: 0,
            end: 3,
            text: "abc".to_string(),
            groups: Vec::new(),
            named_groups: BTreeMap::new(),
        };
        let duplicate = RegexMatch {
            index: 1,
            end: 3,
            text: "bc".to_string(),
            groups: Vec::new(),
            named_groups: BTreeMap::new(),
        };
        let result = build_highlight_segments("abcdef", &[first, duplicate], 6);
        assert_eq!(concat(&result.segments), "abcdef");
        let match_count = result.segments.iter().filter(|s| s.is_match).count();
        assert_eq!(match_count, 1);
    }

    #[test]
    fn test_highlight_window_clamps_to_char_boundary() {
        // 'é' is two bytes; a window of 2 would split it.
        let text = "aé b";
        let result = build_highlight_segments(text, &[], 2);
        assert_eq!(result.preview_text, "a");
        assert!(result.truncated);
        assert_eq!(concat(&result.segments), "a");
    }

    #[test]
    fn test_apply_replace_global_and_single() {
        let pattern = compile_regex(r"\d+", "g").unwrap();
        let (out, n) = apply_replace("a1 b22", &pattern, "#", 0);
        assert_eq!(out, "a# b#");
        assert_eq!(n, 2);

        let pattern = compile_regex(r"\d+", "").unwrap();
        let (out, n) = apply_replace("a1 b22", &pattern, "#", 0);
        assert_eq!(out, "a# b22");
        assert_eq!(n, 1);
    }

    #[test]
    fn test_apply_replace_respects_limit_and_templates() {
        let pattern = compile_regex(r"(\w)=(\w)", "g").unwrap();
        let (out, n) = apply_replace("a=1 b=2 c=3", &pattern, "$2=$1", 2);
        assert_eq!(out, "1=a 2=b c=3");
        assert_eq!(n, 2);
    }
}
