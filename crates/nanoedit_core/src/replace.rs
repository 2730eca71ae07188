//! Guarded single-occurrence replacement.

/// Splice `replacement` over `query` at `position` (a char offset).
///
/// The cached match offset a caller holds can go stale if the buffer
/// changed after the search, so the span is re-validated first: unless the
/// text at `position` still equals `query` exactly, nothing is mutated.
/// Replacement is single-shot; advancing to the next match is the caller's
/// job.
///
/// # Returns
/// The spliced text and the char offset immediately after the inserted
/// replacement, or `None` when the target span is stale.
pub fn replace_at(
    text: &str,
    position: usize,
    query: &str,
    replacement: &str,
) -> Option<(String, usize)> {
    if query.is_empty() {
        return None;
    }
    let query_chars = query.chars().count();
    let start = byte_of(text, position)?;
    let end = byte_of(text, position + query_chars)?;
    if &text[start..end] != query {
        return None;
    }

    let mut out = String::with_capacity(text.len() - (end - start) + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    Some((out, position + replacement.chars().count()))
}

/// Byte index of a char offset; `None` when past the end of `text`.
fn byte_of(text: &str, char_offset: usize) -> Option<usize> {
    if char_offset == 0 {
        return Some(0);
    }
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

#[cfg(test)]
mod tests {
    use super::replace_at;

    #[test]
    fn replaces_a_validated_span_and_repositions_after_it() {
        let (text, cursor) = replace_at("say hello twice", 4, "hello", "goodbye").expect("replace");
        assert_eq!(text, "say goodbye twice");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn stale_target_fails_without_mutation() {
        // The buffer changed between search and replace; the span no longer
        // holds the query.
        assert!(replace_at("say hxllo twice", 4, "hello", "goodbye").is_none());
    }

    #[test]
    fn guard_is_case_sensitive_even_though_search_is_not() {
        assert!(replace_at("say Hello twice", 4, "hello", "goodbye").is_none());
    }

    #[test]
    fn span_past_the_end_is_rejected() {
        assert!(replace_at("short", 3, "rtxx", "y").is_none());
        assert!(replace_at("short", 99, "s", "y").is_none());
    }

    #[test]
    fn replacement_at_the_exact_end_of_the_document_works() {
        let (text, cursor) = replace_at("abc end", 4, "end", "finish").expect("replace");
        assert_eq!(text, "abc finish");
        assert_eq!(cursor, 10);
    }

    #[test]
    fn multibyte_offsets_are_char_based() {
        let (text, cursor) = replace_at("héé x", 1, "éé", "o").expect("replace");
        assert_eq!(text, "ho x");
        assert_eq!(cursor, 2);
    }
}
