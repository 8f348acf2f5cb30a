//! Line splitting for the MovieLens CSV dialect.

/// Separator between genre names inside the `genres` column.
pub const GENRE_DELIMITER: char = '|';

/// Split one CSV line into fields.
///
/// A delimiter between a pair of double quotes is literal content, not a
/// split point. Quote characters are kept in the field as-is and nothing is
/// trimmed, so `1,"Toy Story, The",Animation` yields
/// `["1", "\"Toy Story, The\"", "Animation"]`.
///
/// Unbalanced quotes do not fail: everything after the unmatched quote ends
/// up in the last field.
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, ch) in line.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(&line[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    fields.push(&line[start..]);

    fields
}

/// Split a `genres` column into genre names, skipping empty segments.
///
/// `Drama||War` yields `Drama` and `War`. The Java importer this replaces
/// merged a `Genre` named `""` for the empty segment; no such node is created
/// here.
pub fn split_genres(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(GENRE_DELIMITER)
        .filter(|genre| !genre.is_empty())
}
