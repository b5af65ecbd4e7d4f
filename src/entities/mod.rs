pub mod artist;
pub mod show;
pub mod venue;

/// Splits a stored genre list into its values.
///
/// Rows written by older versions of the schema hold `{Jazz,Swing}`, so the
/// surrounding braces are stripped before splitting.
pub fn split_genres(stored: &str) -> Vec<String> {
    stored
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .map(|genre| genre.trim().trim_matches('"'))
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_genres<S: AsRef<str>>(genres: &[S]) -> String {
    genres
        .iter()
        .map(|genre| genre.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
