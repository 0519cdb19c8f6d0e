//! Token normalisation.

/// Normalise a token pasted from browser dev tools.
///
/// Trims whitespace, drops a `Bearer ` prefix in any case, and strips
/// surrounding quotes.
///
/// # Examples
///
/// ```
/// use cordshift_social::clean_token;
///
/// assert_eq!(clean_token("  Bearer \"abc.def\"  "), "abc.def");
/// assert_eq!(clean_token("'xyz'"), "xyz");
/// ```
pub fn clean_token(raw: &str) -> String {
    let mut token = raw.trim();

    if token
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "))
    {
        token = token[7..].trim();
    }

    token.trim_matches('"').trim_matches('\'').to_string()
}
