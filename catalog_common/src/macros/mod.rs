//! # Common macros.

/// A macro that creates a static `regex::Regex` instance from a string literal.
///
/// # Examples
///
/// ```
/// use catalog_common::regex;
///
/// let re = regex!("^\\d{2}-\\d{2}-\\d{4}$");
/// assert!(re.is_match("15-03-1990"));
/// ```
#[macro_export(local_inner_macros)]
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static REGEX: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
        REGEX.get_or_init(|| ::regex::Regex::new($re).unwrap())
    }};
}
