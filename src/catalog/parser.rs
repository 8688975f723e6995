//! Text helpers shared by the search and detail page parsers

use scraper::{ElementRef, Selector};

/// Returns the text content of an element with whitespace runs collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the text of the first descendant matching `selector`
pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

/// Returns a non-blank attribute of the first descendant matching `selector`
pub(crate) fn first_attr<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    attr: &str,
) -> Option<&'a str> {
    scope
        .select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parses a rating as displayed by the site
///
/// Reads the leading number of the text, accepting a decimal comma
/// ("4,5 / 5" is 4.5). Unparseable text and a zero rating both yield `None`.
///
/// # Examples
///
/// ```
/// use audioteka_provider::catalog::parse_rating;
///
/// assert_eq!(parse_rating("4.5"), Some(4.5));
/// assert_eq!(parse_rating(" 4,2 (1234 ocen)"), Some(4.2));
/// assert_eq!(parse_rating("brak ocen"), None);
/// ```
pub fn parse_rating(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");

    let end = normalized
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(normalized.len());
    let mut number = &normalized[..end];

    // "4.5.1" reads as 4.5
    if let Some((second_dot, _)) = number.match_indices('.').nth(1) {
        number = &number[..second_dot];
    }

    number
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite() && *rating != 0.0)
}
