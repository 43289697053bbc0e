//! Country-code to flag lookup.
//!
//! A two-letter ISO 3166-1 alpha-2 code maps to the pair of Unicode regional
//! indicator symbols that terminals and browsers render as a flag. Codes of
//! any other shape have no flag.

/// Code point of REGIONAL INDICATOR SYMBOL LETTER A.
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Flag emoji for a two-letter country code, case-insensitive.
///
/// # Examples
///
/// ```
/// use tour_dates::flag::flag_emoji;
///
/// assert_eq!(flag_emoji("FR").as_deref(), Some("🇫🇷"));
/// assert_eq!(flag_emoji("FRA"), None);
/// ```
pub fn flag_emoji(country: &str) -> Option<String> {
    let letters: Vec<u8> = country.bytes().collect();
    if letters.len() != 2 || !letters.iter().all(u8::is_ascii_alphabetic) {
        return None;
    }
    letters
        .iter()
        .map(|b| char::from_u32(REGIONAL_INDICATOR_A + u32::from(b.to_ascii_uppercase() - b'A')))
        .collect()
}
