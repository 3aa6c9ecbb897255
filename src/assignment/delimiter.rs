//! Detecting the delimiter of an assignment file.
//!
//! Detection is a strategy: anything implementing [`Sniff`] can be handed to
//! [`parse_with()`](crate::assignment::parse_with), including plain closures.
//! The default strategy is [`Frequency`].

use std::collections::BTreeMap;

/// Delimiters that are chosen over any other consistent candidate, in order
/// of preference.
pub const PREFERRED: &[char] = &[',', '\t', ';', '|', ' ', ':'];

/// An error related to detecting a delimiter.
#[derive(Debug, Eq, PartialEq)]
pub enum SniffError {
    /// The text has no non-empty lines.
    NoLines,

    /// No character separates the fields consistently on every line.
    Inconsistent,
}

impl std::fmt::Display for SniffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SniffError::NoLines => write!(f, "the file has no non-empty lines"),
            SniffError::Inconsistent => {
                write!(f, "could not find a delimiter used consistently on every line")
            }
        }
    }
}

impl std::error::Error for SniffError {}

/// The character separating the fields of an assignment line.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Delimiter(char);

impl Delimiter {
    /// Creates a new [`Delimiter`].
    pub fn new(c: char) -> Self {
        Self(c)
    }

    /// Gets the delimiter as a [`char`].
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.escape_default())
    }
}

/// A strategy for detecting the delimiter of an assignment file.
pub trait Sniff {
    /// Detects the delimiter used within `text`.
    fn sniff(&self, text: &str) -> Result<Delimiter, SniffError>;
}

impl<F> Sniff for F
where
    F: Fn(&str) -> Result<Delimiter, SniffError>,
{
    fn sniff(&self, text: &str) -> Result<Delimiter, SniffError> {
        self(text)
    }
}

/// Picks the most frequent non-alphanumeric character that occurs the same
/// number of times on every non-empty line.
///
/// A character is a candidate when it occurs at least once, and equally often,
/// on every non-empty line (trailing whitespace is ignored). If any of the
/// [`PREFERRED`] delimiters is a candidate, the first such one wins.
/// Otherwise, the candidate with the highest count per line wins, with ties
/// going to the lowest code point.
///
/// # Examples
///
/// ```
/// use binchord::assignment::delimiter::Frequency;
/// use binchord::assignment::delimiter::Sniff as _;
///
/// let delimiter = Frequency.sniff("NODE_1_length_500\tbin.1\nNODE_2_length_90\tbin.2")?;
/// assert_eq!(delimiter.as_char(), '\t');
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Frequency;

impl Sniff for Frequency {
    fn sniff(&self, text: &str) -> Result<Delimiter, SniffError> {
        let mut lines = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty());

        let mut candidates = match lines.next() {
            Some(line) => count(line),
            None => return Err(SniffError::NoLines),
        };

        for line in lines {
            let counts = count(line);
            candidates.retain(|c, n| counts.get(c) == Some(n));

            if candidates.is_empty() {
                break;
            }
        }

        if let Some(c) = PREFERRED.iter().find(|c| candidates.contains_key(*c)) {
            return Ok(Delimiter(*c));
        }

        // `BTreeMap` iterates in ascending code point order and `max_by_key`
        // keeps the last maximum, so the iteration is reversed.
        candidates
            .into_iter()
            .rev()
            .max_by_key(|(_, n)| *n)
            .map(|(c, _)| Delimiter(c))
            .ok_or(SniffError::Inconsistent)
    }
}

/// Counts the non-alphanumeric characters of a line.
fn count(line: &str) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();

    for c in line.chars().filter(|c| !c.is_alphanumeric()) {
        *counts.entry(c).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(text: &str) -> Result<char, SniffError> {
        Frequency.sniff(text).map(|d| d.as_char())
    }

    #[test]
    fn test_common_delimiters() -> Result<(), SniffError> {
        assert_eq!(sniff("c1,binA\nc2,binA\nc3,binB")?, ',');
        assert_eq!(sniff("c1\tbinA\nc2\tbinA\n")?, '\t');
        assert_eq!(sniff("c1;binA\n\nc2;binB")?, ';');
        assert_eq!(sniff("c1 binA\nc2 binB")?, ' ');
        Ok(())
    }

    #[test]
    fn test_preferred_wins_over_more_frequent() -> Result<(), SniffError> {
        assert_eq!(sniff("a_b_c_d,bin\ne_f_g_h,bin")?, ',');
        Ok(())
    }

    #[test]
    fn test_unusual_delimiter() -> Result<(), SniffError> {
        assert_eq!(sniff("c1=binA\nc2=binB")?, '=');
        Ok(())
    }

    #[test]
    fn test_tie_goes_to_lowest_code_point() -> Result<(), SniffError> {
        assert_eq!(sniff("c1=bin#A\nc2=bin#B")?, '#');
        Ok(())
    }

    #[test]
    fn test_trailing_whitespace_is_ignored() -> Result<(), SniffError> {
        assert_eq!(sniff("c1,binA  \nc2,binB\t\n")?, ',');
        Ok(())
    }

    #[test]
    fn test_failures() {
        assert_eq!(sniff(""), Err(SniffError::NoLines));
        assert_eq!(sniff("\n \n\t\n"), Err(SniffError::NoLines));
        assert_eq!(sniff("c1binA\nc2binB"), Err(SniffError::Inconsistent));
        assert_eq!(sniff("c1,binA\nc2,,binB"), Err(SniffError::Inconsistent));
    }

    #[test]
    fn test_closure_strategy() -> Result<(), SniffError> {
        let always_pipe = |_: &str| Ok::<_, SniffError>(Delimiter::new('|'));
        assert_eq!(always_pipe.sniff("anything")?.as_char(), '|');
        Ok(())
    }
}
