//! Reading contig to bin assignments from delimited text.
//!
//! An assignment file has one line per contig with two fields: the contig
//! name and the name of the bin the contig was assigned to. The delimiter
//! between the fields is not fixed; it is detected from the contents of the
//! file by a [`Sniff`](delimiter::Sniff) strategy before any line is parsed.
//!
//! ```
//! let records = binchord::assignment::parse("c1\tbinA\nc2\tbinA\n\nc3\tbinB\n")?
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(records.len(), 3);
//! assert_eq!(records[2].contig(), "c3");
//! assert_eq!(records[2].bin(), "binB");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::iter::Enumerate;
use std::str::Lines;

pub mod delimiter;
pub mod record;

pub use delimiter::Delimiter;
pub use record::ParseError;
pub use record::Record;

use crate::assignment::delimiter::Frequency;
use crate::assignment::delimiter::Sniff;
use crate::assignment::delimiter::SniffError;

/// An error related to reading assignments.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// No delimiter could be detected.
    Sniff(SniffError),

    /// A line could not be parsed.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Sniff(err) => write!(f, "delimiter error: {err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Parses assignments from text, detecting the delimiter with the default
/// [`Frequency`] heuristic.
///
/// # Examples
///
/// ```
/// let mut records = binchord::assignment::parse("c1,binA\nc2,binA\nc3,binB")?;
///
/// let first = records.next().unwrap()?;
/// assert_eq!(first.contig(), "c1");
/// assert_eq!(first.bin(), "binA");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse(text: &str) -> Result<Records<'_>> {
    parse_with(text, &Frequency)
}

/// Parses assignments from text, detecting the delimiter with the provided
/// strategy.
///
/// # Examples
///
/// ```
/// use binchord::assignment;
/// use binchord::assignment::Delimiter;
/// use binchord::assignment::delimiter::SniffError;
///
/// // Always split on a semicolon, whatever the file looks like.
/// let semicolon = |_: &str| Ok::<_, SniffError>(Delimiter::new(';'));
///
/// let records = assignment::parse_with("c1;binA\nc2;binB", &semicolon)?
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(records[1].bin(), "binB");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_with<'a, S>(text: &'a str, sniffer: &S) -> Result<Records<'a>>
where
    S: Sniff + ?Sized,
{
    let delimiter = sniffer.sniff(text).map_err(Error::Sniff)?;
    Ok(Records::new(text, delimiter))
}

/// An iterator over the assignment [`Record`]s within some text.
///
/// Blank lines are skipped.
#[derive(Debug)]
pub struct Records<'a> {
    /// The numbered lines of the text.
    lines: Enumerate<Lines<'a>>,

    /// The delimiter between fields.
    delimiter: Delimiter,

    /// Whether an error has been returned.
    failed: bool,
}

impl<'a> Records<'a> {
    /// Creates a new [`Records`].
    pub(crate) fn new(text: &'a str, delimiter: Delimiter) -> Self {
        Self {
            lines: text.lines().enumerate(),
            delimiter,
            failed: false,
        }
    }

    /// Gets the delimiter the fields are split on.
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for (i, line) in self.lines.by_ref() {
            let line = line.trim_end();

            if line.is_empty() {
                continue;
            }

            let result = Record::parse(line, self.delimiter, i + 1).map_err(Error::Parse);
            self.failed = result.is_err();
            return Some(result);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn collect(text: &str) -> Result<Vec<(String, String)>> {
        parse(text)?
            .map(|result| result.map(Record::into_parts))
            .collect()
    }

    #[test]
    fn test_comma_separated() -> Result<()> {
        let mut bins = BTreeMap::<String, Vec<String>>::new();

        for (contig, bin) in collect("c1,binA\nc2,binA\nc3,binB")? {
            bins.entry(bin).or_default().push(contig);
        }

        assert_eq!(bins.len(), 2);
        assert_eq!(bins["binA"], vec!["c1", "c2"]);
        assert_eq!(bins["binB"], vec!["c3"]);
        Ok(())
    }

    #[test]
    fn test_tab_separated_with_blank_lines() -> Result<()> {
        let pairs = collect("\nNODE_1_length_500\tbin.1\n\nNODE_2_length_20\tbin.2\r\n\n")?;
        assert_eq!(
            pairs,
            vec![
                (String::from("NODE_1_length_500"), String::from("bin.1")),
                (String::from("NODE_2_length_20"), String::from("bin.2")),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_one_pair_per_line_in_order() -> Result<()> {
        for delimiter in [',', '\t'] {
            let text = (0..100)
                .map(|i| format!("contig_{i}{delimiter}bin_{}", i % 7))
                .collect::<Vec<_>>()
                .join("\n");

            let pairs = collect(&text)?;
            assert_eq!(pairs.len(), 100);

            for (i, (contig, bin)) in pairs.iter().enumerate() {
                assert_eq!(contig, &format!("contig_{i}"));
                assert_eq!(bin, &format!("bin_{}", i % 7));
            }
        }

        Ok(())
    }

    #[test]
    fn test_no_delimiter() {
        let err = parse("").unwrap_err();
        assert_eq!(err, Error::Sniff(SniffError::NoLines));

        let err = parse("c1,binA\nc2\tbinB").unwrap_err();
        assert_eq!(err, Error::Sniff(SniffError::Inconsistent));
    }

    #[test]
    fn test_wrong_field_count_names_the_line() {
        let err = collect("c1,binA\n\nc2,binA,extra\nc3,binB")
            .map(|_| ())
            .unwrap_err();

        // The sniffer only accepts consistent delimiters, so a custom one is
        // needed to reach the field check with a comma.
        assert_eq!(err, Error::Sniff(SniffError::Inconsistent));

        let comma = |_: &str| Ok::<_, SniffError>(Delimiter::new(','));
        let err = parse_with("c1,binA\n\nc2,binA,extra\nc3,binB", &comma)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "parse error: expected 2 fields, found 3: line 3: c2,binA,extra"
        );
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let comma = |_: &str| Ok::<_, SniffError>(Delimiter::new(','));
        let mut records = parse_with("c1\nc2,binA", &comma).unwrap();

        assert!(matches!(records.next(), Some(Err(_))));
        assert!(records.next().is_none());
    }
}
