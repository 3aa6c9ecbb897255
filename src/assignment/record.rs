//! A single contig to bin assignment.

use crate::assignment::Delimiter;

/// The number of fields expected on every assignment line.
pub const NUM_FIELDS: usize = 2;

/// An error associated with parsing an assignment line.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The line did not split into exactly two fields.
    InvalidFieldCount {
        /// The (1-based) line number.
        line_no: usize,

        /// The offending line.
        line: String,

        /// The number of fields found.
        found: usize,
    },

    /// One of the two fields was empty.
    EmptyField {
        /// The (1-based) line number.
        line_no: usize,

        /// The offending line.
        line: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFieldCount {
                line_no,
                line,
                found,
            } => write!(
                f,
                "expected {NUM_FIELDS} fields, found {found}: line {line_no}: {line}"
            ),
            ParseError::EmptyField { line_no, line } => {
                write!(f, "empty contig or bin name: line {line_no}: {line}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// An assignment of a contig to a bin.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record {
    /// The contig name.
    contig: String,

    /// The bin name.
    bin: String,
}

impl Record {
    /// Creates a new [`Record`].
    pub fn new(contig: impl Into<String>, bin: impl Into<String>) -> Self {
        Self {
            contig: contig.into(),
            bin: bin.into(),
        }
    }

    /// Parses a record from a single (non-empty) line.
    ///
    /// # Examples
    ///
    /// ```
    /// use binchord::assignment::Delimiter;
    /// use binchord::assignment::Record;
    ///
    /// let record = Record::parse("c1\tbinA", Delimiter::new('\t'), 1)?;
    /// assert_eq!(record, Record::new("c1", "binA"));
    ///
    /// let err = Record::parse("c1\tbinA\tbinB", Delimiter::new('\t'), 7).unwrap_err();
    /// assert_eq!(err.to_string(), "expected 2 fields, found 3: line 7: c1\tbinA\tbinB");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(line: &str, delimiter: Delimiter, line_no: usize) -> Result<Self, ParseError> {
        let fields = line.split(delimiter.as_char()).collect::<Vec<_>>();

        if fields.len() != NUM_FIELDS {
            return Err(ParseError::InvalidFieldCount {
                line_no,
                line: line.into(),
                found: fields.len(),
            });
        }

        if fields.iter().any(|field| field.is_empty()) {
            return Err(ParseError::EmptyField {
                line_no,
                line: line.into(),
            });
        }

        Ok(Self::new(fields[0], fields[1]))
    }

    /// Gets the contig name.
    pub fn contig(&self) -> &str {
        &self.contig
    }

    /// Gets the bin name.
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Consumes self and returns the contig name and the bin name.
    pub fn into_parts(self) -> (String, String) {
        (self.contig, self.bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() -> Result<(), ParseError> {
        let record = Record::parse("NODE_1,bin.3", Delimiter::new(','), 1)?;
        assert_eq!(record.contig(), "NODE_1");
        assert_eq!(record.bin(), "bin.3");
        Ok(())
    }

    #[test]
    fn test_too_few_fields() {
        let err = Record::parse("NODE_1", Delimiter::new(','), 4).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFieldCount {
                line_no: 4,
                line: String::from("NODE_1"),
                found: 1
            }
        );
    }

    #[test]
    fn test_empty_field() {
        let err = Record::parse("NODE_1,", Delimiter::new(','), 2).unwrap_err();
        assert_eq!(err.to_string(), "empty contig or bin name: line 2: NODE_1,");

        let err = Record::parse(",bin.1", Delimiter::new(','), 3).unwrap_err();
        assert!(matches!(err, ParseError::EmptyField { line_no: 3, .. }));
    }
}
