//! A single FASTA record.

/// The prefix that marks a header line.
pub const HEADER_PREFIX: char = '>';

/// A contig read from a FASTA file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The header (without the leading `>`).
    header: String,

    /// The sequence, with all line terminators removed.
    sequence: String,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// let record = binchord::fasta::Record::new("c1", "ACGT");
    /// assert_eq!(record.header(), "c1");
    /// ```
    pub fn new(header: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sequence: sequence.into(),
        }
    }

    /// Gets the header.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Gets the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// let record = binchord::fasta::Record::new("c1", "ACGT");
    /// assert_eq!(record.sequence(), "ACGT");
    /// ```
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Consumes self and returns the header and the sequence.
    pub fn into_parts(self) -> (String, String) {
        (self.header, self.sequence)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", HEADER_PREFIX, self.header)?;

        if !self.sequence.is_empty() {
            write!(f, "\n{}", self.sequence)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Record::new("c1", "ACGT").to_string(), ">c1\nACGT");
        assert_eq!(Record::new("c1", "").to_string(), ">c1");
    }
}
