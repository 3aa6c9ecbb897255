//! A FASTA reader.

use std::io::BufRead;
use std::io::{self};

use nonempty::NonEmpty;

use crate::fasta::Record;
use crate::fasta::record::HEADER_PREFIX;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the format of a FASTA file.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The stream contained no records at all.
    Empty,

    /// The first non-blank line was not a header line.
    MissingHeader {
        /// The (1-based) line number.
        line_no: usize,

        /// The offending line.
        line: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "the file contains no records"),
            ParseError::MissingHeader { line_no, line } => write!(
                f,
                "expected a header line starting with `{HEADER_PREFIX}`: line {line_no}: {line}"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Reader
////////////////////////////////////////////////////////////////////////////////////////

/// A FASTA reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a FASTA reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b">c1\nACGT";
    /// let reader = binchord::fasta::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// The line terminator (`\n` or `\r\n`) is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b">c1\r\nACGT";
    /// let mut reader = binchord::fasta::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 5);
    /// assert_eq!(buffer, ">c1");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 4);
    /// assert_eq!(buffer, "ACGT");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(self.inner_mut(), buffer)
    }

    /// Returns an iterator over the records in the underlying reader.
    ///
    /// The iterator is single pass: once the underlying reader is exhausted
    /// (or an error is returned), it yields nothing further.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b">c1\nACGT\n>c2\nGGCC";
    /// let mut reader = binchord::fasta::Reader::new(&data[..]);
    ///
    /// let headers = reader
    ///     .records()
    ///     .map(|result| result.map(|record| record.header().to_string()))
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(headers, vec!["c1", "c2"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> Records<'_, T> {
        Records::new(self)
    }

    /// Reads every record from the underlying reader.
    ///
    /// A successful read always contains at least one record.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b">c1\nACGT\n>c2\nGGCC";
    /// let mut reader = binchord::fasta::Reader::new(&data[..]);
    ///
    /// let records = reader.read_all()?;
    /// assert_eq!(records.len(), 2);
    /// assert_eq!(records.first().header(), "c1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_all(&mut self) -> Result<NonEmpty<Record>> {
        let records = self.records().collect::<Result<Vec<_>>>()?;

        // The iterator reports an empty stream as an error rather than
        // finishing without a record.
        NonEmpty::from_vec(records).ok_or(Error::Parse(ParseError::Empty))
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

/// Reads a line from a buffered reader.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Records
////////////////////////////////////////////////////////////////////////////////////////

/// The state of the iterator.
#[derive(Debug)]
enum State {
    /// Nothing has been read yet.
    Start,

    /// The header of the next record has been read.
    Header(String),

    /// The underlying reader is exhausted or an error was returned.
    Done,
}

/// An iterator over the [`Record`]s of a [`Reader`].
#[derive(Debug)]
pub struct Records<'a, T>
where
    T: BufRead,
{
    /// The inner reader.
    reader: &'a mut Reader<T>,

    /// The state of the iterator.
    state: State,

    /// The line number.
    line_no: usize,
}

impl<'a, T> Records<'a, T>
where
    T: BufRead,
{
    /// Creates a new [`Records`].
    pub(crate) fn new(reader: &'a mut Reader<T>) -> Self {
        Self {
            reader,
            state: State::Start,
            line_no: 0usize,
        }
    }

    /// Reads the next line into `buffer`, returning `false` at the end of
    /// the stream.
    fn next_line(&mut self, buffer: &mut String) -> Result<bool> {
        match self.reader.read_line_raw(buffer).map_err(Error::Io)? {
            0 => Ok(false),
            _ => {
                self.line_no += 1;
                Ok(true)
            }
        }
    }

    /// Skips leading blank lines and reads the first header.
    fn first_header(&mut self, buffer: &mut String) -> Result<String> {
        loop {
            if !self.next_line(buffer)? {
                return Err(Error::Parse(ParseError::Empty));
            }

            if buffer.trim().is_empty() {
                continue;
            }

            return match parse_header(buffer) {
                Some(header) => Ok(header),
                None => Err(Error::Parse(ParseError::MissingHeader {
                    line_no: self.line_no,
                    line: buffer.clone(),
                })),
            };
        }
    }

    /// Reads sequence lines until the next header or the end of the stream.
    fn read_sequence(&mut self, buffer: &mut String) -> Result<(String, Option<String>)> {
        let mut sequence = String::new();

        while self.next_line(buffer)? {
            if let Some(header) = parse_header(buffer) {
                return Ok((sequence, Some(header)));
            }

            sequence.push_str(buffer.trim());
        }

        Ok((sequence, None))
    }
}

impl<T> Iterator for Records<'_, T>
where
    T: BufRead,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buffer = String::new();

        let header = match std::mem::replace(&mut self.state, State::Done) {
            State::Start => match self.first_header(&mut buffer) {
                Ok(header) => header,
                Err(err) => return Some(Err(err)),
            },
            State::Header(header) => header,
            State::Done => return None,
        };

        match self.read_sequence(&mut buffer) {
            Ok((sequence, next)) => {
                if let Some(next) = next {
                    self.state = State::Header(next);
                }

                Some(Ok(Record::new(header, sequence)))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Parses the header out of a line, if the line is a header line.
fn parse_header(line: &str) -> Option<String> {
    line.strip_prefix(HEADER_PREFIX)
        .map(|header| header.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn parse(data: &[u8]) -> Result<Vec<Record>> {
        Reader::new(data).records().collect()
    }

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_two_records() -> Result<()> {
        let records = parse(b">c1\nACGT\n>c2\nGGCC")?;
        assert_eq!(
            records,
            vec![Record::new("c1", "ACGT"), Record::new("c2", "GGCC")]
        );
        Ok(())
    }

    #[test]
    fn test_multiline_sequence_and_crlf() -> Result<()> {
        let records = parse(b">c1 some description  \r\nAC\r\nGT\r\n\r\n>c2\r\nTT\r\n")?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header(), "c1 some description");
        assert_eq!(records[0].sequence(), "ACGT");
        assert_eq!(records[1].sequence(), "TT");
        Ok(())
    }

    #[test]
    fn test_header_without_sequence() -> Result<()> {
        let records = parse(b">c1\n>c2\nAAA\n>c3")?;
        assert_eq!(
            records,
            vec![
                Record::new("c1", ""),
                Record::new("c2", "AAA"),
                Record::new("c3", "")
            ]
        );
        Ok(())
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() -> Result<()> {
        let records = parse(b"\n  \n>c1\nA")?;
        assert_eq!(records, vec![Record::new("c1", "A")]);
        Ok(())
    }

    #[test]
    fn test_one_record_per_header_line() -> Result<()> {
        let mut data = String::new();
        for i in 0..50 {
            data.push_str(&format!(">contig_{i}\t\nACGT\nGG\n"));
        }

        let records = parse(data.as_bytes())?;
        assert_eq!(records.len(), 50);

        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.header(), format!("contig_{i}"));
            assert_eq!(record.sequence(), "ACGTGG");
        }

        Ok(())
    }

    #[test]
    fn test_empty_stream() {
        let err = parse(b"").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Empty)));

        let err = parse(b"\n\n  \n").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Empty)));
    }

    #[test]
    fn test_missing_header() {
        let err = parse(b"\nACGT\n>c1\nACGT").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error: expected a header line starting with `>`: line 2: ACGT"
        );
    }

    #[test]
    fn test_iterator_is_fused_after_error() {
        let data = b"ACGT\n>c1\nACGT";
        let mut reader = Reader::new(&data[..]);
        let mut records = reader.records();

        assert!(matches!(records.next(), Some(Err(_))));
        assert!(records.next().is_none());
    }

    #[test]
    fn test_read_all_of_empty_stream() {
        let err = Reader::new(&b""[..]).read_all().unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Empty)));
    }

    #[test]
    fn test_agrees_with_noodles() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b">c1\nACGTAC\nGTTA\n>c2\nGGCC\n>c3\nNNNNacgt\nA\n";

        let ours = parse(data)?;

        let mut reader = noodles::fasta::reader::Reader::new(&data[..]);
        let theirs = reader
            .records()
            .map(|result| {
                result.map(|record| {
                    (
                        String::from_utf8_lossy(record.name()).to_string(),
                        String::from_utf8_lossy(record.sequence().as_ref()).to_string(),
                    )
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        assert_eq!(ours.len(), theirs.len());
        for (record, (name, sequence)) in ours.iter().zip(theirs) {
            assert_eq!(record.header(), name);
            assert_eq!(record.sequence(), sequence);
        }

        Ok(())
    }
}
