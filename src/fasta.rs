//! Reading contig sequences from FASTA files.
//!
//! A FASTA file is a series of records, each starting with a header line
//! (`>` followed by the contig name) and continuing with any number of
//! sequence lines. The sequence lines of a record are joined together with
//! their line terminators removed.
//!
//! ```
//! let data = b">c1\nACGT\n>c2\nGG\nCC";
//! let mut reader = binchord::fasta::Reader::new(&data[..]);
//!
//! let records = reader.records().collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(records[0].header(), "c1");
//! assert_eq!(records[0].sequence(), "ACGT");
//! assert_eq!(records[1].header(), "c2");
//! assert_eq!(records[1].sequence(), "GGCC");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read as _;
use std::io::{self};
use std::path::Path;

use flate2::read::MultiGzDecoder;

pub mod reader;
pub mod record;

pub use reader::Error;
pub use reader::ParseError;
pub use reader::Reader;
pub use reader::Records;
pub use record::Record;

/// The magic bytes at the start of every gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a FASTA file from disk.
///
/// Gzip compressed files are detected from their leading bytes and
/// decompressed transparently, so both `contigs.fa` and `contigs.fa.gz` can
/// be passed here. The file is only read once, so named pipes and process
/// substitutions work too.
pub fn open(path: impl AsRef<Path>) -> io::Result<Reader<Box<dyn BufRead>>> {
    File::open(path.as_ref())
        .map(BufReader::new)
        .and_then(from_reader)
}

/// Wraps a single pass reader of plain or gzip compressed FASTA data.
///
/// The leading bytes are consumed to detect compression and then put back in
/// front of the rest of the stream.
///
/// # Examples
///
/// ```
/// let records = binchord::fasta::from_reader(&b">c1\nACGT"[..])?.read_all()?;
/// assert_eq!(records.first().sequence(), "ACGT");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_reader<R>(mut inner: R) -> io::Result<Reader<Box<dyn BufRead>>>
where
    R: BufRead + 'static,
{
    let mut magic = Vec::with_capacity(GZIP_MAGIC.len());
    (&mut inner)
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;

    let is_gzip = magic == GZIP_MAGIC;
    let inner = Cursor::new(magic).chain(inner);

    let inner: Box<dyn BufRead> = if is_gzip {
        Box::new(BufReader::new(MultiGzDecoder::new(inner)))
    } else {
        Box::new(inner)
    };

    Ok(Reader::new(inner))
}
