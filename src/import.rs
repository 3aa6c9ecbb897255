//! Importing uploaded files into a [`Repository`].
//!
//! An import either succeeds as a whole or leaves the repository untouched:
//! names are checked and the uploaded file is parsed in full before the
//! first write.

use std::collections::HashMap;
use std::io::BufRead;

use tracing::debug;
use tracing::info;

use crate::Repository;
use crate::assignment;
use crate::entity::BinId;
use crate::entity::Binset;
use crate::entity::ContigId;
use crate::entity::Contigset;
use crate::entity::MAX_BIN_NAME_LEN;
use crate::entity::MAX_HEADER_LEN;
use crate::entity::MAX_SET_NAME_LEN;
use crate::entity::NewContig;
use crate::entity::Owner;
use crate::fasta;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// The kind of set being imported.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A contigset.
    Contigset,

    /// A binset.
    Binset,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Contigset => write!(f, "contigset"),
            Kind::Binset => write!(f, "binset"),
        }
    }
}

/// A name that cannot be stored.
#[derive(Debug, Eq, PartialEq)]
pub enum NameError {
    /// The set name is empty.
    EmptySetName,

    /// The set name is longer than [`MAX_SET_NAME_LEN`].
    SetNameTooLong(String),

    /// A contig header is longer than [`MAX_HEADER_LEN`].
    HeaderTooLong(String),

    /// A bin name is longer than [`MAX_BIN_NAME_LEN`].
    BinNameTooLong(String),
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameError::EmptySetName => write!(f, "the name is empty"),
            NameError::SetNameTooLong(name) => {
                write!(f, "the name exceeds {MAX_SET_NAME_LEN} characters: {name}")
            }
            NameError::HeaderTooLong(header) => {
                write!(
                    f,
                    "contig header exceeds {MAX_HEADER_LEN} characters: {header}"
                )
            }
            NameError::BinNameTooLong(name) => {
                write!(f, "bin name exceeds {MAX_BIN_NAME_LEN} characters: {name}")
            }
        }
    }
}

impl std::error::Error for NameError {}

/// An error related to an import.
#[derive(Debug)]
pub enum Error<E> {
    /// The owner already has a set with this name.
    DuplicateName {
        /// The kind of set.
        kind: Kind,

        /// The name.
        name: String,
    },

    /// A name cannot be stored.
    InvalidName(NameError),

    /// The FASTA file is malformed.
    Fasta(fasta::Error),

    /// The assignment file is malformed.
    Assignment(assignment::Error),

    /// The repository failed.
    Repository(E),
}

impl<E> Error<E> {
    /// Returns whether the upload was rejected because of its contents rather
    /// than a failing repository.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Error::Repository(_))
    }
}

impl<E> std::fmt::Display for Error<E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateName { kind, name } => {
                write!(f, "a {kind} named `{name}` was already uploaded")
            }
            Error::InvalidName(err) => write!(f, "invalid name: {err}"),
            Error::Fasta(err) => write!(f, "invalid FASTA file: {err}"),
            Error::Assignment(err) => write!(f, "invalid assignment file: {err}"),
            Error::Repository(err) => write!(f, "repository error: {err}"),
        }
    }
}

impl<E> std::error::Error for Error<E> where E: std::fmt::Debug + std::fmt::Display {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T, E> = std::result::Result<T, Error<E>>;

////////////////////////////////////////////////////////////////////////////////////////
// Reports
////////////////////////////////////////////////////////////////////////////////////////

/// The outcome of a successful import.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Import<T> {
    /// The created set.
    set: T,

    /// The number of items imported into the set.
    count: usize,
}

impl<T> Import<T> {
    /// Gets the created set.
    pub fn set(&self) -> &T {
        &self.set
    }

    /// Gets the number of items imported.
    ///
    /// This is the number of contigs for a contigset and the number of bin
    /// memberships for a binset.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Consumes self and returns the created set.
    pub fn into_set(self) -> T {
        self.set
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Imports
////////////////////////////////////////////////////////////////////////////////////////

/// Checks a user provided set name.
fn check_set_name(name: &str) -> std::result::Result<&str, NameError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(NameError::EmptySetName);
    }

    if name.chars().count() > MAX_SET_NAME_LEN {
        return Err(NameError::SetNameTooLong(name.into()));
    }

    Ok(name)
}

/// Checks a contig header.
fn check_header(header: &str) -> std::result::Result<(), NameError> {
    match header.chars().count() > MAX_HEADER_LEN {
        true => Err(NameError::HeaderTooLong(header.into())),
        false => Ok(()),
    }
}

/// Checks a bin name.
fn check_bin_name(name: &str) -> std::result::Result<(), NameError> {
    match name.chars().count() > MAX_BIN_NAME_LEN {
        true => Err(NameError::BinNameTooLong(name.into())),
        false => Ok(()),
    }
}

/// Imports a FASTA file as a new contigset named `name`.
///
/// # Examples
///
/// ```
/// use binchord::entity::Owner;
/// use binchord::import;
/// use binchord::import::Error;
/// use binchord::repository::memory::Memory;
///
/// let owner = Owner::from("session-0");
/// let mut repository = Memory::default();
///
/// let data = b">c1\nACGT\n>c2\nGGCC";
/// let import = import::import_contigset(&mut repository, &owner, "assembly", &data[..])?;
/// assert_eq!(import.set().name(), "assembly");
/// assert_eq!(import.count(), 2);
///
/// let err = import::import_contigset(&mut repository, &owner, "assembly", &data[..]).unwrap_err();
/// assert!(matches!(err, Error::DuplicateName { .. }));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn import_contigset<R, T>(
    repository: &mut R,
    owner: &Owner,
    name: &str,
    reader: T,
) -> Result<Import<Contigset>, R::Error>
where
    R: Repository,
    T: BufRead,
{
    let name = check_set_name(name).map_err(Error::InvalidName)?;

    if repository
        .find_contigset(owner, name)
        .map_err(Error::Repository)?
        .is_some()
    {
        return Err(Error::DuplicateName {
            kind: Kind::Contigset,
            name: name.into(),
        });
    }

    let records = fasta::Reader::new(reader)
        .read_all()
        .map_err(Error::Fasta)?;

    let mut contigs = Vec::with_capacity(records.len());
    for record in records {
        check_header(record.header()).map_err(Error::InvalidName)?;

        let (header, sequence) = record.into_parts();
        contigs.push(NewContig {
            header,
            sequence: Some(sequence),
        });
    }

    let contigset = repository
        .create_contigset(owner, Some(name))
        .map_err(Error::Repository)?;

    let count = repository
        .bulk_create_contigs(contigset.id(), contigs)
        .map_err(Error::Repository)?
        .len();

    info!(
        "imported {count} contigs into contigset `{}` for owner `{owner}`",
        contigset.name()
    );

    Ok(Import {
        set: contigset,
        count,
    })
}

/// Imports an assignment file as a new binset named `name`.
///
/// The contigs named in the file are looked up in the contigset named
/// `contigset`. If no such contigset exists (or none is named), a new
/// contigset is created with an implicit name (`contigset{n}`, never one the
/// owner already uses). Contigs and bins that
/// do not exist yet are created along the way.
///
/// # Examples
///
/// ```
/// use binchord::Repository as _;
/// use binchord::entity::Owner;
/// use binchord::import;
/// use binchord::repository::memory::Memory;
///
/// let owner = Owner::from("session-0");
/// let mut repository = Memory::default();
///
/// let import = import::import_binset(&mut repository, &owner, "metabat", None, "c1,A\nc2,B")?;
/// assert_eq!(import.count(), 2);
///
/// // The contigs ended up in an implicitly created contigset.
/// let contigsets = repository.contigsets(&owner)?;
/// assert_eq!(contigsets[0].name(), "contigset1");
/// assert_eq!(repository.contigs(contigsets[0].id())?.len(), 2);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn import_binset<R>(
    repository: &mut R,
    owner: &Owner,
    name: &str,
    contigset: Option<&str>,
    text: &str,
) -> Result<Import<Binset>, R::Error>
where
    R: Repository,
{
    let name = check_set_name(name).map_err(Error::InvalidName)?;

    if repository
        .find_binset(owner, name)
        .map_err(Error::Repository)?
        .is_some()
    {
        return Err(Error::DuplicateName {
            kind: Kind::Binset,
            name: name.into(),
        });
    }

    let records = assignment::parse(text)
        .and_then(|records| records.collect::<std::result::Result<Vec<_>, _>>())
        .map_err(Error::Assignment)?;

    for record in &records {
        check_header(record.contig()).map_err(Error::InvalidName)?;
        check_bin_name(record.bin()).map_err(Error::InvalidName)?;
    }

    let binset = repository
        .create_binset(owner, name)
        .map_err(Error::Repository)?;

    let contigset = match contigset {
        Some(contigset) => repository
            .find_contigset(owner, contigset)
            .map_err(Error::Repository)?,
        None => None,
    };

    let contigset = match contigset {
        Some(contigset) => contigset,
        None => {
            let contigset = repository
                .create_contigset(owner, None)
                .map_err(Error::Repository)?;
            debug!("created contigset `{}` for binset `{name}`", contigset.name());
            contigset
        }
    };

    let mut contigs = HashMap::<String, ContigId>::new();
    let mut bins = HashMap::<String, BinId>::new();
    let mut count = 0usize;

    for record in records {
        let (contig_name, bin_name) = record.into_parts();

        let contig = match contigs.get(&contig_name) {
            Some(id) => *id,
            None => {
                let id = match repository
                    .find_contig(contigset.id(), &contig_name)
                    .map_err(Error::Repository)?
                {
                    Some(contig) => contig.id(),
                    None => repository
                        .create_contig(
                            contigset.id(),
                            NewContig {
                                header: contig_name.clone(),
                                sequence: None,
                            },
                        )
                        .map_err(Error::Repository)?
                        .id(),
                };

                contigs.insert(contig_name, id);
                id
            }
        };

        let bin = match bins.get(&bin_name) {
            Some(id) => *id,
            None => {
                let id = match repository
                    .find_bin(binset.id(), &bin_name)
                    .map_err(Error::Repository)?
                {
                    Some(bin) => bin.id(),
                    None => repository
                        .create_bin(binset.id(), &bin_name)
                        .map_err(Error::Repository)?
                        .id(),
                };

                bins.insert(bin_name, id);
                id
            }
        };

        if repository
            .add_member(bin, contig)
            .map_err(Error::Repository)?
        {
            count += 1;
        }
    }

    info!(
        "imported {} bins with {count} memberships into binset `{}` for owner `{owner}`",
        bins.len(),
        binset.name()
    );

    Ok(Import { set: binset, count })
}
