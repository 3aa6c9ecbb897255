//! Chord diagrams of the contigs shared between two selections of bins.
//!
//! Building a chord diagram happens in three steps:
//!
//! - Each [`Selection`] is resolved into [`Node`]s: the selected bins of a
//!   binset together with the identifiers of their member contigs.
//! - Both lists of nodes are put into a deterministic order (see
//!   [`order::sort_bins()`]). The second list is reversed so that the two
//!   halves of the diagram mirror each other.
//! - The number of contigs shared by every pair of nodes is counted into a
//!   [`Matrix`] (see [`matrix::build_matrix()`]).
//!
//! [`build()`] runs all three steps against a [`Repository`].

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::Repository;
use crate::composition::Composition;
use crate::entity::Bin;
use crate::entity::BinId;
use crate::entity::Contig;
use crate::entity::ContigId;
use crate::entity::Owner;

pub mod matrix;
pub mod order;

pub use matrix::Color;
pub use matrix::Matrix;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to parsing a [`Selection`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseSelectionError {
    /// The selection did not match `<binset>[:<bin>,<bin>,...]`.
    Invalid(String),
}

impl std::fmt::Display for ParseSelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseSelectionError::Invalid(value) => write!(
                f,
                "invalid selection `{value}`: expected `<binset>` or `<binset>:<bin>,<bin>,...`"
            ),
        }
    }
}

impl std::error::Error for ParseSelectionError {}

/// An error related to building a chord diagram.
#[derive(Debug)]
pub enum Error<E> {
    /// The owner has no binset with this name.
    UnknownBinset(String),

    /// The repository failed.
    Repository(E),
}

impl<E> std::fmt::Display for Error<E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownBinset(name) => write!(f, "unknown binset: {name}"),
            Error::Repository(err) => write!(f, "repository error: {err}"),
        }
    }
}

impl<E> std::error::Error for Error<E> where E: std::fmt::Debug + std::fmt::Display {}

////////////////////////////////////////////////////////////////////////////////////////
// Selections
////////////////////////////////////////////////////////////////////////////////////////

/// Matches `<binset>` or `<binset>:<bins>`.
static SELECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<binset>[^:]+?)(?::(?P<bins>.*))?$").unwrap());

/// The bins of one binset chosen for a chord diagram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selection {
    /// The binset name.
    binset: String,

    /// The selected bin names, or [`None`] for every bin.
    bins: Option<BTreeSet<String>>,
}

impl Selection {
    /// Creates a selection of the named bins within a binset.
    pub fn new<I, S>(binset: impl Into<String>, bins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            binset: binset.into(),
            bins: Some(bins.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a selection of every bin within a binset.
    pub fn all(binset: impl Into<String>) -> Self {
        Self {
            binset: binset.into(),
            bins: None,
        }
    }

    /// Gets the binset name.
    pub fn binset(&self) -> &str {
        &self.binset
    }

    /// Returns whether a bin is selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use binchord::chord::Selection;
    ///
    /// let selection = Selection::new("metabat", ["bin.1", "bin.2"]);
    /// assert!(selection.contains("bin.1"));
    /// assert!(!selection.contains("bin.3"));
    ///
    /// assert!(Selection::all("metabat").contains("bin.3"));
    /// ```
    pub fn contains(&self, bin: &str) -> bool {
        match &self.bins {
            Some(bins) => bins.contains(bin),
            None => true,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binset)?;

        if let Some(bins) = &self.bins {
            let bins = bins.iter().map(String::as_str).collect::<Vec<_>>();
            write!(f, ":{}", bins.join(","))?;
        }

        Ok(())
    }
}

impl FromStr for Selection {
    type Err = ParseSelectionError;

    /// Parses a selection from `<binset>` (every bin) or
    /// `<binset>:<bin>,<bin>,...` (only the listed bins).
    ///
    /// # Examples
    ///
    /// ```
    /// use binchord::chord::Selection;
    ///
    /// let selection = "metabat:bin.1, bin.2".parse::<Selection>()?;
    /// assert_eq!(selection, Selection::new("metabat", ["bin.1", "bin.2"]));
    ///
    /// let selection = "metabat".parse::<Selection>()?;
    /// assert_eq!(selection, Selection::all("metabat"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = SELECTION_REGEX
            .captures(s.trim())
            .ok_or_else(|| ParseSelectionError::Invalid(s.into()))?;

        // SAFETY: the `binset` group is not optional, so it is present in every
        // match.
        let binset = captures.name("binset").unwrap().as_str().trim();

        if binset.is_empty() {
            return Err(ParseSelectionError::Invalid(s.into()));
        }

        Ok(match captures.name("bins") {
            Some(bins) => Self::new(
                binset,
                bins.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|bin| !bin.is_empty()),
            ),
            None => Self::all(binset),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Nodes
////////////////////////////////////////////////////////////////////////////////////////

/// A bin placed on a chord diagram.
#[derive(Clone, Debug)]
pub struct Node {
    /// The bin.
    bin: Bin,

    /// The identifiers of the member contigs.
    contigs: BTreeSet<ContigId>,

    /// The composition of the member contigs with sequence data.
    composition: Composition,
}

impl Node {
    /// Creates a new [`Node`] from a bin and its member contigs.
    pub fn new(bin: Bin, members: &[Contig]) -> Self {
        let contigs = members.iter().map(Contig::id).collect();
        let composition = members
            .iter()
            .filter_map(Contig::sequence)
            .fold(Composition::default(), Composition::add);

        Self {
            bin,
            contigs,
            composition,
        }
    }

    /// Gets the bin.
    pub fn bin(&self) -> &Bin {
        &self.bin
    }

    /// Gets the identifier of the bin.
    pub fn id(&self) -> BinId {
        self.bin.id()
    }

    /// Gets the name of the bin.
    pub fn name(&self) -> &str {
        self.bin.name()
    }

    /// Gets the identifiers of the member contigs.
    pub fn contigs(&self) -> &BTreeSet<ContigId> {
        &self.contigs
    }

    /// Gets the aggregate GC content of the member contigs.
    ///
    /// Every nucleotide of every member with sequence data weighs the same.
    /// A bin without any sequence data has a GC content of `0.0`.
    pub fn gc(&self) -> f64 {
        self.composition.gc()
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Building
////////////////////////////////////////////////////////////////////////////////////////

/// Resolves a selection into nodes in the order the repository lists bins.
fn nodes<R>(
    repository: &R,
    owner: &Owner,
    selection: &Selection,
) -> Result<Vec<Node>, Error<R::Error>>
where
    R: Repository,
{
    let binset = repository
        .find_binset(owner, selection.binset())
        .map_err(Error::Repository)?
        .ok_or_else(|| Error::UnknownBinset(selection.binset().into()))?;

    let mut nodes = Vec::new();

    for bin in repository.bins(binset.id()).map_err(Error::Repository)? {
        if !selection.contains(bin.name()) {
            continue;
        }

        let members = repository.members(bin.id()).map_err(Error::Repository)?;
        nodes.push(Node::new(bin, &members));
    }

    Ok(nodes)
}

/// Builds the chord diagram of two selections of bins.
///
/// The bins of `first` are sorted in ascending order and the bins of
/// `second` in descending order before they are counted into the matrix.
///
/// # Examples
///
/// ```
/// use binchord::chord;
/// use binchord::chord::Selection;
/// use binchord::entity::Owner;
/// use binchord::import;
/// use binchord::repository::memory::Memory;
///
/// let owner = Owner::from("session-0");
/// let mut repository = Memory::default();
///
/// import::import_binset(&mut repository, &owner, "one", None, "c1,A\nc2,A")?;
/// let err = chord::build(
///     &repository,
///     &owner,
///     &Selection::all("one"),
///     &Selection::all("two"),
/// )
/// .unwrap_err();
/// assert_eq!(err.to_string(), "unknown binset: two");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build<R>(
    repository: &R,
    owner: &Owner,
    first: &Selection,
    second: &Selection,
) -> Result<Matrix, Error<R::Error>>
where
    R: Repository,
{
    debug!("building chord diagram for `{first}` and `{second}` (owner `{owner}`)");

    let first = order::sort_bins(nodes(repository, owner, first)?, false);
    let second = order::sort_bins(nodes(repository, owner, second)?, true);

    Ok(matrix::build_matrix(&first, &second))
}
