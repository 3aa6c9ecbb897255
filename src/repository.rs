//! The storage behind the entity graph.
//!
//! Persisting entities is left to the surrounding application. Everything
//! in this crate reaches storage through the [`Repository`] trait, which
//! offers three kinds of operations: looking up an entity by name within
//! its scope, creating entities, and listing the children of an entity.
//! Every lookup of a set is scoped by an explicit [`Owner`].

use crate::entity::Bin;
use crate::entity::BinId;
use crate::entity::Binset;
use crate::entity::BinsetId;
use crate::entity::Contig;
use crate::entity::ContigId;
use crate::entity::Contigset;
use crate::entity::ContigsetId;
use crate::entity::NewContig;
use crate::entity::Owner;

pub mod memory;

/// A store of contigsets, contigs, binsets, bins, and bin memberships.
///
/// Each method is expected to be atomic on its own. Nothing here makes a
/// sequence of calls atomic; callers that need two uploads with the same
/// name to be strictly exclusive must serialize them per owner and name.
pub trait Repository {
    /// The error returned by the underlying storage.
    type Error: std::error::Error + 'static;

    /// Finds the contigset with `name` owned by `owner`.
    fn find_contigset(&self, owner: &Owner, name: &str)
        -> Result<Option<Contigset>, Self::Error>;

    /// Finds the binset with `name` owned by `owner`.
    fn find_binset(&self, owner: &Owner, name: &str) -> Result<Option<Binset>, Self::Error>;

    /// Finds the contig with `header` within a contigset.
    fn find_contig(
        &self,
        contigset: ContigsetId,
        header: &str,
    ) -> Result<Option<Contig>, Self::Error>;

    /// Finds the bin with `name` within a binset.
    fn find_bin(&self, binset: BinsetId, name: &str) -> Result<Option<Bin>, Self::Error>;

    /// Creates a contigset.
    ///
    /// When `name` is [`None`], the contigset is named `contigset{n}` (see
    /// [`Contigset::auto_name()`]), where `n` is the smallest number not
    /// below its identifier that gives a name the owner does not use yet.
    /// An explicit `name` that the owner already uses is an error, and the
    /// existing contigset stays the one found by that name.
    fn create_contigset(
        &mut self,
        owner: &Owner,
        name: Option<&str>,
    ) -> Result<Contigset, Self::Error>;

    /// Creates a binset.
    ///
    /// A `name` that the owner already uses is an error.
    fn create_binset(&mut self, owner: &Owner, name: &str) -> Result<Binset, Self::Error>;

    /// Creates a single contig within a contigset.
    fn create_contig(
        &mut self,
        contigset: ContigsetId,
        contig: NewContig,
    ) -> Result<Contig, Self::Error>;

    /// Creates many contigs within a contigset in one go.
    fn bulk_create_contigs(
        &mut self,
        contigset: ContigsetId,
        contigs: Vec<NewContig>,
    ) -> Result<Vec<Contig>, Self::Error>;

    /// Creates a bin within a binset.
    fn create_bin(&mut self, binset: BinsetId, name: &str) -> Result<Bin, Self::Error>;

    /// Makes a contig a member of a bin.
    ///
    /// Returns `false` if the contig was already a member.
    fn add_member(&mut self, bin: BinId, contig: ContigId) -> Result<bool, Self::Error>;

    /// Lists the contigsets of an owner in creation order.
    fn contigsets(&self, owner: &Owner) -> Result<Vec<Contigset>, Self::Error>;

    /// Lists the binsets of an owner in creation order.
    fn binsets(&self, owner: &Owner) -> Result<Vec<Binset>, Self::Error>;

    /// Lists the contigs of a contigset in creation order.
    fn contigs(&self, contigset: ContigsetId) -> Result<Vec<Contig>, Self::Error>;

    /// Lists the bins of a binset in creation order.
    fn bins(&self, binset: BinsetId) -> Result<Vec<Bin>, Self::Error>;

    /// Lists the member contigs of a bin in the order they were added.
    fn members(&self, bin: BinId) -> Result<Vec<Contig>, Self::Error>;
}
