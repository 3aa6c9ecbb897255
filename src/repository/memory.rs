//! An in-memory [`Repository`].

use std::collections::HashMap;
use std::collections::HashSet;

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
use crate::repository::Repository;

/// An error related to a [`Memory`] repository.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The owner already has a contigset with this name.
    DuplicateContigset {
        /// The owner.
        owner: Owner,

        /// The name.
        name: String,
    },

    /// The owner already has a binset with this name.
    DuplicateBinset {
        /// The owner.
        owner: Owner,

        /// The name.
        name: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateContigset { owner, name } => {
                write!(f, "owner `{owner}` already has a contigset named `{name}`")
            }
            Error::DuplicateBinset { owner, name } => {
                write!(f, "owner `{owner}` already has a binset named `{name}`")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Converts a zero-based index into the next one-based identifier.
fn next_id(len: usize) -> u64 {
    len as u64 + 1
}

/// Converts a one-based identifier into a zero-based index.
fn index(id: u64) -> usize {
    id.saturating_sub(1) as usize
}

/// A [`Repository`] that keeps everything in memory.
///
/// Identifiers are assigned sequentially per kind of entity, starting at one.
/// Set names are unique per owner: creating a set under a name the owner
/// already uses fails and leaves the existing set in place.
///
/// # Examples
///
/// ```
/// use binchord::Repository as _;
/// use binchord::entity::Owner;
/// use binchord::repository::memory::Memory;
///
/// let owner = Owner::from("session-0");
/// let mut repository = Memory::default();
///
/// let contigset = repository.create_contigset(&owner, None)?;
/// assert_eq!(contigset.name(), "contigset1");
///
/// let found = repository.find_contigset(&owner, "contigset1")?;
/// assert_eq!(found, Some(contigset));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Memory {
    /// All contigsets, indexed by identifier.
    contigsets: Vec<Contigset>,

    /// All contigs, indexed by identifier.
    contigs: Vec<Contig>,

    /// All binsets, indexed by identifier.
    binsets: Vec<Binset>,

    /// All bins, indexed by identifier.
    bins: Vec<Bin>,

    /// Contigsets by owner and name.
    contigset_names: HashMap<(Owner, String), ContigsetId>,

    /// Binsets by owner and name.
    binset_names: HashMap<(Owner, String), BinsetId>,

    /// Contigs by contigset and header.
    contig_headers: HashMap<(ContigsetId, String), ContigId>,

    /// Bins by binset and name.
    bin_names: HashMap<(BinsetId, String), BinId>,

    /// Bin memberships in the order they were added.
    members: Vec<(BinId, ContigId)>,

    /// Bin memberships for duplicate detection.
    member_index: HashSet<(BinId, ContigId)>,
}

impl Memory {
    /// Gets the total number of contigs across all contigsets.
    pub fn num_contigs(&self) -> usize {
        self.contigs.len()
    }

    /// Gets the total number of bins across all binsets.
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Gets the total number of bin memberships.
    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    /// Finds the first implicit contigset name, starting at `id`, that the
    /// owner does not use yet.
    fn free_auto_name(&self, owner: &Owner, id: ContigsetId) -> String {
        let mut n = id.get();

        loop {
            let name = Contigset::auto_name(n);

            if !self.contigset_names.contains_key(&(owner.clone(), name.clone())) {
                return name;
            }

            n += 1;
        }
    }

    /// Inserts a contig.
    fn insert_contig(&mut self, contigset: ContigsetId, contig: NewContig) -> Contig {
        let id = ContigId::new(next_id(self.contigs.len()));
        let contig = Contig::new(id, contig.header, contig.sequence, contigset);

        self.contig_headers
            .insert((contigset, contig.header().to_string()), id);
        self.contigs.push(contig.clone());

        contig
    }
}

impl Repository for Memory {
    type Error = Error;

    fn find_contigset(&self, owner: &Owner, name: &str) -> Result<Option<Contigset>, Error> {
        Ok(self
            .contigset_names
            .get(&(owner.clone(), name.to_string()))
            .and_then(|id| self.contigsets.get(index(id.get())))
            .cloned())
    }

    fn find_binset(&self, owner: &Owner, name: &str) -> Result<Option<Binset>, Error> {
        Ok(self
            .binset_names
            .get(&(owner.clone(), name.to_string()))
            .and_then(|id| self.binsets.get(index(id.get())))
            .cloned())
    }

    fn find_contig(
        &self,
        contigset: ContigsetId,
        header: &str,
    ) -> Result<Option<Contig>, Error> {
        Ok(self
            .contig_headers
            .get(&(contigset, header.to_string()))
            .and_then(|id| self.contigs.get(index(id.get())))
            .cloned())
    }

    fn find_bin(&self, binset: BinsetId, name: &str) -> Result<Option<Bin>, Error> {
        Ok(self
            .bin_names
            .get(&(binset, name.to_string()))
            .and_then(|id| self.bins.get(index(id.get())))
            .cloned())
    }

    fn create_contigset(
        &mut self,
        owner: &Owner,
        name: Option<&str>,
    ) -> Result<Contigset, Error> {
        let id = ContigsetId::new(next_id(self.contigsets.len()));
        let name = match name {
            Some(name) => name.to_string(),
            None => self.free_auto_name(owner, id),
        };

        let key = (owner.clone(), name);
        if self.contigset_names.contains_key(&key) {
            let (owner, name) = key;
            return Err(Error::DuplicateContigset { owner, name });
        }

        let contigset = Contigset::new(id, key.1.clone(), owner.clone());
        self.contigset_names.insert(key, id);
        self.contigsets.push(contigset.clone());

        Ok(contigset)
    }

    fn create_binset(&mut self, owner: &Owner, name: &str) -> Result<Binset, Error> {
        let key = (owner.clone(), name.to_string());
        if self.binset_names.contains_key(&key) {
            let (owner, name) = key;
            return Err(Error::DuplicateBinset { owner, name });
        }

        let id = BinsetId::new(next_id(self.binsets.len()));

        let binset = Binset::new(id, name, owner.clone());
        self.binset_names.insert(key, id);
        self.binsets.push(binset.clone());

        Ok(binset)
    }

    fn create_contig(
        &mut self,
        contigset: ContigsetId,
        contig: NewContig,
    ) -> Result<Contig, Error> {
        Ok(self.insert_contig(contigset, contig))
    }

    fn bulk_create_contigs(
        &mut self,
        contigset: ContigsetId,
        contigs: Vec<NewContig>,
    ) -> Result<Vec<Contig>, Error> {
        self.contigs.reserve(contigs.len());

        Ok(contigs
            .into_iter()
            .map(|contig| self.insert_contig(contigset, contig))
            .collect())
    }

    fn create_bin(&mut self, binset: BinsetId, name: &str) -> Result<Bin, Error> {
        let id = BinId::new(next_id(self.bins.len()));

        let bin = Bin::new(id, name, binset);
        self.bin_names.insert((binset, name.to_string()), id);
        self.bins.push(bin.clone());

        Ok(bin)
    }

    fn add_member(&mut self, bin: BinId, contig: ContigId) -> Result<bool, Error> {
        if !self.member_index.insert((bin, contig)) {
            return Ok(false);
        }

        self.members.push((bin, contig));
        Ok(true)
    }

    fn contigsets(&self, owner: &Owner) -> Result<Vec<Contigset>, Error> {
        Ok(self
            .contigsets
            .iter()
            .filter(|contigset| contigset.owner() == owner)
            .cloned()
            .collect())
    }

    fn binsets(&self, owner: &Owner) -> Result<Vec<Binset>, Error> {
        Ok(self
            .binsets
            .iter()
            .filter(|binset| binset.owner() == owner)
            .cloned()
            .collect())
    }

    fn contigs(&self, contigset: ContigsetId) -> Result<Vec<Contig>, Error> {
        Ok(self
            .contigs
            .iter()
            .filter(|contig| contig.contigset() == contigset)
            .cloned()
            .collect())
    }

    fn bins(&self, binset: BinsetId) -> Result<Vec<Bin>, Error> {
        Ok(self
            .bins
            .iter()
            .filter(|bin| bin.binset() == binset)
            .cloned()
            .collect())
    }

    fn members(&self, bin: BinId) -> Result<Vec<Contig>, Error> {
        Ok(self
            .members
            .iter()
            .filter(|(b, _)| *b == bin)
            .filter_map(|(_, contig)| self.contigs.get(index(contig.get())))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_contig(header: &str, sequence: Option<&str>) -> NewContig {
        NewContig {
            header: header.into(),
            sequence: sequence.map(String::from),
        }
    }

    #[test]
    fn test_sets_are_scoped_by_owner() -> Result<(), Error> {
        let alice = Owner::from("alice");
        let bob = Owner::from("bob");
        let mut repository = Memory::default();

        repository.create_binset(&alice, "metabat")?;

        assert!(repository.find_binset(&alice, "metabat")?.is_some());
        assert!(repository.find_binset(&bob, "metabat")?.is_none());
        assert_eq!(repository.binsets(&alice)?.len(), 1);
        assert!(repository.binsets(&bob)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_auto_named_contigsets() -> Result<(), Error> {
        let owner = Owner::from("session");
        let mut repository = Memory::default();

        repository.create_contigset(&owner, Some("assembly"))?;
        let contigset = repository.create_contigset(&owner, None)?;

        assert_eq!(contigset.name(), "contigset2");
        assert_eq!(
            repository.find_contigset(&owner, "contigset2")?,
            Some(contigset)
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_set_names_are_refused() -> Result<(), Error> {
        let owner = Owner::from("session");
        let mut repository = Memory::default();

        let first = repository.create_contigset(&owner, Some("assembly"))?;
        let err = repository
            .create_contigset(&owner, Some("assembly"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateContigset {
                owner: owner.clone(),
                name: String::from("assembly")
            }
        );
        assert_eq!(repository.find_contigset(&owner, "assembly")?, Some(first));
        assert_eq!(repository.contigsets(&owner)?.len(), 1);

        repository.create_binset(&owner, "metabat")?;
        let err = repository.create_binset(&owner, "metabat").unwrap_err();
        assert_eq!(
            err.to_string(),
            "owner `session` already has a binset named `metabat`"
        );
        assert_eq!(repository.binsets(&owner)?.len(), 1);

        // Other owners are unaffected.
        repository.create_contigset(&Owner::from("other"), Some("assembly"))?;
        Ok(())
    }

    #[test]
    fn test_auto_name_skips_names_in_use() -> Result<(), Error> {
        let owner = Owner::from("session");
        let mut repository = Memory::default();

        let user = repository.create_contigset(&owner, Some("contigset2"))?;
        repository.create_contigset(&Owner::from("other"), Some("contigset4"))?;
        let auto = repository.create_contigset(&owner, None)?;

        assert_eq!(auto.id().get(), 3);
        assert_eq!(auto.name(), "contigset3");

        let auto = repository.create_contigset(&owner, Some("contigset5"))?;
        let next = repository.create_contigset(&owner, None)?;
        assert_eq!(auto.id().get(), 4);
        assert_eq!(next.id().get(), 5);
        assert_eq!(next.name(), "contigset6");

        assert_eq!(repository.find_contigset(&owner, "contigset2")?, Some(user));
        Ok(())
    }

    #[test]
    fn test_contigs_are_scoped_by_contigset() -> Result<(), Error> {
        let owner = Owner::from("session");
        let mut repository = Memory::default();

        let first = repository.create_contigset(&owner, Some("one"))?;
        let second = repository.create_contigset(&owner, Some("two"))?;

        let created = repository.bulk_create_contigs(
            first.id(),
            vec![new_contig("c1", Some("ACGT")), new_contig("c2", None)],
        )?;
        assert_eq!(created.len(), 2);

        let found = repository.find_contig(first.id(), "c1")?.unwrap();
        assert_eq!(found.sequence(), Some("ACGT"));
        assert!(repository.find_contig(second.id(), "c1")?.is_none());
        assert_eq!(repository.contigs(first.id())?.len(), 2);
        assert!(repository.contigs(second.id())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_membership_has_no_duplicates() -> Result<(), Error> {
        let owner = Owner::from("session");
        let mut repository = Memory::default();

        let contigset = repository.create_contigset(&owner, Some("assembly"))?;
        let c1 = repository.create_contig(contigset.id(), new_contig("c1", None))?;
        let c2 = repository.create_contig(contigset.id(), new_contig("c2", None))?;

        let binset = repository.create_binset(&owner, "metabat")?;
        let bin = repository.create_bin(binset.id(), "bin.1")?;

        assert!(repository.add_member(bin.id(), c2.id())?);
        assert!(repository.add_member(bin.id(), c1.id())?);
        assert!(!repository.add_member(bin.id(), c2.id())?);

        let members = repository
            .members(bin.id())?
            .into_iter()
            .map(|contig| contig.header().to_string())
            .collect::<Vec<_>>();
        assert_eq!(members, vec!["c2", "c1"]);
        assert_eq!(repository.num_members(), 2);
        Ok(())
    }

    #[test]
    fn test_contig_in_bins_of_different_binsets() -> Result<(), Error> {
        let owner = Owner::from("session");
        let mut repository = Memory::default();

        let contigset = repository.create_contigset(&owner, Some("assembly"))?;
        let contig = repository.create_contig(contigset.id(), new_contig("c1", None))?;

        let one = repository.create_binset(&owner, "one")?;
        let two = repository.create_binset(&owner, "two")?;
        let a = repository.create_bin(one.id(), "A")?;
        let b = repository.create_bin(two.id(), "B")?;

        assert!(repository.add_member(a.id(), contig.id())?);
        assert!(repository.add_member(b.id(), contig.id())?);

        assert_eq!(repository.members(a.id())?, vec![contig.clone()]);
        assert_eq!(repository.members(b.id())?, vec![contig]);
        Ok(())
    }
}
