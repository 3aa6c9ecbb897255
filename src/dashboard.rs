//! The per-owner payload behind the dashboard.
//!
//! The dashboard shows every binset of an owner with its bins and, for each
//! bin, the GC content of every member contig. The payload is a nested list
//! that serializes to the JSON shape the client expects:
//!
//! ```json
//! [
//!   {
//!     "binset": "metabat",
//!     "active": false,
//!     "bins": [
//!       {
//!         "name": "bin.1",
//!         "contigs": [{ "name": "NODE_1", "gc": 0.42 }],
//!         "status": "visible"
//!       }
//!     ]
//!   }
//! ]
//! ```

use serde::Serialize;

use crate::Repository;
use crate::composition::gc_content;
use crate::entity::Owner;

/// The display status of a bin.
///
/// Only [`Status::Visible`] is produced here. The other states are set by
/// the client.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The bin is shown.
    #[default]
    Visible,

    /// The bin is hidden.
    Hidden,

    /// The bin was removed from the view.
    Deleted,
}

/// A contig within a [`BinView`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContigView {
    /// The contig header.
    pub name: String,

    /// The GC content (`0.0` for contigs without sequence data).
    pub gc: f64,
}

/// A bin within a [`BinsetView`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinView {
    /// The bin name.
    pub name: String,

    /// The member contigs.
    pub contigs: Vec<ContigView>,

    /// The display status.
    pub status: Status,
}

/// A binset as shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinsetView {
    /// The binset name.
    #[serde(rename = "binset")]
    pub binset_name: String,

    /// Whether the binset is selected on the client (always `false` here).
    pub active: bool,

    /// The bins of the binset.
    pub bins: Vec<BinView>,
}

/// Assembles the dashboard payload for an owner.
///
/// Binsets and bins are listed in the order they were created and contigs in
/// the order they were assigned to the bin.
///
/// # Examples
///
/// ```
/// use binchord::dashboard;
/// use binchord::dashboard::Status;
/// use binchord::entity::Owner;
/// use binchord::import;
/// use binchord::repository::memory::Memory;
///
/// let owner = Owner::from("session-0");
/// let mut repository = Memory::default();
///
/// import::import_contigset(&mut repository, &owner, "assembly", &b">c1\nGGCC\n>c2\nATAT"[..])?;
/// import::import_binset(&mut repository, &owner, "metabat", Some("assembly"), "c1,A\nc2,A\nc3,B")?;
///
/// let binsets = dashboard::assemble(&repository, &owner)?;
/// assert_eq!(binsets.len(), 1);
/// assert_eq!(binsets[0].binset_name, "metabat");
///
/// let bin = &binsets[0].bins[0];
/// assert_eq!(bin.name, "A");
/// assert_eq!(bin.status, Status::Visible);
/// assert_eq!(bin.contigs[0].gc, 1.0);
/// assert_eq!(bin.contigs[1].gc, 0.0);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn assemble<R>(repository: &R, owner: &Owner) -> Result<Vec<BinsetView>, R::Error>
where
    R: Repository,
{
    let mut views = Vec::new();

    for binset in repository.binsets(owner)? {
        let mut bins = Vec::new();

        for bin in repository.bins(binset.id())? {
            let contigs = repository
                .members(bin.id())?
                .into_iter()
                .map(|contig| ContigView {
                    gc: contig.sequence().map(gc_content).unwrap_or_default(),
                    name: contig.header().to_string(),
                })
                .collect();

            bins.push(BinView {
                name: bin.name().to_string(),
                contigs,
                status: Status::Visible,
            });
        }

        views.push(BinsetView {
            binset_name: binset.name().to_string(),
            active: false,
            bins,
        });
    }

    Ok(views)
}

/// Serializes a dashboard payload to JSON.
pub fn to_json(binsets: &[BinsetView]) -> serde_json::Result<String> {
    serde_json::to_string(binsets)
}
