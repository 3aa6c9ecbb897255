//! `binchord` is a crate for turning uploaded contigs and bin assignments
//! into the input of a chord diagram.
//!
//! The crate covers the path from raw upload to rendering payload:
//!
//! - Parsing contig sequences from FASTA files ([`fasta`]) and contig to bin
//!   assignments from delimited text files ([`assignment`]).
//! - Normalizing both into an entity graph of contigsets, binsets, contigs,
//!   and bins held by a [`Repository`] ([`import`]).
//! - Computing the GC content of contigs and bins ([`composition`]).
//! - Ordering two selections of bins and counting the contigs they share
//!   ([`chord`]).
//! - Assembling the nested per-owner payload that a dashboard consumes
//!   ([`dashboard`]).
//!
//! The storage engine is not part of this crate. Everything that needs to
//! persist or look up entities goes through the [`Repository`] trait, and an
//! in-memory implementation ([`repository::memory::Memory`]) is provided for
//! tests and for the command line tool.
//!
//! ## Uploading data
//!
//! Contig sequences are imported as a named contigset, and bin assignments
//! are imported as a named binset that refers to a contigset. Both uploads are
//! rejected if the owner already has a set with the same name, and nothing is
//! written for an upload that fails to parse.
//!
//! ```
//! use binchord::entity::Owner;
//! use binchord::import;
//! use binchord::repository::memory::Memory;
//!
//! let owner = Owner::from("session-0");
//! let mut repository = Memory::default();
//!
//! let fasta = b">c1\nACGT\n>c2\nGGCC\n>c3\nATAT";
//! let contigs = import::import_contigset(&mut repository, &owner, "assembly", &fasta[..])?;
//! assert_eq!(contigs.count(), 3);
//!
//! let assignments = "c1,binA\nc2,binA\nc3,binB";
//! let bins = import::import_binset(
//!     &mut repository,
//!     &owner,
//!     "metabat",
//!     Some("assembly"),
//!     assignments,
//! )?;
//! assert_eq!(bins.count(), 3);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Building a chord diagram
//!
//! Once two binsets are uploaded, a [`chord::Selection`] of bins from each is
//! turned into a symmetric matrix of shared contig counts together with a
//! color for every row.
//!
//! ```
//! use binchord::chord;
//! use binchord::entity::Owner;
//! use binchord::import;
//! use binchord::repository::memory::Memory;
//!
//! let owner = Owner::from("session-0");
//! let mut repository = Memory::default();
//!
//! import::import_contigset(&mut repository, &owner, "assembly", &b">c1\nA\n>c2\nC\n>c3\nG"[..])?;
//! import::import_binset(&mut repository, &owner, "one", Some("assembly"), "c1,A\nc2,A")?;
//! import::import_binset(&mut repository, &owner, "two", Some("assembly"), "c2,B\nc3,B")?;
//!
//! let first = "one".parse::<chord::Selection>()?;
//! let second = "two".parse::<chord::Selection>()?;
//! let matrix = chord::build(&repository, &owner, &first, &second)?;
//!
//! assert_eq!(matrix.values(), &[vec![0, 1], vec![1, 0]]);
//! assert_eq!(serde_json::to_string(&matrix)?, r##"[[[0,1],[1,0]],["#FFDD89","#957244"]]"##);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod assignment;
pub mod chord;
pub mod composition;
pub mod dashboard;
pub mod entity;
pub mod fasta;
pub mod import;
pub mod repository;

pub use repository::Repository;
