//! A command line front end for building chord diagram and dashboard
//! payloads from files on disk.
//!
//! ```shell
//! cargo run --release --bin=binchord --features=binaries -- \
//!     matrix --contigs contigs.fa.gz metabat.tsv:bin.1,bin.2 concoct.csv
//! ```
//!
//! Every invocation imports the provided files into a fresh in-memory
//! repository, so nothing is kept between runs.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use binchord::Repository as _;
use binchord::chord;
use binchord::chord::Selection;
use binchord::dashboard;
use binchord::entity::Owner;
use binchord::fasta;
use binchord::import;
use binchord::repository::memory::Memory;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The owner everything is imported for.
const LOCAL_OWNER: &str = "local";

////////////////////////////////////////////////////////////////////////////////////////
// Inputs
////////////////////////////////////////////////////////////////////////////////////////

/// An assignment file with an optional selection of bins.
///
/// Written as `<path>` or `<path>:<bin>,<bin>,...`.
#[derive(Clone, Debug)]
struct AssignmentArg {
    /// The path to the assignment file.
    path: PathBuf,

    /// The selected bins, if only some are wanted.
    bins: Option<String>,
}

impl std::str::FromStr for AssignmentArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Paths may legitimately contain a colon, so only treat the suffix as a
        // selection when the whole argument is not an existing file.
        if Path::new(s).is_file() {
            return Ok(Self {
                path: PathBuf::from(s),
                bins: None,
            });
        }

        match s.rsplit_once(':') {
            Some((path, bins)) if !path.is_empty() => Ok(Self {
                path: PathBuf::from(path),
                bins: Some(bins.to_string()),
            }),
            _ => Ok(Self {
                path: PathBuf::from(s),
                bins: None,
            }),
        }
    }
}

impl AssignmentArg {
    /// The binset name, taken from the file name without extensions.
    fn binset_name(&self) -> Result<String> {
        stem(&self.path)
    }

    /// The selection of bins within the binset.
    fn selection(&self) -> Result<Selection> {
        let binset = self.binset_name()?;

        match &self.bins {
            Some(bins) => format!("{binset}:{bins}")
                .parse::<Selection>()
                .with_context(|| format!("parsing the bin selection for `{binset}`")),
            None => Ok(Selection::all(binset)),
        }
    }
}

/// Gets the file name of a path up to the first `.`.
fn stem(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("invalid file name: {}", path.display()))?;

    match name.split('.').next() {
        Some(stem) if !stem.is_empty() => Ok(stem.to_string()),
        _ => bail!("cannot derive a set name from {}", path.display()),
    }
}

/// Imports the contigs (if provided) and every assignment file.
///
/// Without contigs, the binsets share a single, implicitly named contigset.
/// A file given more than once is imported once, so that several selections
/// can point into the same binset. Distinct files that would get the same
/// binset name are an error.
fn load(contigs: Option<&Path>, assignments: &[AssignmentArg]) -> Result<(Memory, Owner)> {
    let owner = Owner::from(LOCAL_OWNER);
    let mut repository = Memory::default();

    let contigset = match contigs {
        Some(path) => {
            let name = stem(path)?;
            let reader = fasta::open(path)
                .with_context(|| format!("opening FASTA file {}", path.display()))?;

            let import = import::import_contigset(
                &mut repository,
                &owner,
                &name,
                reader.into_inner(),
            )
            .with_context(|| format!("importing contigs from {}", path.display()))?;

            info!("contigs: imported {} contigs as `{name}`", import.count());
            name
        }
        // Every binset has to refer to the same contigset to share contigs.
        None => repository
            .create_contigset(&owner, None)
            .context("creating a contigset")?
            .name()
            .to_string(),
    };

    let mut imported = HashMap::<String, PathBuf>::new();

    for assignment in assignments {
        let name = assignment.binset_name()?;
        let path = fs::canonicalize(&assignment.path)
            .with_context(|| format!("reading assignment file {}", assignment.path.display()))?;

        match imported.get(&name) {
            Some(existing) if *existing == path => continue,
            Some(existing) => bail!(
                "{} and {} would both be imported as binset `{name}`, rename one of them",
                existing.display(),
                path.display()
            ),
            None => {}
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading assignment file {}", path.display()))?;

        let import = import::import_binset(
            &mut repository,
            &owner,
            &name,
            Some(&contigset),
            &text,
        )
        .with_context(|| format!("importing bins from {}", path.display()))?;

        info!("bins: imported {} memberships as `{name}`", import.count());
        imported.insert(name, path);
    }

    Ok((repository, owner))
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Builds chord diagram and dashboard payloads from contigs and bins.
#[derive(Parser)]
struct Args {
    /// The command to run.
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity,
}

/// The commands.
#[derive(Subcommand)]
enum Command {
    /// Prints the chord diagram input (`[matrix, colors]`) for two binsets.
    Matrix {
        /// A FASTA file (optionally gzipped) with the contig sequences.
        #[arg(short, long)]
        contigs: Option<PathBuf>,

        /// The first assignment file, optionally followed by `:<bin>,<bin>,...`.
        first: AssignmentArg,

        /// The second assignment file, optionally followed by `:<bin>,<bin>,...`.
        second: AssignmentArg,

        /// Whether to pretty print the JSON.
        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },

    /// Prints the dashboard payload for any number of binsets.
    Dashboard {
        /// A FASTA file (optionally gzipped) with the contig sequences.
        #[arg(short, long)]
        contigs: Option<PathBuf>,

        /// The assignment files.
        #[arg(required = true)]
        assignments: Vec<AssignmentArg>,

        /// Whether to pretty print the JSON.
        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },
}

/// Serializes a payload to JSON.
fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    match pretty {
        true => serde_json::to_string_pretty(value),
        false => serde_json::to_string(value),
    }
    .context("serializing the payload")
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Matrix {
            contigs,
            first,
            second,
            pretty,
        } => {
            let (repository, owner) = load(contigs.as_deref(), &[first.clone(), second.clone()])?;

            let matrix = chord::build(&repository, &owner, &first.selection()?, &second.selection()?)
                .context("building the chord diagram")?;

            info!("matrix: {} bins", matrix.len());
            println!("{}", to_json(&matrix, pretty)?);
        }
        Command::Dashboard {
            contigs,
            assignments,
            pretty,
        } => {
            let (repository, owner) = load(contigs.as_deref(), &assignments)?;

            let binsets =
                dashboard::assemble(&repository, &owner).context("assembling the dashboard")?;
            println!("{}", to_json(binsets.as_slice(), pretty)?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    run(args)
}
