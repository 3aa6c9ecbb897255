//! Nucleotide composition of sequences.

/// Returns whether a nucleotide is a `G` or a `C` (in either case).
fn is_gc(nucleotide: char) -> bool {
    matches!(nucleotide, 'G' | 'C' | 'g' | 'c')
}

/// Computes the GC content of a sequence.
///
/// The GC content is the fraction of nucleotides that are `G` or `C`
/// (ignoring case) over the length of the whole sequence in characters. An
/// empty sequence has a GC content of `0.0`.
///
/// # Examples
///
/// ```
/// use binchord::composition::gc_content;
///
/// assert_eq!(gc_content(""), 0.0);
/// assert_eq!(gc_content("GCGC"), 1.0);
/// assert_eq!(gc_content("ATAT"), 0.0);
/// assert_eq!(gc_content("gcAT"), 0.5);
/// ```
pub fn gc_content(sequence: &str) -> f64 {
    Composition::default().add(sequence).gc()
}

/// A running tally of GC and total nucleotide counts over one or more
/// sequences.
///
/// This is used to compute the aggregate GC content of a bin, where every
/// nucleotide of every member contig carries the same weight.
///
/// # Examples
///
/// ```
/// use binchord::composition::Composition;
///
/// let composition = Composition::default().add("GG").add("ATAT").add("");
/// assert_eq!(composition.total(), 6);
/// assert_eq!(composition.gc_count(), 2);
/// assert!((composition.gc() - 1.0 / 3.0).abs() < f64::EPSILON);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Composition {
    /// The number of `G` and `C` nucleotides.
    gc_count: usize,

    /// The total number of nucleotides.
    total: usize,
}

impl Composition {
    /// Adds a sequence to the tally.
    pub fn add(mut self, sequence: &str) -> Self {
        for c in sequence.chars() {
            self.gc_count += usize::from(is_gc(c));
            self.total += 1;
        }

        self
    }

    /// Gets the number of `G` and `C` nucleotides seen.
    pub fn gc_count(&self) -> usize {
        self.gc_count
    }

    /// Gets the total number of nucleotides seen.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Gets the GC content over everything seen so far.
    ///
    /// Returns `0.0` when nothing has been seen.
    pub fn gc(&self) -> f64 {
        match self.total {
            0 => 0.0,
            total => self.gc_count as f64 / total as f64,
        }
    }
}
