//! The matrix of contigs shared between bins.

use serde::Serialize;
use serde::Serializer;

use crate::chord::Node;

/// A color token used by the renderer for one side of the diagram.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    /// The color of the bins in the first selection.
    pub const FIRST: Color = Color("#FFDD89");

    /// The color of the bins in the second selection.
    pub const SECOND: Color = Color("#957244");

    /// Gets the color as a string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A square matrix of shared contig counts with a color for every row.
///
/// Rows and columns are indexed the same way: first the bins of the first
/// selection, then the bins of the second selection.
///
/// The matrix serializes as the pair `[matrix, colors]`, which is what the
/// chord diagram renderer consumes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matrix {
    /// The shared contig counts.
    values: Vec<Vec<usize>>,

    /// The color of every row.
    colors: Vec<Color>,

    /// The bin name of every row.
    labels: Vec<String>,
}

impl Matrix {
    /// Gets the shared contig counts, row by row.
    pub fn values(&self) -> &[Vec<usize>] {
        &self.values
    }

    /// Gets the number of contigs shared by the bins at rows `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.values[i][j]
    }

    /// Gets the color of every row.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Gets the bin name of every row.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Gets the number of rows (and columns).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Matrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.values, &self.colors).serialize(serializer)
    }
}

/// Builds the matrix of contigs shared between every pair of bins across two
/// ordered lists.
///
/// The entry at `(i, j)` is the number of contigs that are members of both
/// the bin at `i` and the bin at `j`. A bin is never linked to itself: pairs
/// of the same bin (the diagonal, as well as a bin that appears in both lists)
/// are `0`. The matrix is therefore symmetric.
///
/// # Examples
///
/// ```
/// use binchord::chord::Color;
/// use binchord::chord::Node;
/// use binchord::chord::matrix::build_matrix;
/// use binchord::entity::Bin;
/// use binchord::entity::BinId;
/// use binchord::entity::BinsetId;
/// use binchord::entity::Contig;
/// use binchord::entity::ContigId;
/// use binchord::entity::ContigsetId;
///
/// let contig = |id| Contig::new(ContigId::new(id), format!("c{id}"), None, ContigsetId::new(1));
///
/// let a = Node::new(Bin::new(BinId::new(1), "A", BinsetId::new(1)), &[contig(1), contig(2)]);
/// let b = Node::new(Bin::new(BinId::new(2), "B", BinsetId::new(2)), &[contig(2), contig(3)]);
///
/// let matrix = build_matrix(&[a], &[b]);
/// assert_eq!(matrix.values(), &[vec![0, 1], vec![1, 0]]);
/// assert_eq!(matrix.colors(), &[Color::FIRST, Color::SECOND]);
/// ```
pub fn build_matrix(bins1: &[Node], bins2: &[Node]) -> Matrix {
    let nodes = bins1.iter().chain(bins2).collect::<Vec<_>>();
    let mut values = vec![vec![0usize; nodes.len()]; nodes.len()];

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            if a.id() == b.id() {
                continue;
            }

            let shared = a.contigs().intersection(b.contigs()).count();
            values[i][j] = shared;
            values[j][i] = shared;
        }
    }

    let colors = std::iter::repeat(Color::FIRST)
        .take(bins1.len())
        .chain(std::iter::repeat(Color::SECOND).take(bins2.len()))
        .collect();

    let labels = nodes.iter().map(|node| node.name().to_string()).collect();

    Matrix {
        values,
        colors,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    use super::*;
    use crate::entity::Bin;
    use crate::entity::BinId;
    use crate::entity::BinsetId;
    use crate::entity::Contig;
    use crate::entity::ContigId;
    use crate::entity::ContigsetId;

    fn node(id: u64, binset: u64, contigs: &[u64]) -> Node {
        let members = contigs
            .iter()
            .map(|c| Contig::new(ContigId::new(*c), format!("c{c}"), None, ContigsetId::new(1)))
            .collect::<Vec<_>>();

        Node::new(
            Bin::new(BinId::new(id), format!("bin{id}"), BinsetId::new(binset)),
            &members,
        )
    }

    fn assert_symmetric(matrix: &Matrix) {
        for i in 0..matrix.len() {
            assert_eq!(matrix.values()[i].len(), matrix.len());

            for j in 0..matrix.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn test_shared_contigs_across_and_within_lists() {
        let bins1 = [node(1, 1, &[1, 2, 3]), node(2, 1, &[3, 4])];
        let bins2 = [node(3, 2, &[2, 3, 4]), node(4, 2, &[9])];

        let matrix = build_matrix(&bins1, &bins2);
        assert_eq!(
            matrix.values(),
            &[
                vec![0, 1, 2, 0],
                vec![1, 0, 2, 0],
                vec![2, 2, 0, 0],
                vec![0, 0, 0, 0],
            ]
        );
        assert_eq!(
            matrix.colors(),
            &[Color::FIRST, Color::FIRST, Color::SECOND, Color::SECOND]
        );
        assert_eq!(matrix.labels(), &["bin1", "bin2", "bin3", "bin4"]);
    }

    #[test]
    fn test_same_bin_in_both_lists_is_not_linked() {
        let a = node(1, 1, &[1, 2]);
        let b = node(2, 2, &[2]);

        let matrix = build_matrix(&[a.clone(), b.clone()], &[a, b]);
        assert_eq!(
            matrix.values(),
            &[
                vec![0, 1, 0, 1],
                vec![1, 0, 1, 0],
                vec![0, 1, 0, 1],
                vec![1, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn test_empty_lists() {
        let matrix = build_matrix(&[], &[]);
        assert!(matrix.is_empty());
        assert!(matrix.colors().is_empty());

        let matrix = build_matrix(&[node(1, 1, &[1])], &[]);
        assert_eq!(matrix.values(), &[vec![0]]);
        assert_eq!(matrix.colors(), &[Color::FIRST]);
    }

    #[test]
    fn test_symmetric_for_random_memberships() {
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..50 {
            let mut random_nodes = |binset: u64, offset: u64| {
                (0..rng.gen_range(0..6u64))
                    .map(|i| {
                        let contigs = (0..rng.gen_range(0..10))
                            .map(|_| rng.gen_range(0..20u64))
                            .collect::<Vec<_>>();
                        node(offset + i, binset, &contigs)
                    })
                    .collect::<Vec<_>>()
            };

            let bins1 = random_nodes(1, 0);
            let bins2 = random_nodes(2, 100);

            let matrix = build_matrix(&bins1, &bins2);
            assert_eq!(matrix.len(), bins1.len() + bins2.len());
            assert_eq!(matrix.colors().len(), matrix.len());
            assert_symmetric(&matrix);
        }
    }

    #[test]
    fn test_serializes_as_pair() -> Result<(), serde_json::Error> {
        let matrix = build_matrix(&[node(1, 1, &[1])], &[node(2, 2, &[1])]);
        assert_eq!(
            serde_json::to_string(&matrix)?,
            r##"[[[0,1],[1,0]],["#FFDD89","#957244"]]"##
        );
        Ok(())
    }
}
