//! Ordering the bins around a chord diagram.
//!
//! Bins are ordered by the aggregate GC content of their member contigs, so
//! that bins with a similar composition end up next to each other on the
//! diagram. Ties are broken by the bin name and then by the bin identifier,
//! which makes the order independent of the order the bins were uploaded in.

use std::cmp::Ordering;

use crate::chord::Node;

/// Compares two nodes by GC content, name, and identifier.
fn compare(a: &Node, b: &Node) -> Ordering {
    a.gc()
        .total_cmp(&b.gc())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Sorts bins for display on a chord diagram.
///
/// The sort is stable. When `reverse` is `true`, the resulting order is
/// inverted as a whole. An empty list is returned unchanged.
///
/// # Examples
///
/// ```
/// use binchord::chord::Node;
/// use binchord::chord::order::sort_bins;
/// use binchord::entity::Bin;
/// use binchord::entity::BinId;
/// use binchord::entity::BinsetId;
/// use binchord::entity::Contig;
/// use binchord::entity::ContigId;
/// use binchord::entity::ContigsetId;
///
/// let node = |id, sequence: &str| {
///     let contig = Contig::new(ContigId::new(id), "c", Some(sequence.into()), ContigsetId::new(1));
///     Node::new(Bin::new(BinId::new(id), format!("bin{id}"), BinsetId::new(1)), &[contig])
/// };
///
/// let bins = vec![node(1, "GGGG"), node(2, "ATAT"), node(3, "GCAT")];
///
/// let names = |bins: Vec<Node>| bins.iter().map(|n| n.name().to_string()).collect::<Vec<_>>();
/// assert_eq!(names(sort_bins(bins.clone(), false)), ["bin2", "bin3", "bin1"]);
/// assert_eq!(names(sort_bins(bins, true)), ["bin1", "bin3", "bin2"]);
/// ```
pub fn sort_bins(mut nodes: Vec<Node>, reverse: bool) -> Vec<Node> {
    nodes.sort_by(compare);

    if reverse {
        nodes.reverse();
    }

    nodes
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom as _;

    use super::*;
    use crate::entity::Bin;
    use crate::entity::BinId;
    use crate::entity::BinsetId;
    use crate::entity::Contig;
    use crate::entity::ContigId;
    use crate::entity::ContigsetId;

    fn node(id: u64, name: &str, sequences: &[&str]) -> Node {
        let members = sequences
            .iter()
            .enumerate()
            .map(|(i, sequence)| {
                Contig::new(
                    ContigId::new(id * 100 + i as u64),
                    format!("c{i}"),
                    Some(sequence.to_string()),
                    ContigsetId::new(1),
                )
            })
            .collect::<Vec<_>>();

        Node::new(Bin::new(BinId::new(id), name, BinsetId::new(1)), &members)
    }

    fn ids(nodes: &[Node]) -> Vec<u64> {
        nodes.iter().map(|node| node.id().get()).collect()
    }

    fn bins() -> Vec<Node> {
        vec![
            node(1, "bin.1", &["GGGG", "AAAA"]),
            node(2, "bin.2", &["ATAT"]),
            node(3, "bin.3", &["GCGC", "GC"]),
            node(4, "bin.4", &["GA"]),
            node(5, "bin.5", &[]),
            node(6, "bin.6", &["ACGT", "A"]),
        ]
    }

    #[test]
    fn test_order_by_gc() {
        let sorted = sort_bins(bins(), false);
        assert_eq!(ids(&sorted), vec![2, 5, 6, 1, 4, 3]);
    }

    #[test]
    fn test_equal_gc_falls_back_to_name_then_id() {
        let nodes = vec![
            node(3, "b", &["GA"]),
            node(1, "b", &["AG"]),
            node(2, "a", &["CT"]),
        ];

        assert_eq!(ids(&sort_bins(nodes, false)), vec![2, 1, 3]);
    }

    #[test]
    fn test_idempotent() {
        let sorted = sort_bins(bins(), false);
        let resorted = sort_bins(sorted.clone(), false);
        assert_eq!(ids(&sorted), ids(&resorted));
    }

    #[test]
    fn test_reverse_inverts_whole_order() {
        let mut sorted = ids(&sort_bins(bins(), false));
        sorted.reverse();
        assert_eq!(ids(&sort_bins(bins(), true)), sorted);
    }

    #[test]
    fn test_independent_of_input_order() {
        let expected = ids(&sort_bins(bins(), false));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let mut shuffled = bins();
            shuffled.shuffle(&mut rng);
            assert_eq!(ids(&sort_bins(shuffled, false)), expected);
        }
    }

    #[test]
    fn test_empty() {
        assert!(sort_bins(Vec::new(), false).is_empty());
        assert!(sort_bins(Vec::new(), true).is_empty());
    }
}
