//! Text renderings of a merge queue.
//!
//! Connection queue, one merge per line:
//!
//! ```text
//! 0 1
//! 2 0
//! ```
//!
//! Cluster listing, clusters numbered from 1 in surviving-id order, at most
//! 30 ids per line, each cluster followed by a blank line:
//!
//! ```text
//! C1:  2 0 1
//!
//! C2:  3
//!
//! ```

use std::io::{self, Write};

use crate::hierarchy::Dendrogram;

const IDS_PER_LINE: usize = 30;
const CONTINUATION: &str = "     ";

/// Write `"{survivor} {absorbed}"` per merge.
pub fn write_connections<W: Write>(dendrogram: &Dendrogram, mut out: W) -> io::Result<()> {
    for (survivor, absorbed) in dendrogram.pairs() {
        writeln!(out, "{survivor} {absorbed}")?;
    }
    out.flush()
}

/// Write the member list of every remaining cluster.
pub fn write_clusters<W: Write>(dendrogram: &Dendrogram, mut out: W) -> io::Result<()> {
    for (k, members) in dendrogram.clusters().iter().enumerate() {
        write!(out, "C{}:  ", k + 1)?;
        for (i, id) in members.iter().enumerate() {
            if i > 0 && i % IDS_PER_LINE == 0 {
                write!(out, "\n{CONTINUATION}")?;
            }
            write!(out, "{id} ")?;
        }
        write!(out, "\n\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(d: &Dendrogram, f: F) -> String
    where
        F: FnOnce(&Dendrogram, &mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(d, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn connections_one_per_line() {
        let mut d = Dendrogram::new(3);
        d.add_merge(0, 1, 2.0, 2).unwrap();
        d.add_merge(2, 0, 3.0, 3).unwrap();
        assert_eq!(render(&d, |d, w| write_connections(d, w)), "0 1\n2 0\n");
    }

    #[test]
    fn clusters_listing() {
        let mut d = Dendrogram::new(4);
        d.add_merge(0, 1, 2.0, 2).unwrap();
        d.add_merge(2, 0, 3.0, 3).unwrap();
        assert_eq!(
            render(&d, |d, w| write_clusters(d, w)),
            "C1:  2 0 1 \n\nC2:  3 \n\n"
        );
    }

    #[test]
    fn long_clusters_wrap_at_thirty_ids() {
        let mut d = Dendrogram::new(31);
        for b in 1..31 {
            d.add_merge(0, b, 1.0, b + 1).unwrap();
        }
        let text = render(&d, |d, w| write_clusters(d, w));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("C1:  0 1 2 "));
        assert_eq!(lines[0].split_whitespace().count(), 31);
        assert_eq!(lines[1], "     30 ");
        assert_eq!(lines[2], "");
    }
}
