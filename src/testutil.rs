use std::fmt::Debug;

use itertools::Itertools;
use proptest::{collection::vec, strategy::Strategy};
use rand::{SeedableRng, seq::index};

use crate::{Interval, RealInterval};

/// A characteristic function that holds on intervals lying entirely inside
/// one of a set of windows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterWindows {
    windows: Vec<Interval>,
}

impl CharacterWindows {
    pub fn new(windows: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let windows = windows.into_iter().map(Interval::from).collect();
        Self { windows }
    }

    pub fn holds<R: RealInterval + ?Sized>(&self, interval: &R) -> bool {
        self.windows.iter().any(|window| window.contains(interval))
    }

    pub fn windows(&self) -> &[Interval] {
        &self.windows
    }
}

/// Asserts that `pieces` are ordered, adjacent, and exactly cover `root`.
#[track_caller]
pub fn assert_partition<R: RealInterval + Debug>(root: &Interval, pieces: &[R]) {
    let (Some(first), Some(last)) = (pieces.first(), pieces.last()) else {
        panic!("no pieces for {root}");
    };
    assert_eq!(first.inf(), root.inf(), "first piece {first:?} of {root}");
    assert_eq!(last.sup(), root.sup(), "last piece {last:?} of {root}");
    for (lhs, rhs) in pieces.iter().tuple_windows() {
        assert!(lhs.inf() <= lhs.sup(), "reversed piece {lhs:?}");
        assert_eq!(lhs.sup(), rhs.inf(), "gap or overlap between {lhs:?} and {rhs:?}");
    }
}

/// A root interval together with up to three windows placed inside it.
pub fn windows_strategy() -> impl Strategy<Value = (Interval, CharacterWindows)> {
    (
        -100.0f64..100.0,
        0.5f64..50.0,
        vec((0.0f64..1.0, 0.0f64..0.5), 0..4),
    )
        .prop_map(|(inf, width, relative)| {
            let root = Interval::new(inf, inf + width);
            let windows = relative.into_iter().map(|(start, len)| {
                let end = (start + len).min(1.0);
                (inf + start * width, inf + end * width)
            });
            (root, CharacterWindows::new(windows))
        })
}

pub struct WindowGen {
    rng: rand::rngs::StdRng,
}

impl WindowGen {
    pub fn new(seed: u64) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self { rng }
    }

    /// Places `count` disjoint windows on a grid of `cells` equal cells
    /// spanning `root`.
    #[track_caller]
    pub fn disjoint(&mut self, root: &Interval, cells: usize, count: usize) -> CharacterWindows {
        assert!(2 * count <= cells, "{count} windows do not fit {cells} cells");
        let step = root.width() / cells as f64;
        let edges = index::sample(&mut self.rng, cells, 2 * count)
            .into_iter()
            .sorted()
            .map(|cell| root.inf() + cell as f64 * step);
        CharacterWindows::new(edges.tuples())
    }
}
