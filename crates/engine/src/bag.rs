//! The finite pool of undrawn tiles, and the discard pile that refills it.

use rand::Rng;
use serde::Serialize;

use crate::{Color, ALL_COLORS, TILE_COLORS};

/// Multiset of tiles stored as per-color counts
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TileBag {
    counts: [u16; TILE_COLORS],
}

impl TileBag {
    /// Full bag with `per_color` tiles of each color
    pub fn full(per_color: u16) -> Self {
        TileBag {
            counts: [per_color; TILE_COLORS],
        }
    }

    pub fn from_counts(counts: [u16; TILE_COLORS]) -> Self {
        TileBag { counts }
    }

    pub fn counts(&self) -> [u16; TILE_COLORS] {
        self.counts
    }

    pub fn count(&self, color: Color) -> u16 {
        self.counts[color.index()]
    }

    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add(&mut self, color: Color) {
        self.counts[color.index()] += 1;
    }

    /// Move every tile of `other` into this bag, leaving `other` empty
    pub fn refill(&mut self, other: &mut TileBag) {
        for color in ALL_COLORS {
            self.counts[color.index()] += other.counts[color.index()];
        }
        other.counts = [0; TILE_COLORS];
    }

    /// Draw a single tile uniformly at random
    pub fn draw_one(&mut self, rng: &mut impl Rng) -> Option<Color> {
        let total = self.len();
        if total == 0 {
            return None;
        }

        // Rank of the drawn tile within the multiset
        let mut pick = rng.random_range(0..total);
        for color in ALL_COLORS {
            let count = self.counts[color.index()] as usize;
            if pick < count {
                self.counts[color.index()] -= 1;
                return Some(color);
            }
            pick -= count;
        }

        unreachable!("pick is below the bag total")
    }

    /// Draw up to `n` tiles without replacement. The flag is false when the
    /// bag ran out before `n` were drawn; the tiles that were drawn are still
    /// returned.
    pub fn draw(&mut self, n: usize, rng: &mut impl Rng) -> (Vec<Color>, bool) {
        let mut drawn = Vec::with_capacity(n.min(self.len()));
        while drawn.len() < n {
            match self.draw_one(rng) {
                Some(color) => drawn.push(color),
                None => return (drawn, false),
            }
        }
        (drawn, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_bag() {
        let bag = TileBag::full(20);
        assert_eq!(bag.len(), 100);
        for color in ALL_COLORS {
            assert_eq!(bag.count(color), 20);
        }
    }

    #[test]
    fn test_draw_removes_drawn_tiles() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bag = TileBag::full(20);

        let (tiles, complete) = bag.draw(4, &mut rng);
        assert!(complete);
        assert_eq!(tiles.len(), 4);
        assert_eq!(bag.len(), 96);
        for color in ALL_COLORS {
            let drawn = tiles.iter().filter(|&&c| c == color).count() as u16;
            assert_eq!(bag.count(color) + drawn, 20);
        }
    }

    #[test]
    fn test_short_draw_returns_what_was_there() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bag = TileBag::from_counts([1, 0, 1, 0, 0]);

        let (mut tiles, complete) = bag.draw(4, &mut rng);
        tiles.sort();
        assert!(!complete);
        assert_eq!(tiles, vec![Color::Blue, Color::Red]);
        assert!(bag.is_empty());

        let (tiles, complete) = bag.draw(4, &mut rng);
        assert!(!complete);
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_refill_moves_discards() {
        let mut bag = TileBag::from_counts([1, 0, 0, 0, 0]);
        let mut discards = TileBag::from_counts([2, 3, 0, 0, 1]);
        bag.refill(&mut discards);
        assert_eq!(bag.counts(), [3, 3, 0, 0, 1]);
        assert!(discards.is_empty());
    }

    #[test]
    fn test_draw_reaches_every_color() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut seen = [false; TILE_COLORS];
        for _ in 0..50 {
            let mut bag = TileBag::full(1);
            if let Some(color) = bag.draw_one(&mut rng) {
                seen[color.index()] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "every color should eventually be drawn first");
    }
}
