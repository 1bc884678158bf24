//! Self-adjusting Huffman tree over the LZAH symbol alphabet.
//!
//! The tree is stored as one flat slot array ordered by non-decreasing
//! weight. At every level, adjacent slots are true siblings (they share a
//! parent), so an increment can be absorbed by swapping the bumped node with
//! the rightmost slot still lighter than it and continuing the walk from
//! there. The encoder maintains the identical structure and mutates it on
//! the identical schedule, which is what makes the bit stream decodable at
//! all: any divergence in update order desynchronizes every code that
//! follows.

use kycmid_core::bitstream::BitReader;
use kycmid_core::error::Result;

/// Symbol alphabet size: 256 literal bytes plus 58 match-length classes
/// (313 - 256 + 1 classes, copy lengths 3..=60).
pub const ALPHABET_SIZE: usize = 314;

/// Total node count of a full binary tree over the alphabet.
pub const TREE_SIZE: usize = 2 * ALPHABET_SIZE - 1;

/// Leaf ids occupy `LEAF_BASE..LEAF_BASE + ALPHABET_SIZE`; a leaf's symbol
/// is its id minus `LEAF_BASE`.
pub(crate) const LEAF_BASE: usize = TREE_SIZE;

/// Slot holding the root. The array is weight-sorted, so the root is last.
pub(crate) const ROOT: usize = TREE_SIZE - 1;

/// Root weight that triggers a full rebuild with halved leaf weights.
pub(crate) const MAX_FREQUENCY: u32 = 0x8000;

/// Weight of the slot just past the root. Heavier than any real node, it
/// stops the rightward swap scan without a bounds test.
const SENTINEL_WEIGHT: u32 = 0xFFFF;

/// Adaptive Huffman tree state.
///
/// `child[slot]` holds either the first of two adjacent child slots (the
/// sibling is `child[slot] + 1`) or a leaf id. `parent[]` is the inverse,
/// indexed by both slot indexes and leaf ids, because node identities
/// migrate between slots during rebalancing.
#[derive(Debug, Clone)]
pub struct AdaptiveHuffman {
    /// Node weights by slot; the extra final entry is the scan sentinel.
    frequency: [u32; TREE_SIZE + 1],
    /// Child pointer (pair base slot) or leaf id, by slot.
    child: [usize; TREE_SIZE],
    /// Owning slot, indexed by slot pair base and by leaf id.
    parent: [usize; TREE_SIZE + ALPHABET_SIZE],
}

impl AdaptiveHuffman {
    /// Build the initial tree: every leaf at weight 1, internal nodes
    /// paired up bottom-up left to right.
    pub fn new() -> Self {
        let mut frequency = [0u32; TREE_SIZE + 1];
        let mut child = [0usize; TREE_SIZE];
        let mut parent = [0usize; TREE_SIZE + ALPHABET_SIZE];

        for symbol in 0..ALPHABET_SIZE {
            frequency[symbol] = 1;
            child[symbol] = LEAF_BASE + symbol;
            parent[LEAF_BASE + symbol] = symbol;
        }

        let mut pair = 0;
        for slot in ALPHABET_SIZE..TREE_SIZE {
            frequency[slot] = frequency[pair] + frequency[pair + 1];
            child[slot] = pair;
            parent[pair] = slot;
            parent[pair + 1] = slot;
            pair += 2;
        }

        frequency[TREE_SIZE] = SENTINEL_WEIGHT;
        parent[ROOT] = 0;

        Self {
            frequency,
            child,
            parent,
        }
    }

    /// Decode one symbol by descending from the root.
    ///
    /// Each bit selects the right (1) or left (0) half of the current
    /// sibling pair.
    pub fn decode_symbol(&self, bits: &mut BitReader<'_>) -> Result<u16> {
        let mut node = self.child[ROOT];
        while node < LEAF_BASE {
            if bits.read_bit()? {
                node += 1;
            }
            node = self.child[node];
        }
        Ok((node - LEAF_BASE) as u16)
    }

    /// Record one occurrence of `symbol` and rebalance.
    ///
    /// The rebuild check comes first, before the increment walk: the symbol
    /// whose decode observed the saturated root was still read through the
    /// old tree, and the encoder does the same.
    pub fn update(&mut self, symbol: u16) {
        if self.frequency[ROOT] >= MAX_FREQUENCY {
            self.rebuild();
        }

        let mut slot = self.parent[LEAF_BASE + usize::from(symbol)];
        loop {
            self.frequency[slot] += 1;
            let weight = self.frequency[slot];

            // If the bumped slot now outweighs its right neighbor, swap it
            // with the rightmost slot still lighter than it. The sentinel
            // weight bounds the scan.
            let mut target = slot + 1;
            if self.frequency[target] < weight {
                while self.frequency[target] < weight {
                    target += 1;
                }
                target -= 1;

                self.frequency[slot] = self.frequency[target];
                self.frequency[target] = weight;

                let moved = self.child[slot];
                self.parent[moved] = target;
                if moved < LEAF_BASE {
                    self.parent[moved + 1] = target;
                }
                self.child[slot] = self.child[target];
                self.child[target] = moved;
                let back = self.child[slot];
                self.parent[back] = slot;
                if back < LEAF_BASE {
                    self.parent[back + 1] = slot;
                }

                slot = target;
            }

            slot = self.parent[slot];
            if slot == 0 {
                // Only the root's parent link is 0; slot 0 is always the
                // lightest leaf and never a parent.
                break;
            }
        }
    }

    /// Full rebuild: halve every leaf weight (rounding up, never below 1)
    /// and reassemble the internal nodes from scratch.
    fn rebuild(&mut self) {
        // Compact the leaves to the front in their current slot order.
        let mut leaf = 0;
        for slot in 0..TREE_SIZE {
            if self.child[slot] >= LEAF_BASE {
                self.frequency[leaf] = (self.frequency[slot] + 1) >> 1;
                self.child[leaf] = self.child[slot];
                leaf += 1;
            }
        }

        // Merge adjacent pairs bottom-up. Each new parent is inserted into
        // its weight-sorted place by a linear scan from the right; the scan
        // cannot pass the pair it just consumed, so it stays inside the
        // live region.
        let mut next = ALPHABET_SIZE;
        let mut pair = 0;
        while pair < TREE_SIZE - 1 {
            let weight = self.frequency[pair] + self.frequency[pair + 1];
            let mut at = next - 1;
            while weight < self.frequency[at] {
                at -= 1;
            }
            at += 1;
            self.frequency.copy_within(at..next, at + 1);
            self.frequency[at] = weight;
            self.child.copy_within(at..next, at + 1);
            self.child[at] = pair;
            next += 1;
            pair += 2;
        }

        // Recompute every back-link from the rebuilt child pointers.
        for slot in 0..TREE_SIZE {
            let node = self.child[slot];
            self.parent[node] = slot;
            if node < LEAF_BASE {
                self.parent[node + 1] = slot;
            }
        }
    }

    /// Current root weight.
    #[cfg(test)]
    pub(crate) fn root_weight(&self) -> u32 {
        self.frequency[ROOT]
    }

    /// Emit the current code for `symbol` by walking the back-links from
    /// its leaf. Bits are collected deepest-first, so the returned value is
    /// written MSB-first to reproduce what the decoder consumes. Mirror of
    /// `decode_symbol`, used to assemble test fixtures.
    #[cfg(test)]
    pub(crate) fn symbol_code(&self, symbol: u16) -> (u32, u8) {
        let mut code = 0u32;
        let mut len = 0u8;
        let mut slot = self.parent[LEAF_BASE + usize::from(symbol)];
        while slot != ROOT {
            let up = self.parent[slot];
            let bit = (slot - self.child[up]) as u32;
            code |= bit << len;
            len += 1;
            slot = up;
        }
        (code, len)
    }

    /// Structural self-check used by tests: weights non-decreasing across
    /// the slot array, and `parent[]` the exact inverse of `child[]`.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for slot in 0..ROOT {
            assert!(
                self.frequency[slot] <= self.frequency[slot + 1],
                "weights out of order at slot {slot}"
            );
        }
        assert_eq!(self.parent[ROOT], 0, "root back-link clobbered");
        let mut seen = [false; ALPHABET_SIZE];
        for slot in 0..TREE_SIZE {
            let node = self.child[slot];
            if node >= LEAF_BASE {
                let symbol = node - LEAF_BASE;
                assert!(!seen[symbol], "symbol {symbol} has two leaves");
                seen[symbol] = true;
                assert_eq!(self.parent[node], slot, "stale leaf back-link");
            } else {
                assert_eq!(self.parent[node], slot, "stale pair back-link");
                assert_eq!(self.parent[node + 1], slot, "stale sibling back-link");
                assert_eq!(
                    self.frequency[slot],
                    self.frequency[node] + self.frequency[node + 1],
                    "internal weight is not the sum of its children"
                );
            }
        }
        assert!(seen.iter().all(|&s| s), "missing leaf");
    }
}

impl Default for AdaptiveHuffman {
    fn default() -> Self {
        Self::new()
    }
}
