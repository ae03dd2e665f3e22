//! Loop matching pre-pass.
//!
//! Pairs every `[` with its `]` before execution starts so loop jumps resolve
//! in O(1). Brackets that cannot be paired are simply left out of the table;
//! the interpreter reports them only if control flow actually reaches them.

/// Bidirectional map between matched `[` and `]` positions.
///
/// `table[i]` holds the matching index for a bracket at index `i`. Non-bracket
/// positions and unmatched brackets are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
    pairs: usize,
}

impl JumpTable {
    /// Scan `code` left to right, pairing brackets with a stack of pending opens.
    ///
    /// A `]` with no pending `[` stops the scan: only the pairs found so far are
    /// recorded. This never fails; imbalance is detected lazily at run time.
    pub fn build(code: &[char]) -> Self {
        let mut targets: Vec<Option<usize>> = vec![None; code.len()];
        let mut pairs = 0;
        let mut stack: Vec<usize> = Vec::new();

        for (i, &c) in code.iter().enumerate() {
            match c {
                '[' => stack.push(i),
                ']' => {
                    let Some(open_index) = stack.pop() else {
                        break;
                    };
                    targets[open_index] = Some(i);
                    targets[i] = Some(open_index);
                    pairs += 1;
                }
                _ => {}
            }
        }

        Self { targets, pairs }
    }

    /// Matching position for the bracket at `pos`, if it was paired.
    pub fn get(&self, pos: usize) -> Option<usize> {
        self.targets.get(pos).copied().flatten()
    }

    /// Number of matched bracket pairs.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }
}
