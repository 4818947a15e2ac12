//! Determinism verification helpers.

use std::fmt;

/// Result of running a generation function several times.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    pub runs: usize,
    /// Size of the first run's output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First differing byte, if any.
    pub diff: Option<DiffInfo>,
}

/// Where two runs first disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    pub offset: usize,
    pub expected: Option<u8>,
    pub actual: Option<u8>,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at byte {}: expected {:?}, got {:?} (run {})",
            self.offset, self.expected, self.actual, self.run_index
        )
    }
}

/// Runs `generate` `runs` times and compares every output to the first.
pub fn verify_determinism<F>(generate: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<u8>,
{
    let reference = generate();
    let hash = blake3::hash(&reference).to_hex().to_string();

    let diff = (1..runs).find_map(|run_index| {
        let output = generate();
        first_difference(&reference, &output).map(|offset| DiffInfo {
            offset,
            expected: reference.get(offset).copied(),
            actual: output.get(offset).copied(),
            run_index,
        })
    });

    DeterminismResult {
        is_deterministic: diff.is_none(),
        runs,
        output_size: reference.len(),
        hash,
        diff,
    }
}

/// Offset of the first differing byte, or `None` when the slices are equal.
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}
