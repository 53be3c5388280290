//! Benchmark workloads for bumpkit.
//!
//! - [`mixed_sizes`]: deterministic allocation sizes with a small-object skew
//! - [`word_list`]: deterministic short words for append-heavy buffer runs
//! - [`ARENA_BLOCK_BYTES`]: backing block size used by the arena benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Size of the block the arena benchmarks allocate from (1 MiB).
pub const ARENA_BLOCK_BYTES: usize = 1 << 20;

/// `count` allocation sizes between 1 and 256 bytes, mostly small.
///
/// Uses a fixed xorshift sequence seeded by `seed`, so runs are comparable.
pub fn mixed_sizes(count: usize, seed: u64) -> Vec<usize> {
    let mut state = seed | 1;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            // Three in four requests are 1..=32 bytes.
            if state % 4 == 0 {
                (state >> 8) as usize % 256 + 1
            } else {
                (state >> 8) as usize % 32 + 1
            }
        })
        .collect()
}

/// `count` short lowercase words cycling through a fixed vocabulary.
pub fn word_list(count: usize) -> Vec<&'static str> {
    const WORDS: [&str; 8] = [
        "arena", "bump", "offset", "align", "buffer", "grow", "format", "reset",
    ];
    (0..count).map(|i| WORDS[i % WORDS.len()]).collect()
}
