//! Benchmark fixtures for the scoped owners.
//!
//! - [`Payload`]: a cache-line sized `Copy` value (64 bytes, no destructor),
//!   so the benches time allocation and ownership bookkeeping only.
//! - [`single_owners`]: a batch of filled [`SingleOwner`]s.
//! - [`array_owner`]: one block of `len` payloads.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use scoped::{ArrayOwner, SingleOwner};

/// 64-byte value used as the owned type in benchmarks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Payload {
    /// Arbitrary data; the first lane doubles as an id.
    pub lanes: [u64; 8],
}

impl Payload {
    /// Payload whose lanes are derived from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut lanes = [0u64; 8];
        for (i, lane) in lanes.iter_mut().enumerate() {
            *lane = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(i as u32 * 8);
        }
        lanes[0] = seed;
        Self { lanes }
    }
}

/// `count` owners, each holding its own boxed [`Payload`].
pub fn single_owners(count: usize) -> Vec<SingleOwner<Payload>> {
    (0..count as u64)
        .map(|seed| SingleOwner::from_box(Box::new(Payload::new(seed))))
        .collect()
}

/// One owner holding a block of `len` payloads.
pub fn array_owner(len: usize) -> ArrayOwner<Payload> {
    (0..len as u64).map(Payload::new).collect()
}
