//! Test prelude for vertex codec tests.
//!
//! Shared fixture builders producing well-formed encoded streams: block
//! layout, plane headers, the tail safety margin and the trailing
//! last-vertex snapshot all match what the encoder emits, so tests
//! exercise the decoder on the same shapes real data has.

pub(crate) use crate::decode::{vertex_block_size, TAIL_MAX_SIZE, VERTEX_HEADER};
pub use rand::{Rng, SeedableRng};
pub use rstest::rstest;

use crate::decode::BYTE_GROUP_SIZE;
use rand::rngs::StdRng;

/// Deterministic RNG for randomized corpora.
pub fn corpus_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn plane_header_size(vertex_count: usize) -> usize {
    let aligned = (vertex_count + BYTE_GROUP_SIZE - 1) & !(BYTE_GROUP_SIZE - 1);
    (aligned / BYTE_GROUP_SIZE).div_ceil(4)
}

/// Builds a stream where every group has selector 0 (all deltas zero), so
/// each decoded vertex repeats the trailing snapshot.
pub fn build_constant_stream(
    vertex_count: usize,
    vertex_size: usize,
    snapshot: [u8; 256],
) -> Vec<u8> {
    let mut out = vec![VERTEX_HEADER];

    let block_size = vertex_block_size(vertex_size);
    let mut offset = 0;
    while offset < vertex_count {
        let block_count = block_size.min(vertex_count - offset);
        // Zero-selector groups store no payload; each plane is header-only.
        for _ in 0..vertex_size {
            out.extend(core::iter::repeat(0u8).take(plane_header_size(block_count)));
        }
        offset += block_count;
    }

    out.extend_from_slice(&[0u8; TAIL_MAX_SIZE]);
    out.extend_from_slice(&snapshot[..vertex_size]);
    out
}

/// Builds a stream of selector-3 groups filled with seeded random
/// literals. Decoded output is arbitrary but well-defined.
pub fn build_random_literal_stream(vertex_count: usize, vertex_size: usize, seed: u64) -> Vec<u8> {
    let mut rng = corpus_rng(seed);
    let mut out = vec![VERTEX_HEADER];

    let block_size = vertex_block_size(vertex_size);
    let mut offset = 0;
    while offset < vertex_count {
        let block_count = block_size.min(vertex_count - offset);
        let aligned = (block_count + BYTE_GROUP_SIZE - 1) & !(BYTE_GROUP_SIZE - 1);

        for _ in 0..vertex_size {
            out.extend(core::iter::repeat(0xffu8).take(plane_header_size(block_count)));
            for _ in 0..aligned / BYTE_GROUP_SIZE {
                let mut literals = [0u8; BYTE_GROUP_SIZE];
                rng.fill(&mut literals[..]);
                out.extend_from_slice(&literals);
            }
        }
        offset += block_count;
    }

    out.extend_from_slice(&[0u8; TAIL_MAX_SIZE]);
    let mut snapshot = vec![0u8; vertex_size];
    rng.fill(&mut snapshot[..]);
    out.extend_from_slice(&snapshot);
    out
}

/// Builds one byte plane of `groups` groups with random selectors and
/// payloads, tail margin included. The payload is generated to be
/// self-consistent: escapes in packed codes get matching overflow bytes.
pub fn build_random_plane(rng: &mut StdRng, groups: usize) -> Vec<u8> {
    let mut header = vec![0u8; groups.div_ceil(4)];
    let mut payload = Vec::new();

    for g in 0..groups {
        let sel = (rng.random::<u32>() % 4) as u8;
        header[g / 4] |= sel << ((g % 4) * 2);

        match sel {
            0 => {}
            1 => {
                let mut packed = [0u8; 4];
                rng.fill(&mut packed[..]);
                payload.extend_from_slice(&packed);

                let escapes: usize = packed
                    .iter()
                    .map(|&b| (0..4).filter(|j| (b >> (6 - 2 * j)) & 3 == 3).count())
                    .sum();
                for _ in 0..escapes {
                    payload.push(rng.random());
                }
            }
            2 => {
                let mut packed = [0u8; 8];
                rng.fill(&mut packed[..]);
                payload.extend_from_slice(&packed);

                let escapes: usize = packed
                    .iter()
                    .map(|&b| usize::from(b >> 4 == 15) + usize::from(b & 15 == 15))
                    .sum();
                for _ in 0..escapes {
                    payload.push(rng.random());
                }
            }
            _ => {
                let mut literals = [0u8; BYTE_GROUP_SIZE];
                rng.fill(&mut literals[..]);
                payload.extend_from_slice(&literals);
            }
        }
    }

    let mut out = header;
    out.extend_from_slice(&payload);
    out.extend_from_slice(&[0u8; TAIL_MAX_SIZE]);
    out
}
