use core::alloc::Layout;
use criterion::{criterion_group, criterion_main, Criterion};
use mesh_vertex_codec::{decode_vertex_buffer_into, VERTEX_HEADER};
use safe_allocator_api::RawAlloc;

#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

pub(crate) fn allocate_align_64(num_bytes: usize) -> RawAlloc {
    let layout = Layout::from_size_align(num_bytes, 64).unwrap();
    RawAlloc::new(layout).unwrap()
}

const TAIL_MAX_SIZE: usize = 32;

fn vertex_block_size(vertex_size: usize) -> usize {
    ((8192 / vertex_size) & !15).min(256)
}

/// Builds an encoded stream where every group uses the given selector.
/// Selector 0 stores nothing per group; selector 3 stores 16 literals.
fn build_stream(vertex_count: usize, vertex_size: usize, selector: u8) -> Vec<u8> {
    let mut out = vec![VERTEX_HEADER];
    let mut state = 0x2545f4914f6cdd1du64;
    let mut next_byte = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state as u8
    };

    let block_size = vertex_block_size(vertex_size);
    let mut offset = 0;
    while offset < vertex_count {
        let block_count = block_size.min(vertex_count - offset);
        let groups = block_count.div_ceil(16);

        for _ in 0..vertex_size {
            let selector_byte =
                selector | (selector << 2) | (selector << 4) | (selector << 6);
            out.extend(core::iter::repeat(selector_byte).take(groups.div_ceil(4)));
            if selector == 3 {
                for _ in 0..groups * 16 {
                    out.push(next_byte());
                }
            }
        }
        offset += block_count;
    }

    out.extend_from_slice(&[0u8; TAIL_MAX_SIZE]);
    out.extend(core::iter::repeat(0u8).take(vertex_size));
    out
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode Vertex Buffer");

    // 65536 vertices of 32 bytes -> 2 MiB of decoded vertex data
    let vertex_count = 65536;
    let vertex_size = 32;
    let decoded_size = vertex_count * vertex_size;

    let mut output_alloc = allocate_align_64(decoded_size);
    let output =
        unsafe { core::slice::from_raw_parts_mut(output_alloc.as_mut_ptr(), decoded_size) };

    group.throughput(criterion::Throughput::Bytes(decoded_size as u64));

    // Best case: all deltas zero, the stream is almost pure headers.
    let zero_stream = build_stream(vertex_count, vertex_size, 0);
    group.bench_function("zero_selector_stream", |b| {
        b.iter(|| {
            decode_vertex_buffer_into(output, vertex_count, vertex_size, &zero_stream).unwrap()
        })
    });

    // Worst case: every group stores 16 raw literal bytes.
    let literal_stream = build_stream(vertex_count, vertex_size, 3);
    group.bench_function("literal_stream", |b| {
        b.iter(|| {
            decode_vertex_buffer_into(output, vertex_count, vertex_size, &literal_stream).unwrap()
        })
    });

    group.finish();
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(target_os = "windows")]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
