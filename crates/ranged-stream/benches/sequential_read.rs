use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use bytes::Bytes;
use futures_util::stream;
use ranged_stream::{ByteRange, RangeFetcher, SegmentBody, SegmentedRangeStream, StreamOptions};
use std::future::Future;
use std::sync::Arc;

// In-memory fetcher serving 64KB chunks
struct MemoryFetcher {
    data: Arc<Bytes>,
}

impl RangeFetcher for MemoryFetcher {
    type Error = std::io::Error;

    fn open_range(
        &self,
        _url: &str,
        range: ByteRange,
    ) -> impl Future<Output = Result<SegmentBody<Self::Error>, Self::Error>> + Send {
        let len = self.data.len() as u64;
        let start = range.start.min(len) as usize;
        let end = range.end.saturating_add(1).min(len) as usize;
        let body = self.data.slice(start..end);
        async move {
            let chunks: Vec<Result<Bytes, Self::Error>> = (0..body.len())
                .step_by(64 * 1024)
                .map(|i| Ok(body.slice(i..(i + 64 * 1024).min(body.len()))))
                .collect();
            Ok(Box::pin(stream::iter(chunks)) as SegmentBody<Self::Error>)
        }
    }
}

fn bench_sequential_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_read");
    let total_bytes = 16 * 1024 * 1024; // 16MB
    let data = Arc::new(Bytes::from(vec![0u8; total_bytes]));

    // Smaller segments mean more range requests for the same payload
    for segment_size in [64 * 1024u64, 1024 * 1024, 4 * 1024 * 1024].iter() {
        group.throughput(Throughput::Bytes(total_bytes as u64));
        group.bench_with_input(
            BenchmarkId::new("segment_size", segment_size),
            segment_size,
            |b, &segment_size| {
                let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

                b.iter(|| {
                    rt.block_on(async {
                        let fetcher = MemoryFetcher { data: Arc::clone(&data) };
                        let options = StreamOptions::default().segment_size(segment_size);
                        let mut stream = SegmentedRangeStream::new(
                            fetcher,
                            "mem://bench",
                            total_bytes as u64,
                            options,
                        )
                        .unwrap();

                        let mut buf = vec![0u8; 32 * 1024];
                        let mut total = 0usize;
                        loop {
                            let n = stream.read(&mut buf).await.unwrap();
                            if n == 0 {
                                break;
                            }
                            total += n;
                        }
                        black_box(total)
                    })
                });
            },
        );
    }

    group.finish();
}

fn bench_random_seek(c: &mut Criterion) {
    let total_bytes = 16 * 1024 * 1024;
    let data = Arc::new(Bytes::from(vec![0u8; total_bytes]));
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

    c.bench_function("seek_then_read_4k", |b| {
        b.iter(|| {
            rt.block_on(async {
                let fetcher = MemoryFetcher { data: Arc::clone(&data) };
                let options = StreamOptions::default().segment_size(256 * 1024);
                let mut stream =
                    SegmentedRangeStream::new(fetcher, "mem://bench", total_bytes as u64, options)
                        .unwrap();

                let mut buf = [0u8; 4096];
                for offset in (0..total_bytes as i64).step_by(1024 * 1024).rev() {
                    stream.seek(offset, ranged_stream::SeekOrigin::Begin).unwrap();
                    black_box(stream.read(&mut buf).await.unwrap());
                }
            })
        });
    });
}

criterion_group!(benches, bench_sequential_read, bench_random_seek);
criterion_main!(benches);
