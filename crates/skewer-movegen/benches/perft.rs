use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use skewer_movegen::movegen::perft;
use skewer_movegen::Board;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_nodes: &[20, 400, 8_902, 197_281],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2_039, 97_862],
    },
    BenchCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2_812, 43_238],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let board = Board::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_idx, expected) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u32;

            // Correctness guard before timing anything.
            let mut warmup = board.clone();
            assert_eq!(
                perft::perft(&mut warmup, depth),
                *expected,
                "node mismatch for {} depth {}",
                case.name,
                depth
            );

            group.throughput(Throughput::Elements(*expected));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                expected,
                |b, expected| {
                    let mut bench_board = board.clone();
                    b.iter(|| {
                        let nodes =
                            perft::perft(black_box(&mut bench_board), black_box(depth));
                        assert_eq!(nodes, *expected);
                        black_box(nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
