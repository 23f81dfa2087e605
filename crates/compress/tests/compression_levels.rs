//! Tests for compression levels across every compressing engine.
//!
//! This test module verifies:
//! 1. Every numeric level produces output the matching decoder accepts
//! 2. Higher levels do not compress repetitive input worse than the fastest level
//! 3. Incompressible input round trips at every level

use std::num::NonZeroU8;

use compress::{
    Algorithm, BlockEngine, CompressionLevel, Direction, EngineStatus, Flush, new_engine,
};

/// Input generators with different compressibility.
mod corpus {
    /// A short sentence repeated until `size` bytes.
    pub fn repetitive(size: usize) -> Vec<u8> {
        b"The quick brown fox jumps over the lazy dog. "
            .iter()
            .cycle()
            .take(size)
            .copied()
            .collect()
    }

    /// Length-prefixed records with a rotating type byte.
    pub fn records(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut counter = 0u32;
        while data.len() < size {
            let kind = (counter % 5) as u8;
            let len = 16 + (counter % 32) as usize;
            data.extend_from_slice(&(len as u32).to_le_bytes());
            data.push(kind);
            data.extend((0..len).map(|i| (i as u8).wrapping_add(kind)));
            counter += 1;
        }
        data.truncate(size);
        data
    }

    /// Xorshift output: effectively incompressible.
    pub fn noise(size: usize, seed: u64) -> Vec<u8> {
        let mut state = seed | 1;
        (0..size)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 24) as u8
            })
            .collect()
    }
}

fn run(engine: &mut dyn BlockEngine, input: &[u8]) -> Vec<u8> {
    let mut rest = input;
    let mut output = Vec::new();
    let mut scratch = vec![0u8; 8192];
    for _ in 0..100_000 {
        let flush = if rest.is_empty() {
            Flush::Finish
        } else {
            Flush::None
        };
        let step = engine.process(rest, &mut scratch, flush).unwrap();
        rest = &rest[step.consumed..];
        output.extend_from_slice(&scratch[..step.produced]);
        if step.status == EngineStatus::End {
            return output;
        }
    }
    panic!("engine never finished");
}

fn compress(algorithm: Algorithm, level: CompressionLevel, input: &[u8]) -> Vec<u8> {
    let mut engine = new_engine(Direction::Compress, algorithm, level).unwrap();
    run(engine.as_mut(), input)
}

fn decompress(algorithm: Algorithm, input: &[u8]) -> Vec<u8> {
    let mut engine = new_engine(Direction::Decompress, algorithm, CompressionLevel::Default).unwrap();
    run(engine.as_mut(), input)
}

fn compressing_algorithms() -> Vec<Algorithm> {
    Algorithm::available()
        .iter()
        .copied()
        .filter(|algorithm| !algorithm.has_framing_header())
        .collect()
}

#[test]
fn every_numeric_level_round_trips() {
    let input = corpus::records(64 * 1024);
    for algorithm in compressing_algorithms() {
        for value in 1..=9u8 {
            let level = CompressionLevel::Precise(NonZeroU8::new(value).unwrap());
            let packed = compress(algorithm, level, &input);
            assert_eq!(
                decompress(algorithm, &packed),
                input,
                "{algorithm} level {value}"
            );
        }
    }
}

#[test]
fn named_levels_round_trip() {
    let input = corpus::repetitive(32 * 1024);
    for algorithm in compressing_algorithms() {
        for level in [
            CompressionLevel::Fast,
            CompressionLevel::Default,
            CompressionLevel::Best,
        ] {
            let packed = compress(algorithm, level, &input);
            assert!(packed.len() < input.len() / 10, "{algorithm} {level:?}");
            assert_eq!(decompress(algorithm, &packed), input);
        }
    }
}

#[test]
fn best_is_no_worse_than_fast_on_repetitive_input() {
    let input = corpus::records(128 * 1024);
    for algorithm in compressing_algorithms() {
        let fast = compress(algorithm, CompressionLevel::Fast, &input);
        let best = compress(algorithm, CompressionLevel::Best, &input);
        assert!(
            best.len() <= fast.len(),
            "{algorithm}: best {} > fast {}",
            best.len(),
            fast.len()
        );
    }
}

#[test]
fn noise_round_trips_at_every_named_level() {
    let input = corpus::noise(48 * 1024, 0x5eed);
    for algorithm in compressing_algorithms() {
        for level in [CompressionLevel::Fast, CompressionLevel::Best] {
            let packed = compress(algorithm, level, &input);
            assert_eq!(decompress(algorithm, &packed), input, "{algorithm}");
        }
    }
}
