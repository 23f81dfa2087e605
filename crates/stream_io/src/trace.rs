//! Tracing hooks for the stream adapter.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag and
//! produces no-op inline functions when disabled.

use compress::{Algorithm, Direction, Flush, Progress};

use crate::status::StreamStatus;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const ADAPTER_TARGET: &str = "stream_io::adapter";

/// Traces a stream being opened.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_open(
    direction: Direction,
    algorithm: Algorithm,
    input_chunk: usize,
    output_chunk: usize,
) {
    tracing::debug!(
        target: ADAPTER_TARGET,
        %direction,
        %algorithm,
        input_chunk,
        output_chunk,
        "stream: open"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_open(
    _direction: Direction,
    _algorithm: Algorithm,
    _input_chunk: usize,
    _output_chunk: usize,
) {
}

/// Traces one pull from the upstream source.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_refill(bytes: usize, total_in: u64) {
    tracing::trace!(target: ADAPTER_TARGET, bytes, total_in, "stream: refill");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_refill(_bytes: usize, _total_in: u64) {}

/// Traces the gzip header being stripped from the first chunk.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_header(header_len: usize) {
    tracing::debug!(target: ADAPTER_TARGET, header_len, "stream: gzip header stripped");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_header(_header_len: usize) {}

/// Traces a single engine invocation.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pass(flush: Flush, progress: &Progress) {
    tracing::trace!(
        target: ADAPTER_TARGET,
        ?flush,
        consumed = progress.consumed,
        produced = progress.produced,
        status = ?progress.status,
        "stream: engine pass"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pass(_flush: Flush, _progress: &Progress) {}

/// Traces a status transition, including the recorded failure when there is one.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_transition(
    from: StreamStatus,
    to: StreamStatus,
    reason: Option<&dyn std::fmt::Display>,
) {
    match reason {
        Some(reason) => tracing::warn!(
            target: ADAPTER_TARGET,
            %from,
            %to,
            %reason,
            "stream: status change"
        ),
        None => tracing::debug!(target: ADAPTER_TARGET, %from, %to, "stream: status change"),
    }
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_transition(
    _from: StreamStatus,
    _to: StreamStatus,
    _reason: Option<&dyn std::fmt::Display>,
) {
}

/// Traces teardown with the final byte counters.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_teardown(total_in: u64, total_out: u64) {
    tracing::debug!(target: ADAPTER_TARGET, total_in, total_out, "stream: closed");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_teardown(_total_in: u64, _total_out: u64) {}
