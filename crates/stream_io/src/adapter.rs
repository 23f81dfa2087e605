//! The pull-driven stream adapter.
//!
//! # Pipeline
//!
//! ```text
//! ByteSource --refill--> input buffer --engine--> output buffer --read--> caller
//! ```
//!
//! Each processing pass performs at most one upstream refill and exactly one
//! engine call. A refill only happens once the engine has consumed every byte
//! of the previous chunk, so the engine is never topped up early; output
//! chunks near the end of a stream can therefore be smaller than the buffer.
//!
//! The first upstream read that returns zero bytes switches the engine to
//! [`Flush::Finish`] for the rest of the stream's life.

use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

use compress::{Algorithm, BlockEngine, Direction, EngineStatus, Flush, new_engine};

use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::gzip::{self, HeaderParse};
use crate::source::{ByteSource, FileSource};
use crate::status::{StreamEvent, StreamStatus};
use crate::trace::{
    trace_header, trace_open, trace_pass, trace_refill, trace_teardown, trace_transition,
};

type EventHandler = Box<dyn FnMut(StreamEvent) + Send>;

/// Reads compressed or decompressed bytes incrementally from a [`ByteSource`].
///
/// The stream owns a fixed-size input buffer, a fixed-size output buffer and
/// the block engine. Nothing happens in the background: every refill and
/// engine call runs synchronously inside [`open`](Self::open) or
/// [`read`](Self::read).
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use stream_io::{Algorithm, CompressionStream, Direction, ReaderSource, StreamStatus};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let plain = b"pull me through zlib".repeat(32);
/// let mut compressed = Vec::new();
/// CompressionStream::new(ReaderSource::new(&plain[..]), Direction::Compress, Algorithm::Zlib)?
///     .read_to_end(&mut compressed)?;
///
/// let mut stream =
///     CompressionStream::new(ReaderSource::new(&compressed[..]), Direction::Decompress, Algorithm::Zlib)?;
/// stream.open();
/// let mut restored = Vec::new();
/// let mut chunk = [0u8; 64];
/// loop {
///     let n = stream.read(&mut chunk);
///     if n == 0 {
///         break;
///     }
///     restored.extend_from_slice(&chunk[..n]);
/// }
/// assert_eq!(stream.status(), StreamStatus::AtEnd);
/// assert_eq!(restored, plain);
/// stream.close();
/// # Ok(())
/// # }
/// ```
pub struct CompressionStream<S: ByteSource> {
    source: S,
    direction: Direction,
    algorithm: Algorithm,
    config: StreamConfig,
    status: StreamStatus,
    engine: Option<Box<dyn BlockEngine>>,
    input: Box<[u8]>,
    input_pos: usize,
    input_len: usize,
    output: Box<[u8]>,
    output_pos: usize,
    output_len: usize,
    finalize_requested: bool,
    engine_finished: bool,
    header_consumed: bool,
    last_error: Option<StreamError>,
    event_handler: Option<EventHandler>,
    total_in: u64,
    total_out: u64,
}

impl<S: ByteSource> CompressionStream<S> {
    /// Creates a stream with the default [`StreamConfig`].
    ///
    /// Fails with [`StreamError::Construction`] when no engine exists for the
    /// direction/algorithm pair.
    pub fn new(source: S, direction: Direction, algorithm: Algorithm) -> Result<Self, StreamError> {
        Self::with_config(source, direction, algorithm, StreamConfig::default())
    }

    /// Creates a stream with explicit buffer sizes and compression level.
    pub fn with_config(
        source: S,
        direction: Direction,
        algorithm: Algorithm,
        config: StreamConfig,
    ) -> Result<Self, StreamError> {
        let engine =
            new_engine(direction, algorithm, config.level).map_err(StreamError::Construction)?;
        let input = vec![0u8; config.input_chunk_size.get()].into_boxed_slice();
        let output = vec![0u8; config.effective_output_chunk_size().get()].into_boxed_slice();

        Ok(Self {
            source,
            direction,
            algorithm,
            config,
            status: StreamStatus::NotOpen,
            engine: Some(engine),
            input,
            input_pos: 0,
            input_len: 0,
            output,
            output_pos: 0,
            output_len: 0,
            finalize_requested: false,
            engine_finished: false,
            header_consumed: false,
            last_error: None,
            event_handler: None,
            total_in: 0,
            total_out: 0,
        })
    }

    /// Opens the upstream source and runs one priming pass, so that
    /// [`has_bytes_available`](Self::has_bytes_available) is meaningful
    /// straight away.
    ///
    /// A source that fails to open moves the stream to
    /// [`StreamStatus::Error`].
    ///
    /// # Panics
    ///
    /// Panics unless the stream is in [`StreamStatus::NotOpen`].
    pub fn open(&mut self) {
        assert!(
            self.status == StreamStatus::NotOpen,
            "CompressionStream::open called on a stream that is {}",
            self.status
        );
        trace_open(
            self.direction,
            self.algorithm,
            self.input.len(),
            self.output.len(),
        );

        if let Err(error) = self.source.open() {
            self.fail(StreamError::Upstream(error));
            return;
        }
        self.transition(StreamStatus::Open);
        self.notify(StreamEvent::OpenCompleted);
        self.process();
    }

    /// Copies up to `buf.len()` bytes into `buf` and returns how many were copied.
    ///
    /// While nothing is buffered and the stream is open, processing passes
    /// run until output appears or the stream leaves [`StreamStatus::Open`].
    /// A return of 0 means no more data: check [`status`](Self::status) to
    /// tell [`StreamStatus::AtEnd`] from [`StreamStatus::Error`]. Output
    /// produced before a failure is still returned.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        while self.status == StreamStatus::Open && !self.has_bytes_available() {
            self.process();
        }
        self.copy_out(buf)
    }

    /// Reports whether unread output is buffered. Never triggers a pass.
    pub const fn has_bytes_available(&self) -> bool {
        self.output_pos < self.output_len
    }

    /// Releases both buffers and the engine, closes the source and drops
    /// the event handler. Further calls do nothing.
    pub fn close(&mut self) {
        self.teardown();
    }

    /// Current lifecycle state.
    pub const fn status(&self) -> StreamStatus {
        self.status
    }

    /// The failure that moved the stream to [`StreamStatus::Error`], if any.
    pub const fn last_error(&self) -> Option<&StreamError> {
        self.last_error.as_ref()
    }

    /// Registers a callback invoked synchronously on [`StreamEvent`]s,
    /// replacing any previous one.
    pub fn set_event_handler<F>(&mut self, handler: F)
    where
        F: FnMut(StreamEvent) + Send + 'static,
    {
        if self.status != StreamStatus::Closed {
            self.event_handler = Some(Box::new(handler));
        }
    }

    /// Removes the registered callback.
    pub fn clear_event_handler(&mut self) {
        self.event_handler = None;
    }

    /// Direction fixed at construction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Algorithm fixed at construction.
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Configuration the stream was built with.
    pub const fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Total bytes pulled from the upstream source, header bytes included.
    pub const fn bytes_read_from_source(&self) -> u64 {
        self.total_in
    }

    /// Total bytes handed to the caller.
    pub const fn bytes_delivered(&self) -> u64 {
        self.total_out
    }

    /// Returns an immutable reference to the upstream source.
    pub const fn get_ref(&self) -> &S {
        &self.source
    }

    /// Returns a mutable reference to the upstream source.
    ///
    /// Reading from the source directly desynchronises the stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn copy_out(&mut self, buf: &mut [u8]) -> usize {
        let count = (self.output_len - self.output_pos).min(buf.len());
        buf[..count].copy_from_slice(&self.output[self.output_pos..self.output_pos + count]);
        self.output_pos += count;
        self.total_out += count as u64;
        count
    }

    fn process(&mut self) {
        if self.status != StreamStatus::Open {
            return;
        }
        if self.output_pos == self.output_len {
            self.output_pos = 0;
            self.output_len = 0;
        }
        if self.engine_finished {
            if self.output_len == 0 {
                self.transition(StreamStatus::AtEnd);
                self.notify(StreamEvent::EndEncountered);
            }
            return;
        }
        if self.input_pos == self.input_len && !self.finalize_requested {
            if let Err(error) = self.refill() {
                self.fail(error);
                return;
            }
        }

        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let flush = if self.finalize_requested {
            Flush::Finish
        } else {
            Flush::None
        };
        let pending = &self.input[self.input_pos..self.input_len];
        let had_input = !pending.is_empty();

        match engine.process(pending, &mut self.output[self.output_len..], flush) {
            Ok(progress) => {
                trace_pass(flush, &progress);
                debug_assert!(self.input_pos + progress.consumed <= self.input_len);
                debug_assert!(self.output_len + progress.produced <= self.output.len());
                self.input_pos += progress.consumed;
                self.output_len += progress.produced;

                if progress.status == EngineStatus::End {
                    self.engine_finished = true;
                } else if progress.is_idle() && (had_input || flush == Flush::Finish) {
                    self.fail(StreamError::Stalled);
                    return;
                }
                if progress.produced > 0 {
                    self.notify(StreamEvent::HasBytesAvailable);
                }
            }
            Err(error) => self.fail(StreamError::Engine(error)),
        }
    }

    fn refill(&mut self) -> Result<(), StreamError> {
        let read = loop {
            match self.source.read(&mut self.input) {
                Ok(read) => break read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(StreamError::Upstream(error)),
            }
        };
        self.input_pos = 0;
        self.input_len = read;
        self.total_in += read as u64;
        trace_refill(read, self.total_in);

        let needs_header = self.direction == Direction::Decompress
            && self.algorithm.has_framing_header()
            && !self.header_consumed;

        if read == 0 {
            if needs_header {
                return Err(StreamError::HeaderTruncated { available: 0 });
            }
            self.finalize_requested = true;
            return Ok(());
        }

        if needs_header {
            match gzip::parse_header(&self.input[..read])? {
                HeaderParse::Complete(offset) => {
                    self.input_pos = offset;
                    self.header_consumed = true;
                    trace_header(offset);
                }
                HeaderParse::Incomplete => {
                    return Err(StreamError::HeaderTruncated { available: read });
                }
            }
        }
        Ok(())
    }

    fn transition(&mut self, to: StreamStatus) {
        trace_transition(self.status, to, None);
        self.status = to;
    }

    fn fail(&mut self, error: StreamError) {
        trace_transition(self.status, StreamStatus::Error, Some(&error));
        self.status = StreamStatus::Error;
        self.last_error = Some(error);
        self.notify(StreamEvent::ErrorOccurred);
    }

    fn notify(&mut self, event: StreamEvent) {
        if let Some(handler) = self.event_handler.as_mut() {
            handler(event);
        }
    }

    fn teardown(&mut self) {
        if self.status == StreamStatus::Closed {
            return;
        }
        self.engine = None;
        self.input = Box::default();
        self.output = Box::default();
        self.input_pos = 0;
        self.input_len = 0;
        self.output_pos = 0;
        self.output_len = 0;
        self.source.close();
        self.event_handler = None;
        trace_teardown(self.total_in, self.total_out);
        self.transition(StreamStatus::Closed);
    }

    fn io_error(&self) -> io::Error {
        match &self.last_error {
            Some(error) => io::Error::new(error.kind(), error.to_string()),
            None => io::Error::other("stream failed"),
        }
    }
}

impl CompressionStream<FileSource> {
    /// Creates a stream over the file at `path`, which is opened by
    /// [`open`](Self::open).
    pub fn from_path(
        path: impl Into<PathBuf>,
        direction: Direction,
        algorithm: Algorithm,
    ) -> Result<Self, StreamError> {
        Self::new(FileSource::new(path), direction, algorithm)
    }
}

impl<S: ByteSource> Read for CompressionStream<S> {
    /// Opens the stream on first use, then maps the pull contract onto
    /// [`Read`]: a stream in [`StreamStatus::Error`] with nothing left to
    /// deliver yields an error instead of `Ok(0)`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.status == StreamStatus::NotOpen {
            self.open();
        }
        if buf.is_empty() {
            return Ok(0);
        }
        while self.status == StreamStatus::Open && !self.has_bytes_available() {
            self.process();
        }
        let count = self.copy_out(buf);
        if count == 0 && self.status == StreamStatus::Error {
            return Err(self.io_error());
        }
        Ok(count)
    }
}

impl<S: ByteSource> Drop for CompressionStream<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: ByteSource> fmt::Debug for CompressionStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionStream")
            .field("direction", &self.direction)
            .field("algorithm", &self.algorithm)
            .field("status", &self.status)
            .field("buffered", &(self.output_len - self.output_pos))
            .field("finalize_requested", &self.finalize_requested)
            .field("engine_finished", &self.engine_finished)
            .field("total_in", &self.total_in)
            .field("total_out", &self.total_out)
            .finish_non_exhaustive()
    }
}
