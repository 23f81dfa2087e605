//! Verifies the structured events emitted while a stream runs.

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};

use stream_io::{Algorithm, CompressionStream, Direction, ReaderSource};
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<(String, tracing::Level, String)>>>,
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for Recorder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        self.events.lock().unwrap().push((
            metadata.target().to_owned(),
            *metadata.level(),
            visitor.message.unwrap_or_default(),
        ));
    }
}

fn record(run: impl FnOnce()) -> Vec<(String, tracing::Level, String)> {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, run);
    let events = recorder.events.lock().unwrap();
    events.clone()
}

#[test]
fn lifecycle_is_traced_under_adapter_target() {
    let events = record(|| {
        let compressed = stream_io::compress_to_vec(
            b"traced payload",
            Algorithm::Zlib,
            stream_io::CompressionLevel::Fast,
        )
        .unwrap();
        let mut stream = CompressionStream::new(
            ReaderSource::new(&compressed[..]),
            Direction::Decompress,
            Algorithm::Zlib,
        )
        .unwrap();
        stream.open();
        let mut buf = [0u8; 64];
        while stream.read(&mut buf) > 0 {}
        stream.close();
    });

    assert!(events.iter().all(|(target, _, _)| target == "stream_io::adapter"));
    let messages: Vec<&str> = events.iter().map(|(_, _, message)| message.as_str()).collect();
    assert!(messages.contains(&"stream: open"));
    assert!(messages.contains(&"stream: refill"));
    assert!(messages.contains(&"stream: engine pass"));
    assert!(messages.contains(&"stream: closed"));
    assert!(events.iter().all(|(_, level, _)| *level != tracing::Level::WARN));
}

#[test]
fn failures_are_traced_as_warnings() {
    let events = record(|| {
        let mut stream = CompressionStream::new(
            ReaderSource::new(&b"plainly not a gzip member"[..]),
            Direction::Decompress,
            Algorithm::Gzip,
        )
        .unwrap();
        stream.open();
    });

    let warning = events
        .iter()
        .find(|(_, level, _)| *level == tracing::Level::WARN)
        .expect("failure is logged");
    assert_eq!(warning.2, "stream: status change");
}

#[test]
fn gzip_header_length_is_traced() {
    let member: &[u8] = &[
        0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0x03, 0x2b, 0xc9, 0x2f, 0xc9, 0xe7, 0x02, 0x00,
    ];
    let events = record(|| {
        let mut stream =
            CompressionStream::new(ReaderSource::new(member), Direction::Decompress, Algorithm::Gzip)
                .unwrap();
        stream.open();
    });
    assert!(
        events
            .iter()
            .any(|(_, _, message)| message == "stream: gzip header stripped")
    );
}
