//! Tracing subscriber setup: console formatter and initialisation.
use std::io::IsTerminal as _;

use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

use super::logger::STAGE_TARGET;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`FormatEvent`] that renders installer-style console output.
///
/// Colours are only written when the writer supports ANSI escapes.
struct InstallerFormatter;

impl<S, N> FormatEvent<S, N> for InstallerFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        if !writer.has_ansi_escapes() {
            return match level {
                tracing::Level::ERROR => writeln!(writer, "ERROR {msg}"),
                tracing::Level::WARN => writeln!(writer, "WARN  {msg}"),
                tracing::Level::INFO if target == STAGE_TARGET => writeln!(writer, "==> {msg}"),
                _ => writeln!(writer, "    {msg}"),
            };
        }

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if target == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO => writeln!(writer, "    {msg}"),
            _ => writeln!(writer, "    \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout. Debug events
/// (the per-link mappings) are shown only when `verbose` is set. Must be
/// called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(InstallerFormatter)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(make_writer)
        .with_filter(console_level);

    tracing_subscriber::registry().with(console_layer).init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::{Log, Logger};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::{Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(level: LevelFilter, f: impl FnOnce(&Logger)) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let layer = fmt::layer()
            .event_format(InstallerFormatter)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .with_filter(level);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || f(&Logger::new()));
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn emit_all(log: &Logger) {
        log.stage("dot installer");
        log.info("Source:              /src");
        log.debug("/home/u/.vimrc --> /src/vimrc");
        tracing::warn!("careful");
        log.error("boom");
    }

    #[test]
    fn formats_plain_output() {
        let out = capture(LevelFilter::INFO, emit_all);
        insta::assert_snapshot!(out, @r"
        ==> dot installer
            Source:              /src
        WARN  careful
        ERROR boom
        ");
    }

    #[test]
    fn verbose_level_includes_debug_lines() {
        let out = capture(LevelFilter::DEBUG, emit_all);
        assert!(out.contains("    /home/u/.vimrc --> /src/vimrc\n"));
    }
}
