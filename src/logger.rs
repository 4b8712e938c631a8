use std::fmt::Write as _;
use std::io::Write;
use std::time::Instant;

use log::kv::{Key, Value, VisitSource};
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

struct ChainrunLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    filter: LevelFilter,
    start: Instant,
}

/// Collects `key=value` pairs of a record into a single suffix string.
struct FieldWriter(String);

impl<'kvs> VisitSource<'kvs> for FieldWriter {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), log::kv::Error> {
        let _ = write!(self.0, " {key}={value}");
        Ok(())
    }
}

pub(crate) fn format_fields(record: &Record) -> String {
    let mut fields = FieldWriter(String::new());
    let _ = record.key_values().visit(&mut fields);
    fields.0
}

impl Log for ChainrunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.start.elapsed().as_secs_f64();
        let _ = writeln!(
            self.sink.lock(),
            "[{elapsed:.3}s] [{}] {} - {}{}",
            record.level(),
            record.target(),
            record.args(),
            format_fields(record)
        );
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

/// Initialize the global logger. Must be called once before any logging.
///
/// Records go to `log_file` when given (default level `Info`), otherwise to stderr where
/// logging stays off unless `RUST_LOG` asks for it.
///
/// # Errors
///
/// Returns `log::SetLoggerError` if a logger was already installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), log::SetLoggerError> {
    let default_filter = if log_file.is_some() {
        LevelFilter::Info
    } else {
        LevelFilter::Off
    };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default_filter);

    let sink: Box<dyn Write + Send> = match log_file {
        Some(file) => Box::new(file),
        None => Box::new(std::io::stderr()),
    };

    let logger = ChainrunLogger {
        sink: Mutex::new(sink),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}
