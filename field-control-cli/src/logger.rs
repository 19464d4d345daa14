use chrono::Local;
use log::{set_logger, set_max_level, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Installs [`Logger`] as the global logger. Records are written to stderr so they never mix
/// with command output.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    set_logger(&Logger)?;
    set_max_level(level);
    Ok(())
}

#[derive(Copy, Clone, Debug)]
pub struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!("{}", format_record(record, Local::now().format("%Y-%m-%d %H:%M:%S")));
    }

    fn flush(&self) {}
}

fn format_record<T>(record: &Record, now: T) -> String
where
    T: std::fmt::Display,
{
    let level = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };

    format!(
        "[{}] [{}:{}] [{}] {}",
        now,
        record.file().unwrap_or("???"),
        record.line().unwrap_or(0),
        level,
        record.args()
    )
}
