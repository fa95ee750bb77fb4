use std::{cell::RefCell, sync::Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// A log record captured by [`capture_logs`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    /// Level of the record
    pub level: Level,
    /// Target, usually the module path of the call site
    pub target: String,
    /// Formatted message
    pub message: String,
}

#[derive(Debug)]
struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;

static INSTALL: Once = Once::new();

thread_local! {
    static CAPTURED: RefCell<Option<Vec<CapturedRecord>>> = RefCell::new(None);
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|captured| {
            if let Some(records) = captured.borrow_mut().as_mut() {
                records.push(CapturedRecord {
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                });
            }
        });
    }

    fn flush(&self) {}
}

/// Run `f` and return its result with the records it logged on this thread.
///
/// The capturing logger is installed as the global logger on first use.
///
/// # Panics
///
/// Panics if another global logger was installed before.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedRecord>) {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("Another logger is already installed");
        log::set_max_level(LevelFilter::Trace);
    });

    CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
    let result = f();
    let records = CAPTURED
        .with(|captured| captured.borrow_mut().take())
        .unwrap_or_default();
    (result, records)
}
