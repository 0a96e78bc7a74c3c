//! Browser console logging.
//!
//! A `tracing-subscriber` layer that formats each event as one line and
//! writes it with the `web_sys::console` method matching its level. Native
//! builds (tests) write to stderr instead.

use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

use crate::config::MAX_LOG_LEVEL;

/// Forwards events at or above `max_level` to the console.
pub struct ConsoleLayer {
    max_level: Level,
}

impl ConsoleLayer {
    pub fn new(max_level: Level) -> Self {
        Self { max_level }
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.max_level {
            return;
        }

        let mut line = LineVisitor::default();
        event.record(&mut line);
        write_console(*metadata.level(), &line.finish(metadata.target()));
    }
}

/// Collects `message` plus `key=value` pairs.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self, target: &str) -> String {
        format!("[{}] {}{}", target, self.message, self.fields)
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(level: Level, line: &str) {
    eprintln!("{} {}", level, line);
}

/// Installs the console layer as the global subscriber. Later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer::new(MAX_LOG_LEVEL))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Captures formatted lines instead of printing them.
    struct Capture(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut line = LineVisitor::default();
            event.record(&mut line);
            let line = line.finish(event.metadata().target());
            self.0.lock().unwrap().push(line);
        }
    }

    #[test]
    fn test_line_format() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Capture(lines.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "slotnav", context_key = "/blog", index = 2, "no children");
        });

        let lines = lines.lock().unwrap();
        assert_eq!(lines.as_slice(), ["[slotnav] no children context_key=/blog index=2"]);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::debug!("still works");
    }
}
