use log::Level;

/// Emits one structured event through the `log` facade.
///
/// The record body is a flat JSON object: `event` first, then every field of
/// `fields` when it is an object. Non-object `fields` land under `detail`.
pub fn log_event(level: Level, event: &str, fields: serde_json::Value) {
    if level > log::max_level() {
        return;
    }

    log::log!(level, "{}", event_payload(event, fields));
}

fn event_payload(event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    match fields {
        serde_json::Value::Object(extra) => {
            for (key, value) in extra {
                payload.insert(key, value);
            }
        }
        serde_json::Value::Null => {}
        other => {
            payload.insert("detail".to_string(), other);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};

    struct ConsoleLogger;

    static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }

            let line = format!("[{}] {}", record.level().as_str().to_ascii_lowercase(), record.args());
            match record.level() {
                Level::Error => gloo_console::error!(line),
                Level::Warn => gloo_console::warn!(line),
                Level::Info => gloo_console::info!(line),
                Level::Debug | Level::Trace => gloo_console::debug!(line),
            }
        }

        fn flush(&self) {}
    }

    /// Installs the browser console logger. A second call keeps the first
    /// logger and only updates the level.
    pub fn init(level: LevelFilter) {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(level);
    }
}

#[cfg(target_arch = "wasm32")]
pub use console::init;
