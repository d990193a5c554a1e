//! Tracing setup.
//!
//! In the browser events go to the devtools console through [`ConsoleLayer`];
//! natively (tests, tooling) they go through the usual `fmt` layer filtered by
//! `RUST_LOG`. Calling [`init`] more than once is harmless.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Build-time default, overridable with `LOG_LEVEL=debug wasm-pack build`.
const DEFAULT_LEVEL: &str = match option_env!("LOG_LEVEL") {
    Some(level) => level,
    None => "info",
};

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init() -> bool {
    init_with_level(DEFAULT_LEVEL)
}

#[cfg(target_arch = "wasm32")]
pub fn init_with_level(level: &str) -> bool {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(parse_level(level))
        .with(ConsoleLayer)
        .try_init()
        .is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_with_level(level: &str) -> bool {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

/// Unknown names fall back to `INFO`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Collects an event's message and its `key=value` fields into one line.
#[derive(Default)]
pub struct EventLine {
    message: String,
    fields: String,
}

impl EventLine {
    pub fn render(&self, level: &Level, target: &str) -> String {
        let mut line = format!("{:>5} {}: {}", level, target, self.message);
        if !self.fields.is_empty() {
            line.push(' ');
            line.push_str(&self.fields);
        }
        line
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for EventLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// Forwards events to `console.error/warn/log/debug` by level.
#[cfg(target_arch = "wasm32")]
pub struct ConsoleLayer;

#[cfg(target_arch = "wasm32")]
impl<S> tracing_subscriber::Layer<S> for ConsoleLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let metadata = event.metadata();
        let mut line = EventLine::default();
        event.record(&mut line);
        let text = wasm_bindgen::JsValue::from_str(&line.render(metadata.level(), metadata.target()));

        match *metadata.level() {
            Level::ERROR => web_sys::console::error_1(&text),
            Level::WARN => web_sys::console::warn_1(&text),
            Level::INFO => web_sys::console::log_1(&text),
            _ => web_sys::console::debug_1(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN "), LevelFilter::WARN);
        assert_eq!(parse_level("chatty"), LevelFilter::INFO);
    }

    struct Capture(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut line = EventLine::default();
            event.record(&mut line);
            let meta = event.metadata();
            self.0.lock().unwrap().push(line.render(meta.level(), meta.target()));
        }
    }

    #[test]
    fn event_line_keeps_message_and_fields() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Capture(lines.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "api", status = 502, url = "http://x/api", "API request failed");
        });

        assert_eq!(
            *lines.lock().unwrap(),
            vec!["ERROR api: API request failed status=502 url=http://x/api".to_string()]
        );
    }

    #[test]
    fn init_is_idempotent() {
        init_with_level("debug");
        assert!(!init_with_level("debug"));
    }
}
