//! Test doubles: a tracing layer that records events and a fixed message source

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use sid_shared::Language;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use crate::i18n::{format_message, MessageSource};

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Clone, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct FieldVisitor<'a> {
    message: &'a mut String,
    fields: &'a mut HashMap<String, String>,
}

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            *self.message = rendered;
        } else {
            self.fields.insert(field.name().to_string(), rendered);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = value.to_string();
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor {
            message: &mut message,
            fields: &mut fields,
        });
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

/// Subscriber recording every event into the returned layer
pub fn capture() -> (impl Subscriber + Send + Sync, CaptureLayer) {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    (subscriber, layer)
}

/// English-only templates for the log keys the boundary uses
pub struct FixedMessages;

impl MessageSource for FixedMessages {
    fn message(&self, key: &str, params: &[String], _language: Language) -> String {
        let template = match key {
            "API_LOG_INFO0002" => "start {0}.{1}{2}",
            "API_LOG_INFO0003" => "end {0}.{1} {2}ms",
            "API_LOG_INFO0004" => "out of data range",
            "API_LOG_ERROR0001" => "unexpected failure: {0}",
            "API_LOG_ERROR0002" => "internal api {0} failed",
            "API_LOG_WARN0004" => "access history not updated: {0}",
            other => other,
        };
        format_message(template, params)
    }
}
