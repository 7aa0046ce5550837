//! Method boundary logging
//!
//! Wraps a handler invocation with an entry log, an exit log carrying the
//! elapsed time, and a severity-appropriate log of any failure. Failures are
//! returned unchanged.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::time::Instant;

use sid_shared::Language;
use tracing::{error, info, warn};

use crate::errors::{log_keys, ApiError, Severity};
use crate::i18n::MessageSource;

/// One wrapped call: where it happens and what it was given
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    component: &'a str,
    operation: &'a str,
    args: Vec<(&'a str, String)>,
}

impl<'a> Invocation<'a> {
    pub fn new(component: &'a str, operation: &'a str) -> Self {
        Self {
            component,
            operation,
            args: Vec::new(),
        }
    }

    /// Record an argument; values are rendered with `Debug`
    pub fn arg(mut self, name: &'a str, value: &impl fmt::Debug) -> Self {
        self.args.push((name, format!("{:?}", value)));
        self
    }

    pub fn component(&self) -> &str {
        self.component
    }

    pub fn operation(&self) -> &str {
        self.operation
    }

    /// `(name=value, name=value)`, or nothing when there are no arguments
    pub fn rendered_args(&self) -> String {
        if self.args.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .args
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        format!("({})", pairs.join(", "))
    }
}

/// Logs entry, exit and failures of wrapped invocations
#[derive(Clone, Copy)]
pub struct MethodBoundaryLogger<'m> {
    messages: &'m dyn MessageSource,
    language: Language,
}

impl fmt::Debug for MethodBoundaryLogger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBoundaryLogger")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl<'m> MethodBoundaryLogger<'m> {
    /// Operational logs are rendered in the default language
    pub fn new(messages: &'m dyn MessageSource) -> Self {
        Self {
            messages,
            language: Language::default(),
        }
    }

    /// Render operational logs in `language` instead of the default
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Run `call` inside the boundary
    pub fn invoke<T, E, F>(&self, invocation: &Invocation<'_>, call: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: StdError + 'static,
    {
        let _exit = self.enter(invocation);
        let result = call();
        if let Err(err) = &result {
            self.log_failure(invocation, err);
        }
        result
    }

    /// Await `call` inside the boundary
    ///
    /// The exit log is also written when the returned future is dropped
    /// before completion.
    pub async fn invoke_async<T, E, Fut>(&self, invocation: &Invocation<'_>, call: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: StdError + 'static,
    {
        let _exit = self.enter(invocation);
        let result = call.await;
        if let Err(err) = &result {
            self.log_failure(invocation, err);
        }
        result
    }

    fn enter<'g>(&'g self, invocation: &'g Invocation<'g>) -> ExitGuard<'g> {
        let message = self.messages.message(
            log_keys::START,
            &[
                invocation.component.to_string(),
                invocation.operation.to_string(),
                invocation.rendered_args(),
            ],
            self.language,
        );
        info!(
            component = invocation.component,
            operation = invocation.operation,
            "{}",
            message
        );

        ExitGuard {
            logger: self,
            invocation,
            started: Instant::now(),
        }
    }

    fn log_failure<E>(&self, invocation: &Invocation<'_>, err: &E)
    where
        E: StdError + 'static,
    {
        let dyn_err: &(dyn StdError + 'static) = err;
        let api_error = dyn_err.downcast_ref::<ApiError>();

        let (severity, key, params) = match api_error {
            Some(api_error) => match (api_error.severity(), api_error.log_message_key()) {
                (Some(Severity::UserFault), _) => return,
                (Some(severity), Some(key)) => (severity, key, api_error.embedded_params()),
                _ => (Severity::Error, log_keys::ERROR, vec![err.to_string()]),
            },
            None => (Severity::Error, log_keys::ERROR, vec![err.to_string()]),
        };

        let message = self.messages.message(key, &params, self.language);
        let component = invocation.component;
        let operation = invocation.operation;

        match severity {
            Severity::Error => error!(
                component,
                operation,
                cause = %cause_chain(dyn_err),
                "{}",
                message
            ),
            Severity::Warn => warn!(
                component,
                operation,
                cause = %cause_chain(dyn_err),
                "{}",
                message
            ),
            Severity::Info => info!(component, operation, "{}", message),
            Severity::UserFault => {}
        }
    }
}

/// `err: source: source ...`
fn cause_chain(err: &(dyn StdError + 'static)) -> String {
    let mut chain = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        current = cause.source();
    }
    chain
}

/// Writes the exit log when dropped, whichever way the call ended
struct ExitGuard<'g> {
    logger: &'g MethodBoundaryLogger<'g>,
    invocation: &'g Invocation<'g>,
    started: Instant,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_millis();
        let message = self.logger.messages.message(
            log_keys::END,
            &[
                self.invocation.component.to_string(),
                self.invocation.operation.to_string(),
                elapsed_ms.to_string(),
            ],
            self.logger.language,
        );
        info!(
            component = self.invocation.component,
            operation = self.invocation.operation,
            elapsed_ms = elapsed_ms as u64,
            "{}",
            message
        );
    }
}
