//! Recording test doubles for the provider, terminal and sleeper seams

use crate::error::{CloudError, Result};
use crate::provider::{StackProvider, StatusResponse};
use crate::terminal::{Sleeper, Terminal};
use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Provider returning scripted responses and recording every call
#[derive(Default)]
pub struct MockProvider {
    calls: Mutex<Vec<String>>,
    statuses: Mutex<VecDeque<Result<StatusResponse>>>,
    default_status: Mutex<Option<StatusResponse>>,
    start_error: Mutex<Option<CloudError>>,
    remove_error: Mutex<Option<CloudError>>,
    outputs: Mutex<BTreeMap<String, String>>,
}

impl MockProvider {
    /// Queue the answer to the next status query
    pub fn push_status(&self, response: Result<StatusResponse>) {
        self.statuses.lock().unwrap().push_back(response);
    }

    /// Answer used once the queue is empty
    pub fn set_default_status(&self, response: StatusResponse) {
        *self.default_status.lock().unwrap() = Some(response);
    }

    pub fn fail_start(&self, error: CloudError) {
        *self.start_error.lock().unwrap() = Some(error);
    }

    pub fn fail_remove(&self, error: CloudError) {
        *self.remove_error.lock().unwrap() = Some(error);
    }

    pub fn set_output(&self, name: &str, value: &str) {
        self.outputs
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.count("query_status")
    }

    pub fn output_calls(&self) -> usize {
        self.count("fetch_outputs")
    }

    fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(operation))
            .count()
    }

    fn record(&self, operation: &str, stack: &str, region: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {} {}", operation, stack, region));
    }
}

#[async_trait]
impl StackProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start_stack_change(&self, stack: &str, region: &str, _template: &str) -> Result<()> {
        self.record("start_stack_change", stack, region);
        match self.start_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn remove_stack(&self, stack: &str, region: &str) -> Result<()> {
        self.record("remove_stack", stack, region);
        match self.remove_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn query_status(&self, stack: &str, region: &str) -> Result<StatusResponse> {
        self.record("query_status", stack, region);
        if let Some(next) = self.statuses.lock().unwrap().pop_front() {
            return next;
        }
        self.default_status
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CloudError::Other(anyhow::anyhow!("no scripted status left")))
    }

    async fn fetch_outputs(
        &self,
        stack: &str,
        region: &str,
        names: &[String],
    ) -> Result<BTreeMap<String, String>> {
        self.record("fetch_outputs", stack, region);
        let outputs = self.outputs.lock().unwrap();
        names
            .iter()
            .map(|name| {
                outputs
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
                    .ok_or_else(|| CloudError::OutputNotFound(name.clone()))
            })
            .collect()
    }
}

/// One call made on a [`RecordingTerminal`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Clear,
    Line(String),
    SpinnerStart(String),
    SpinnerStop,
    Success(String),
}

#[derive(Default)]
pub struct RecordingTerminal {
    events: Mutex<Vec<TerminalEvent>>,
}

impl RecordingTerminal {
    pub fn events(&self) -> Vec<TerminalEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: TerminalEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Terminal for RecordingTerminal {
    fn clear(&self) {
        self.push(TerminalEvent::Clear);
    }

    fn write_line(&self, text: &str) {
        self.push(TerminalEvent::Line(text.to_string()));
    }

    fn start_spinner(&self, label: &str) {
        self.push(TerminalEvent::SpinnerStart(label.to_string()));
    }

    fn stop_spinner(&self) {
        self.push(TerminalEvent::SpinnerStop);
    }

    fn write_success(&self, label: &str) {
        self.push(TerminalEvent::Success(label.to_string()));
    }
}

/// Sleeper that returns immediately and remembers the requested delays
#[derive(Default)]
pub struct InstantSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
