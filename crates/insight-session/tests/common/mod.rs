//! Port doubles shared by the session integration tests

#![allow(dead_code)]

use insight_session::{AlertSink, SessionChange, SessionObserver, SessionState};
use parking_lot::Mutex;

/// Observer recording every change with a snapshot taken at the time
#[derive(Debug, Default)]
pub struct RecordingObserver {
    log: Mutex<Vec<(SessionChange, SessionState)>>,
}

impl RecordingObserver {
    pub fn changes(&self) -> Vec<SessionChange> {
        self.log.lock().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn snapshots(&self) -> Vec<(SessionChange, SessionState)> {
        self.log.lock().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn on_change(&self, change: &SessionChange, state: &SessionState) {
        self.log.lock().push((change.clone(), state.clone()));
    }
}

/// Alert sink collecting messages
#[derive(Debug, Default)]
pub struct CollectingAlerts {
    messages: Mutex<Vec<String>>,
}

impl CollectingAlerts {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl AlertSink for CollectingAlerts {
    fn alert(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
