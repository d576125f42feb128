use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;

use crate::logic::{
    editor::EditorSession,
    gesture::{PointerId, TimerCommand},
};

/// Runs long-press timers as tokio tasks, one per pointer.
///
/// A scheduled task sleeps for the threshold and then reports back to the
/// session with its token; cancelling aborts the task. Tokens keep a firing
/// that races a cancel harmless.
#[derive(Clone)]
pub struct LongPressTimers {
    threshold: Duration,
    session: Arc<Mutex<EditorSession>>,
    handles: Arc<Mutex<HashMap<PointerId, JoinHandle<()>>>>,
}

impl LongPressTimers {
    pub fn new(session: Arc<Mutex<EditorSession>>, threshold: Duration) -> Self {
        Self {
            threshold,
            session,
            handles: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Number of timers still waiting to fire.
    pub fn pending(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn run(&self, commands: impl IntoIterator<Item = TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::Schedule { pointer, token } => self.schedule(pointer, token),
                TimerCommand::Cancel { pointer } => self.cancel(pointer),
            }
        }
    }

    fn schedule(&self, pointer: PointerId, token: u64) {
        let session = Arc::clone(&self.session);
        let threshold = self.threshold;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(threshold).await;
            let outcome = session
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .long_press_elapsed(pointer, token);
            if let Some(notice) = outcome.notice {
                info!("pointer {pointer}: {}", notice.title);
            }
        });
        let previous = self
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pointer, handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        debug!("long-press timer scheduled for pointer {pointer} (token {token})");
    }

    fn cancel(&self, pointer: PointerId) {
        let handle = self
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&pointer);
        if let Some(handle) = handle {
            handle.abort();
            debug!("long-press timer cancelled for pointer {pointer}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::gesture::Modifiers;
    use crate::models::{Coordinate, Dimensions};
    use crate::storage::MemoryStore;

    fn shared_session() -> Arc<Mutex<EditorSession>> {
        Arc::new(Mutex::new(EditorSession::load(
            Box::new(MemoryStore::new()),
            Dimensions::new(8, 8),
        )))
    }

    #[tokio::test]
    async fn scheduled_timer_fires_long_press() {
        let session = shared_session();
        let timers = LongPressTimers::new(Arc::clone(&session), Duration::from_millis(20));

        let outcome = session
            .lock()
            .unwrap()
            .pointer_down(1, Coordinate::new(2, 2), Modifiers::default())
            .unwrap();
        timers.run(outcome.timers);
        assert_eq!(timers.pending(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let mut editor = session.lock().unwrap();
        assert!(editor.gestures().multi_select());
        assert_eq!(editor.gestures().selection().to_vec(), vec![Coordinate::new(2, 2)]);
        assert_eq!(
            editor.take_pending_notice().map(|n| n.title).as_deref(),
            Some("Multiple selection mode")
        );
    }

    #[tokio::test]
    async fn cancelled_timer_never_fires() {
        let session = shared_session();
        let timers = LongPressTimers::new(Arc::clone(&session), Duration::from_millis(20));

        let down = session
            .lock()
            .unwrap()
            .pointer_down(1, Coordinate::new(0, 0), Modifiers::default())
            .unwrap();
        timers.run(down.timers);
        let leave = session.lock().unwrap().pointer_leave(1).unwrap();
        timers.run(leave.timers);
        assert_eq!(timers.pending(), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let mut editor = session.lock().unwrap();
        assert!(!editor.gestures().multi_select());
        assert!(editor.gestures().selection().is_empty());
        assert!(editor.take_pending_notice().is_none());
    }
}
