use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::api::timers::LongPressTimers;
use crate::logic::editor::EditorSession;

/// Shared by every handler: the one editing session and its timers.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<EditorSession>>,
    pub timers: LongPressTimers,
}

impl AppState {
    pub fn new(session: EditorSession, long_press: Duration) -> Self {
        let session = Arc::new(Mutex::new(session));
        let timers = LongPressTimers::new(Arc::clone(&session), long_press);
        Self { session, timers }
    }

    /// Locks the session. Events are applied synchronously, so a poisoned
    /// lock still holds a consistent document.
    pub fn session(&self) -> MutexGuard<'_, EditorSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
