//! Session manager
//!
//! Owns the single login of a batch. The handle it produces is shared
//! read-only by every pipeline until the batch ends.

use crate::core::runner::{CheckoutRunner, RunnerError, RunnerResult};
use crate::core::types::{Credentials, SessionHandle};
use crate::utils::Sanitization;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

pub struct SessionManager {
    runner: Arc<dyn CheckoutRunner>,
    attempted: AtomicBool,
    session: Mutex<Option<Arc<SessionHandle>>>,
}

impl SessionManager {
    pub fn new(runner: Arc<dyn CheckoutRunner>) -> Self {
        Self {
            runner,
            attempted: AtomicBool::new(false),
            session: Mutex::new(None),
        }
    }

    /// Authenticate once. Any later call fails without reaching the platform.
    pub async fn login(&self, credentials: &Credentials) -> RunnerResult<Arc<SessionHandle>> {
        if self.attempted.swap(true, Ordering::SeqCst) {
            return Err(RunnerError::invalid_state(
                "login",
                "a session was already requested for this batch",
            ));
        }

        let user = Sanitization::mask_identity(&credentials.username);
        debug!(runner = self.runner.name(), user = %user, "logging in");

        if let Err(e) = self.runner.login(credentials).await {
            warn!(user = %user, error = %e, "login failed");
            return Err(e);
        }

        let token = self.runner.session_token().ok_or_else(|| {
            RunnerError::session("login", "no session confirmation number after login")
        })?;

        let handle = Arc::new(SessionHandle::new(token, credentials.username.clone()));
        *self.session.lock() = Some(handle.clone());

        info!(user = %user, "session established");
        Ok(handle)
    }

    /// Handle of the established session, if any
    pub fn session(&self) -> Option<Arc<SessionHandle>> {
        self.session.lock().clone()
    }
}
