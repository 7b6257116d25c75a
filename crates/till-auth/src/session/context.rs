//! The process-wide session context.
//!
//! Built once by the composition root and shared by `Arc`. It is the only
//! writer of the access state; views subscribe and read.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use till_core::config::AccessConfig;
use till_core::error::AppError;
use till_core::traits::{IdentityProvider, RoleStore};
use till_entity::session::{AccessState, DemoSession, Session};

use crate::rbac::PermissionEvaluator;

use super::resolver::RoleResolver;
use super::snapshot::AccessSnapshot;

/// A resolution pass shared by every concurrent caller.
/// Yields `None` when its result was discarded by a sign-out.
type Pass = Shared<BoxFuture<'static, Option<Session>>>;

#[derive(Debug)]
enum Mode {
    Live(Arc<RoleResolver>),
    Demo(DemoSession),
}

/// Owns the access state of one running client.
pub struct SessionContext {
    mode: Mode,
    evaluator: PermissionEvaluator,
    state: Arc<watch::Sender<AccessState>>,
    /// In-flight pass, tagged with its id.
    inflight: Mutex<Option<(u64, Pass)>>,
    next_pass: AtomicU64,
    /// Bumped by [`Self::clear`] and [`Self::restart`]; passes started under an older epoch are
    /// not published.
    epoch: Arc<AtomicU64>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("mode", &self.mode)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl SessionContext {
    /// A live context that resolves roles through `resolver`.
    ///
    /// Starts in [`AccessState::Resolving`] until the first pass completes.
    pub fn live(resolver: RoleResolver, evaluator: PermissionEvaluator) -> Self {
        Self::with_mode(Mode::Live(Arc::new(resolver)), evaluator, AccessState::Resolving)
    }

    /// A demo context: permanently `Ready(Demo)`, never touches the backend.
    pub fn demo(demo: DemoSession, evaluator: PermissionEvaluator) -> Self {
        warn!(
            label = demo.label(),
            "Demo mode active: every visibility gate renders its content"
        );
        let state = AccessState::Ready(Session::Demo(demo.clone()));
        Self::with_mode(Mode::Demo(demo), evaluator, state)
    }

    /// Build the context the configuration asks for.
    pub fn from_config(
        config: &AccessConfig,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn RoleStore>,
        evaluator: PermissionEvaluator,
    ) -> Result<Self, AppError> {
        match DemoSession::from_config(config) {
            Some(demo) => Ok(Self::demo(demo, evaluator)),
            None => {
                let resolver = RoleResolver::new(identity, store, config)?;
                Ok(Self::live(resolver, evaluator))
            }
        }
    }

    fn with_mode(mode: Mode, evaluator: PermissionEvaluator, initial: AccessState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            mode,
            evaluator,
            state: Arc::new(state),
            inflight: Mutex::new(None),
            next_pass: AtomicU64::new(0),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The evaluator used to derive permission sets.
    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Whether this context is the demo bypass.
    pub fn is_demo(&self) -> bool {
        matches!(self.mode, Mode::Demo(_))
    }

    /// Current snapshot, read synchronously.
    pub fn snapshot(&self) -> AccessSnapshot {
        AccessSnapshot::new(self.state.borrow().clone(), &self.evaluator)
    }

    /// Subscribe a view to state changes.
    pub fn subscribe(&self) -> AccessView {
        AccessView {
            rx: self.state.subscribe(),
            evaluator: self.evaluator.clone(),
        }
    }

    /// The cached session, resolving first if nothing is known yet.
    pub async fn resolve(&self) -> Session {
        let cached = self.state.borrow().session().cloned();
        match cached {
            Some(session) => session,
            None => self.refresh().await,
        }
    }

    /// Re-fetch the role, joining the in-flight pass if there is one.
    ///
    /// The previous session stays published until the pass completes.
    pub async fn refresh(&self) -> Session {
        self.run_pass(false).await
    }

    /// Re-resolve after the identity changed (login or token restoration).
    ///
    /// Any pass already in flight read the old identity: it is discarded,
    /// never joined. The state goes back to [`AccessState::Resolving`] so the
    /// previous user's grants are not visible while the new pass runs.
    pub async fn restart(&self) -> Session {
        self.run_pass(true).await
    }

    async fn run_pass(&self, restart: bool) -> Session {
        let resolver = match &self.mode {
            Mode::Demo(demo) => return Session::Demo(demo.clone()),
            Mode::Live(resolver) => Arc::clone(resolver),
        };

        let (id, pass) = {
            let mut inflight = self.inflight.lock().await;
            if restart {
                self.state.send_modify(|current| {
                    self.epoch.fetch_add(1, Ordering::SeqCst);
                    *current = AccessState::Resolving;
                });
                if let Some((stale, _)) = inflight.take() {
                    debug!(pass = stale, "Discarding in-flight role resolution");
                }
            }
            match inflight.as_ref() {
                Some((id, pass)) => {
                    debug!(pass = id, "Joining in-flight role resolution");
                    (*id, pass.clone())
                }
                None => {
                    let id = self.next_pass.fetch_add(1, Ordering::SeqCst);
                    let pass = self.start_pass(resolver);
                    *inflight = Some((id, pass.clone()));
                    (id, pass)
                }
            }
        };

        let outcome = pass.await;

        let mut inflight = self.inflight.lock().await;
        if inflight.as_ref().is_some_and(|(current, _)| *current == id) {
            *inflight = None;
        }
        drop(inflight);

        match outcome {
            Some(session) => session,
            None => {
                // Superseded by a sign-out or a newer identity.
                let current = self.state.borrow().session().cloned();
                current.unwrap_or(Session::Anonymous)
            }
        }
    }

    /// Logout: publish the anonymous session and discard any in-flight pass.
    pub async fn clear(&self) {
        if self.is_demo() {
            return;
        }
        // The epoch is bumped under the state lock so a pass cannot publish
        // between the bump and the anonymous write.
        self.state.send_modify(|current| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            *current = AccessState::Ready(Session::Anonymous);
        });
        *self.inflight.lock().await = None;
        info!("Session cleared");
    }

    fn start_pass(&self, resolver: Arc<RoleResolver>) -> Pass {
        let state = Arc::clone(&self.state);
        let epoch = Arc::clone(&self.epoch);
        let started_in = epoch.load(Ordering::SeqCst);

        async move {
            let session = resolver.resolve().await;
            let published = state.send_if_modified(|current| {
                if epoch.load(Ordering::SeqCst) != started_in {
                    return false;
                }
                *current = AccessState::Ready(session.clone());
                true
            });
            if !published {
                debug!("Discarding role resolution superseded by an identity change");
                return None;
            }
            Some(session)
        }
        .boxed()
        .shared()
    }
}

/// A view's subscription to the session context.
///
/// Dropping the view drops its receiver; results published afterwards never
/// reach it.
#[derive(Debug, Clone)]
pub struct AccessView {
    rx: watch::Receiver<AccessState>,
    evaluator: PermissionEvaluator,
}

impl AccessView {
    /// Current snapshot, read synchronously.
    pub fn snapshot(&self) -> AccessSnapshot {
        AccessSnapshot::new(self.rx.borrow().clone(), &self.evaluator)
    }

    /// Wait for the next published state. Returns `false` once the context
    /// is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until resolution is no longer in flight and return that snapshot.
    pub async fn ready(&mut self) -> AccessSnapshot {
        let evaluator = self.evaluator.clone();
        if let Ok(state) = self.rx.wait_for(|state| !state.is_resolving()).await {
            return AccessSnapshot::new(state.clone(), &evaluator);
        }
        self.snapshot()
    }
}
