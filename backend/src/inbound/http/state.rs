//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLedger, FixtureRedemption, FixtureSessionLifecycle, LedgerCommand, LedgerQuery,
    RedemptionCommand, RedemptionQuery, SessionLifecycleCommand, SessionLifecycleQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub session_lifecycle: Arc<dyn SessionLifecycleCommand>,
    pub session_lookup: Arc<dyn SessionLifecycleQuery>,
    pub redemption: Arc<dyn RedemptionCommand>,
    pub redemption_status: Arc<dyn RedemptionQuery>,
    pub ledger: Arc<dyn LedgerQuery>,
    pub ledger_admin: Arc<dyn LedgerCommand>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            session_lifecycle: Arc::new(FixtureSessionLifecycle),
            session_lookup: Arc::new(FixtureSessionLifecycle),
            redemption: Arc::new(FixtureRedemption),
            redemption_status: Arc::new(FixtureRedemption),
            ledger: Arc::new(FixtureLedger),
            ledger_admin: Arc::new(FixtureLedger),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub session_lifecycle: Arc<dyn SessionLifecycleCommand>,
    pub session_lookup: Arc<dyn SessionLifecycleQuery>,
    pub redemption: Arc<dyn RedemptionCommand>,
    pub redemption_status: Arc<dyn RedemptionQuery>,
    pub ledger: Arc<dyn LedgerQuery>,
    pub ledger_admin: Arc<dyn LedgerCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            session_lifecycle,
            session_lookup,
            redemption,
            redemption_status,
            ledger,
            ledger_admin,
        } = ports;
        Self {
            session_lifecycle,
            session_lookup,
            redemption,
            redemption_status,
            ledger,
            ledger_admin,
        }
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::default());
    /// let _redemption = state.redemption.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        ports.into()
    }
}
