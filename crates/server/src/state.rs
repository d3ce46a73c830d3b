use std::sync::Arc;

use service::auth::repository::AuthRepository;
use service::auth::AuthService;
use service::probe::ProbeGate;
use service::tracker::repository::TrackerRepository;

/// Shared request state. Everything is an explicit, injected handle rather
/// than a process-wide singleton, so tests can swap any collaborator.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    /// The auth gate re-resolves the token subject against this store on
    /// every request; the token payload alone is never trusted.
    pub users: Arc<dyn AuthRepository>,
    pub trackers: Arc<dyn TrackerRepository>,
    pub probe: Arc<ProbeGate>,
}
