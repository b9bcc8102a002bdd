//! A scripted stand-in for the device location service.
//!
//! The terminal has no positioning hardware, so the platform is simulated: the
//! permission dialog is answered from the UI, "Settings" flips the status
//! without telling anyone (the tracker notices on its next poll), and fixes
//! are replayed from a fixed route at a fixed interval.

use crate::domain::{AuthorizationStatus, LocationError, LocationEvent, LocationService, Position};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

/// Near the downtown Los Angeles sample shops.
pub const DEFAULT_FIX: Position = Position::new(34.0525, -118.2440);

pub const DEFAULT_FIX_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub initial_status: AuthorizationStatus,
    /// Positions replayed in order, wrapping around at the end.
    pub route: Vec<Position>,
    pub fix_interval: Duration,
    /// Number of fixes that fail before the first success.
    pub failed_fixes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_status: AuthorizationStatus::Undetermined,
            route: vec![DEFAULT_FIX],
            fix_interval: DEFAULT_FIX_INTERVAL,
            failed_fixes: 0,
        }
    }
}

#[derive(Debug)]
pub struct SimulatedLocationService {
    status: AuthorizationStatus,
    prompt_pending: bool,
    updating: bool,
    route: Vec<Position>,
    next_fix: usize,
    failures_remaining: u32,
    fix_interval: Duration,
    last_fix_at: Option<Instant>,
    events: VecDeque<LocationEvent>,
}

impl Default for SimulatedLocationService {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl SimulatedLocationService {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            status: config.initial_status,
            prompt_pending: false,
            updating: false,
            route: config.route,
            next_fix: 0,
            failures_remaining: config.failed_fixes,
            fix_interval: config.fix_interval,
            last_fix_at: None,
            events: VecDeque::new(),
        }
    }

    /// Whether the permission dialog is on screen.
    pub fn is_prompting(&self) -> bool {
        self.prompt_pending
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// The user's answer to the permission dialog.
    pub fn answer_prompt(&mut self, allow: bool) {
        if !self.prompt_pending {
            return;
        }
        self.prompt_pending = false;
        self.status = if allow {
            AuthorizationStatus::Granted
        } else {
            AuthorizationStatus::Denied
        };
        debug!(status = %self.status, "Permission dialog answered");
        self.events
            .push_back(LocationEvent::AuthorizationChanged(self.status));
    }

    /// Toggles access from the system settings. No event is delivered.
    pub fn open_settings(&mut self) -> AuthorizationStatus {
        self.prompt_pending = false;
        self.status = if self.status.is_granted() {
            AuthorizationStatus::Denied
        } else {
            AuthorizationStatus::Granted
        };
        debug!(status = %self.status, "Location access changed in settings");
        self.status
    }

    /// Queues an arbitrary platform notification.
    pub fn deliver(&mut self, event: LocationEvent) {
        self.events.push_back(event);
    }

    /// Emits the next fix if updates are running and the interval has passed.
    pub fn tick(&mut self, now: Instant) {
        if !self.updating || !self.status.is_granted() {
            return;
        }
        let due = self
            .last_fix_at
            .is_none_or(|last| now.duration_since(last) >= self.fix_interval);
        if due {
            self.emit_fix(now);
        }
    }

    fn emit_fix(&mut self, now: Instant) {
        if self.failures_remaining > 0 {
            self.failures_remaining -= 1;
            self.last_fix_at = Some(now);
            self.events
                .push_back(LocationEvent::Failed(LocationError::LocationUnknown));
            return;
        }
        if self.route.is_empty() {
            return;
        }
        let fix = self.route[self.next_fix % self.route.len()];
        self.next_fix += 1;
        self.last_fix_at = Some(now);
        self.events.push_back(LocationEvent::LocationsUpdated(vec![fix]));
    }
}

impl LocationService for SimulatedLocationService {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn request_when_in_use_authorization(&mut self) {
        if self.status == AuthorizationStatus::Undetermined {
            self.prompt_pending = true;
        }
    }

    fn start_updating_location(&mut self) {
        if !self.updating {
            self.updating = true;
            self.last_fix_at = None;
        }
    }

    fn stop_updating_location(&mut self) {
        self.updating = false;
    }

    fn poll_event(&mut self) -> Option<LocationEvent> {
        self.events.pop_front()
    }
}
