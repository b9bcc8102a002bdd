//! Location authorization state machine.
//!
//! [`LocationTracker`] wraps a platform [`LocationService`] and keeps the
//! current authorization status plus the last known position. Platform
//! callbacks arrive as [`LocationEvent`]s drained with [`LocationTracker::pump`],
//! one at a time on the caller's thread, and every resulting change is
//! forwarded synchronously to subscribers.

use super::errors::{LocationError, ParseError};
use super::models::Position;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Whether the user has allowed this app to read the device location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorizationStatus {
    #[default]
    Undetermined,
    Granted,
    Denied,
    Restricted,
}

impl AuthorizationStatus {
    pub fn is_granted(self) -> bool {
        self == AuthorizationStatus::Granted
    }

    /// Denied by the user or restricted by policy.
    pub fn is_blocked(self) -> bool {
        matches!(self, AuthorizationStatus::Denied | AuthorizationStatus::Restricted)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthorizationStatus::Undetermined => "undetermined",
            AuthorizationStatus::Granted => "granted",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Restricted => "restricted",
        };
        f.write_str(name)
    }
}

impl FromStr for AuthorizationStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undetermined" => Ok(AuthorizationStatus::Undetermined),
            "granted" => Ok(AuthorizationStatus::Granted),
            "denied" => Ok(AuthorizationStatus::Denied),
            "restricted" => Ok(AuthorizationStatus::Restricted),
            _ => Err(ParseError::UnknownStatus(s.to_string())),
        }
    }
}

/// A notification delivered by the platform location service.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    AuthorizationChanged(AuthorizationStatus),
    /// One or more fixes delivered together.
    LocationsUpdated(Vec<Position>),
    Failed(LocationError),
}

/// The platform's permission and positioning primitives.
pub trait LocationService {
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Shows the platform permission dialog. The answer arrives later as an
    /// [`LocationEvent::AuthorizationChanged`].
    fn request_when_in_use_authorization(&mut self);

    fn start_updating_location(&mut self);

    fn stop_updating_location(&mut self);

    /// Next pending notification, if any.
    fn poll_event(&mut self) -> Option<LocationEvent>;
}

impl<S: LocationService + ?Sized> LocationService for Box<S> {
    fn authorization_status(&self) -> AuthorizationStatus {
        (**self).authorization_status()
    }

    fn request_when_in_use_authorization(&mut self) {
        (**self).request_when_in_use_authorization();
    }

    fn start_updating_location(&mut self) {
        (**self).start_updating_location();
    }

    fn stop_updating_location(&mut self) {
        (**self).stop_updating_location();
    }

    fn poll_event(&mut self) -> Option<LocationEvent> {
        (**self).poll_event()
    }
}

/// What subscribers are told after the tracker processed a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationChange {
    StatusChanged(AuthorizationStatus),
    PositionChanged(Option<Position>),
    FixFailed(LocationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&LocationChange)>;

/// Tracks authorization status and the last known position.
///
/// # Examples
///
/// ```
/// use coffeefinder::domain::{AuthorizationStatus, LocationTracker};
/// use coffeefinder::infrastructure::SimulatedLocationService;
///
/// let tracker = LocationTracker::new(SimulatedLocationService::default());
/// assert_eq!(tracker.current_status(), AuthorizationStatus::Undetermined);
/// assert!(tracker.current_position().is_none());
/// ```
pub struct LocationTracker<S: LocationService> {
    service: S,
    status: AuthorizationStatus,
    position: Option<Position>,
    last_error: Option<LocationError>,
    updating: bool,
    permission_requested: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: LocationService> fmt::Debug for LocationTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationTracker")
            .field("status", &self.status)
            .field("position", &self.position)
            .field("last_error", &self.last_error)
            .field("updating", &self.updating)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<S: LocationService> LocationTracker<S> {
    pub fn new(service: S) -> Self {
        let status = service.authorization_status();
        Self {
            service,
            status,
            position: None,
            last_error: None,
            updating: false,
            permission_requested: false,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn current_status(&self) -> AuthorizationStatus {
        self.status
    }

    pub fn current_position(&self) -> Option<Position> {
        self.position
    }

    /// The most recent fix failure, cleared by the next successful fix.
    pub fn last_error(&self) -> Option<&LocationError> {
        self.last_error.as_ref()
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Registers a callback invoked after every status or position change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&LocationChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Asks for permission when undetermined, or starts updates when already granted.
    pub fn activate(&mut self) {
        match self.status {
            AuthorizationStatus::Undetermined => self.request_permission(),
            AuthorizationStatus::Granted => self.start_updates(),
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                debug!(status = %self.status, "Location access blocked, waiting for settings change");
            }
        }
    }

    /// Triggers the platform permission dialog.
    ///
    /// Only meaningful while undetermined. Repeated calls while a request is
    /// outstanding do nothing.
    pub fn request_permission(&mut self) {
        if self.status != AuthorizationStatus::Undetermined {
            debug!(status = %self.status, "Ignoring permission request");
            return;
        }
        if self.permission_requested {
            return;
        }
        self.permission_requested = true;
        info!("Requesting location permission");
        self.service.request_when_in_use_authorization();
    }

    /// Re-reads the platform status, picking up changes made outside the app.
    pub fn refresh_status(&mut self) {
        let status = self.service.authorization_status();
        if status != self.status || (status.is_granted() && !self.updating) {
            self.apply_status(status);
        }
    }

    /// Drains and handles every pending platform notification in delivery order.
    ///
    /// Returns how many notifications were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.service.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::AuthorizationChanged(status) => self.apply_status(status),
            LocationEvent::LocationsUpdated(fixes) => self.apply_fixes(&fixes),
            LocationEvent::Failed(error) => {
                warn!(error = %error, "Location manager failed");
                self.last_error = Some(error.clone());
                self.notify(LocationChange::FixFailed(error));
            }
        }
    }

    fn apply_status(&mut self, status: AuthorizationStatus) {
        let previous = self.status;
        self.status = status;
        if status != AuthorizationStatus::Undetermined {
            self.permission_requested = false;
        }

        let mut cleared = false;
        match status {
            AuthorizationStatus::Granted => self.start_updates(),
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                info!(status = %status, "Location permission denied or restricted");
                self.stop_updates();
                cleared = self.position.take().is_some();
            }
            AuthorizationStatus::Undetermined => {}
        }

        if previous != status {
            info!(from = %previous, to = %status, "Authorization status changed");
            self.notify(LocationChange::StatusChanged(status));
        }
        if cleared {
            self.notify(LocationChange::PositionChanged(None));
        }
    }

    fn apply_fixes(&mut self, fixes: &[Position]) {
        if !self.status.is_granted() {
            debug!(count = fixes.len(), status = %self.status, "Dropping fixes received without permission");
            return;
        }
        // The first fix of a batch is taken as the newest one.
        let Some(&latest) = fixes.first() else {
            return;
        };
        debug!(latitude = latest.latitude, longitude = latest.longitude, "Position updated");
        self.position = Some(latest);
        self.last_error = None;
        self.notify(LocationChange::PositionChanged(Some(latest)));
    }

    fn start_updates(&mut self) {
        self.service.start_updating_location();
        self.updating = true;
    }

    fn stop_updates(&mut self) {
        if self.updating {
            self.service.stop_updating_location();
            self.updating = false;
        }
    }

    fn notify(&mut self, change: LocationChange) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&change);
        }
    }
}
