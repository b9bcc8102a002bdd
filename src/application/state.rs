//! Application state management for the coffee finder.
//!
//! This module contains the main application state, the screen and mode
//! selection, and the reactions to location changes.

use super::camera::MapCamera;
use crate::domain::{
    AppearanceMode, AuthorizationStatus, Brand, DistanceOption, FilterCriteria, LocationChange,
    LocationService, LocationTracker, Position, Shop, ShopDirectory,
};
use crate::infrastructure::{
    Clipboard, PreferenceStore, SimulatedLocationService, SystemClipboard, directions_url,
};
use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Represents the current mode of the application.
///
/// Determines how key presses are interpreted and which overlays are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the list and map
    Normal,
    /// Detail sheet for one shop is open
    Detail,
    /// Help screen is displayed
    Help,
}

/// The four mutually exclusive main screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Permission has never been asked for
    PermissionPrompt,
    /// Denied or restricted; the user has to go to settings
    PermissionDenied,
    /// Granted, waiting for the first fix
    AcquiringLocation,
    /// Granted with a known position
    ShopList,
}

/// Main application state.
///
/// Owns the shop directory, the location tracker and all UI state. It is
/// handed by reference to the renderer and the input handler.
///
/// # Examples
///
/// ```
/// use coffeefinder::application::{App, Screen};
///
/// let app = App::default();
/// assert_eq!(app.screen(), Screen::PermissionPrompt);
/// assert_eq!(app.selected_brands.len(), 3);
/// ```
#[derive(Debug)]
pub struct App<S: LocationService = SimulatedLocationService> {
    /// All known shops
    pub directory: ShopDirectory,
    /// Permission state and last known position
    pub location: LocationTracker<S>,
    /// Brands currently shown
    pub selected_brands: BTreeSet<Brand>,
    /// Index into [`DistanceOption::ALL`]
    pub distance_index: usize,
    /// Light/dark preference
    pub appearance: AppearanceMode,
    /// Framing of the main map
    pub camera: MapCamera,
    /// Highlighted row of the shop list
    pub selected_index: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Shop shown in the detail sheet
    pub detail_shop: Option<Uuid>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    preferences: Option<PreferenceStore>,
    clipboard: Box<dyn Clipboard>,
    inbox: Rc<RefCell<VecDeque<LocationChange>>>,
    shown_shops: Vec<Uuid>,
    /// Status text put up by the last fix failure, if still unanswered
    fix_failure_notice: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(SimulatedLocationService::default(), None)
    }
}

impl<S: LocationService> App<S> {
    /// Builds the app around a location service.
    ///
    /// The appearance mode is read from `preferences` when given; an
    /// unreadable file falls back to [`AppearanceMode::System`] and leaves a
    /// status message. Directions go to the desktop clipboard unless another
    /// one is set with [`App::with_clipboard`].
    ///
    /// # Arguments
    ///
    /// * `service` - The platform location service to track
    /// * `preferences` - Where the appearance mode is persisted, if anywhere
    ///
    /// # Returns
    ///
    /// An app in [`AppMode::Normal`] with every brand selected and the
    /// default distance. Nothing is asked of the platform until [`App::start`].
    pub fn new(service: S, preferences: Option<PreferenceStore>) -> Self {
        let mut status_message = None;
        let appearance = match preferences.as_ref().map(PreferenceStore::load_appearance) {
            Some(Ok(mode)) => mode,
            Some(Err(e)) => {
                warn!(error = %e, "Failed to read preferences");
                status_message = Some(format!("Could not read preferences: {}", e));
                AppearanceMode::default()
            }
            None => AppearanceMode::default(),
        };

        let mut location = LocationTracker::new(service);
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&inbox);
        location.subscribe(move |change: &LocationChange| sink.borrow_mut().push_back(change.clone()));

        let directory = ShopDirectory::default();
        let camera = MapCamera::initial(location.current_position(), directory.shops());

        Self {
            directory,
            location,
            selected_brands: Brand::ALL.into_iter().collect(),
            distance_index: DistanceOption::DEFAULT_INDEX,
            appearance,
            camera,
            selected_index: 0,
            mode: AppMode::Normal,
            detail_shop: None,
            help_scroll: 0,
            status_message,
            preferences,
            clipboard: Box::new(SystemClipboard),
            inbox,
            shown_shops: Vec::new(),
            fix_failure_notice: None,
        }
    }

    /// Replaces the clipboard that directions are copied to.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Asks for permission or starts updates, depending on the current status.
    pub fn start(&mut self) {
        self.location.activate();
        self.sync();
    }

    /// The main screen to show, derived from the authorization status and
    /// whether a position is known.
    ///
    /// # Returns
    ///
    /// * [`Screen::PermissionPrompt`] while undetermined
    /// * [`Screen::PermissionDenied`] when denied or restricted
    /// * [`Screen::AcquiringLocation`] when granted without a fix
    /// * [`Screen::ShopList`] when granted with a fix
    pub fn screen(&self) -> Screen {
        match self.location.current_status() {
            AuthorizationStatus::Undetermined => Screen::PermissionPrompt,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                Screen::PermissionDenied
            }
            AuthorizationStatus::Granted => match self.location.current_position() {
                Some(_) => Screen::ShopList,
                None => Screen::AcquiringLocation,
            },
        }
    }

    /// Last known position of the user.
    pub fn position(&self) -> Option<Position> {
        self.location.current_position()
    }

    /// The selected maximum distance.
    pub fn distance(&self) -> DistanceOption {
        DistanceOption::ALL[self.distance_index.min(DistanceOption::ALL.len() - 1)]
    }

    /// Filter built from the selected brands and distance.
    ///
    /// An empty brand selection is passed through as is and matches every
    /// brand.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            brands: self.selected_brands.clone(),
            max_distance_meters: Some(self.distance().meters),
        }
    }

    /// Shops matching the current filters, nearest first once a position is known.
    pub fn visible_shops(&self) -> Vec<Shop> {
        self.directory.query(&self.criteria(), self.position())
    }

    /// The highlighted row of the shop list, if the list is not empty.
    pub fn selected_shop(&self) -> Option<Shop> {
        self.visible_shops().into_iter().nth(self.selected_index)
    }

    /// The shop shown in the detail sheet.
    pub fn detail_shop(&self) -> Option<&Shop> {
        self.detail_shop.and_then(|id| self.directory.get(id))
    }

    /// Asks the platform for location permission.
    ///
    /// Has no effect unless the status is still undetermined.
    pub fn request_permission(&mut self) {
        self.location.request_permission();
        self.sync();
    }

    /// Adds `brand` to the filter, or removes it when already selected.
    ///
    /// # Arguments
    ///
    /// * `brand` - The brand to toggle
    pub fn toggle_brand(&mut self, brand: Brand) {
        if !self.selected_brands.remove(&brand) {
            self.selected_brands.insert(brand);
        }
        self.refresh_shops();
    }

    /// Widens the distance filter by one step, stopping at the largest.
    pub fn next_distance(&mut self) {
        if self.distance_index + 1 < DistanceOption::ALL.len() {
            self.distance_index += 1;
            self.refresh_shops();
        }
    }

    /// Narrows the distance filter by one step, stopping at the smallest.
    pub fn previous_distance(&mut self) {
        if self.distance_index > 0 {
            self.distance_index -= 1;
            self.refresh_shops();
        }
    }

    /// Moves the highlight one row down, staying on the last row.
    pub fn select_next(&mut self) {
        let count = self.visible_shops().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Moves the highlight one row up, staying on the first row.
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Opens the detail sheet for the highlighted shop.
    ///
    /// Only available from the shop list; does nothing when it is empty.
    pub fn open_detail(&mut self) {
        if self.screen() != Screen::ShopList {
            return;
        }
        if let Some(shop) = self.selected_shop() {
            self.detail_shop = Some(shop.id);
            self.mode = AppMode::Detail;
        }
    }

    /// Closes the detail sheet and returns to the list.
    pub fn close_detail(&mut self) {
        self.detail_shop = None;
        self.mode = AppMode::Normal;
    }

    /// Shows the help screen scrolled to the top.
    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    /// Closes help, returning to the detail sheet if one was open.
    pub fn close_help(&mut self) {
        self.mode = if self.detail_shop.is_some() {
            AppMode::Detail
        } else {
            AppMode::Normal
        };
    }

    /// Switches to the next appearance mode (System, Light, Dark).
    pub fn cycle_appearance(&mut self) {
        self.set_appearance(self.appearance.next());
    }

    /// Changes the appearance mode and writes it to the preferences file.
    ///
    /// Setting the current mode again does nothing.
    ///
    /// # Arguments
    ///
    /// * `mode` - The new appearance mode
    ///
    /// # Errors
    ///
    /// A failed write is logged and reported in the status bar; the new
    /// mode stays in effect for this session.
    pub fn set_appearance(&mut self, mode: AppearanceMode) {
        if mode == self.appearance {
            return;
        }
        self.appearance = mode;

        let Some(store) = self.preferences.as_ref() else {
            self.status_message = Some(format!("Appearance: {}", mode));
            return;
        };
        match store.save_appearance(mode) {
            Ok(()) => self.status_message = Some(format!("Appearance: {}", mode)),
            Err(e) => {
                warn!(error = %e, "Failed to save appearance mode");
                self.status_message = Some(format!("Could not save appearance: {}", e));
            }
        }
    }

    /// Copies driving directions to the detail shop.
    ///
    /// # Returns
    ///
    /// The directions URL, or `None` when no detail sheet is open.
    ///
    /// # Errors
    ///
    /// When the clipboard is unavailable the URL is still shown in the
    /// status bar so it can be copied by hand.
    pub fn get_directions(&mut self) -> Option<String> {
        let url = directions_url(self.detail_shop()?);
        match self.clipboard.set_text(&url) {
            Ok(()) => self.status_message = Some(format!("Directions copied: {}", url)),
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable");
                self.status_message = Some(format!("Directions: {}", url));
            }
        }
        Some(url)
    }

    /// Processes pending platform notifications and reacts to the changes.
    ///
    /// Status changes may close the detail sheet, new positions recenter the
    /// map, and fix failures are shown in the status bar until the next
    /// successful fix.
    pub fn sync(&mut self) {
        self.location.pump();
        self.location.refresh_status();

        let changes: Vec<LocationChange> = self.inbox.borrow_mut().drain(..).collect();
        for change in changes {
            self.apply_change(change);
        }
        self.refresh_shops();
    }

    fn apply_change(&mut self, change: LocationChange) {
        match change {
            LocationChange::StatusChanged(status) => {
                info!(status = %status, "Showing screen for new authorization status");
                if !status.is_granted() && self.detail_shop.take().is_some() && self.mode == AppMode::Detail {
                    self.mode = AppMode::Normal;
                }
            }
            LocationChange::PositionChanged(position) => {
                self.camera.on_user_location_changed(position);
                if position.is_some() {
                    self.clear_fix_failure();
                }
            }
            LocationChange::FixFailed(error) => {
                let notice = format!("Location update failed: {}", error);
                self.status_message = Some(notice.clone());
                self.fix_failure_notice = Some(notice);
            }
        }
    }

    /// Takes down the fix failure message unless something else replaced it.
    fn clear_fix_failure(&mut self) {
        if let Some(notice) = self.fix_failure_notice.take() {
            if self.status_message.as_ref() == Some(&notice) {
                self.status_message = None;
            }
        }
    }

    fn refresh_shops(&mut self) {
        let shops = self.visible_shops();
        if self.selected_index >= shops.len() {
            self.selected_index = shops.len().saturating_sub(1);
        }

        let ids: Vec<Uuid> = shops.iter().map(|shop| shop.id).collect();
        if ids != self.shown_shops {
            self.camera.on_shops_changed(&shops, self.position());
            self.shown_shops = ids;
        }
    }
}

impl App<SimulatedLocationService> {
    /// Whether the simulated permission dialog is on screen.
    pub fn is_prompting(&self) -> bool {
        self.location.service().is_prompting()
    }

    /// Answers the simulated permission dialog.
    ///
    /// # Arguments
    ///
    /// * `allow` - `true` grants access, `false` denies it
    pub fn answer_permission_prompt(&mut self, allow: bool) {
        self.location.service_mut().answer_prompt(allow);
        self.sync();
    }

    /// Flips location access in the simulated system settings.
    ///
    /// The app itself only notices on its next [`App::sync`].
    pub fn open_settings(&mut self) {
        let status = self.location.service_mut().open_settings();
        self.status_message = Some(format!("Settings: location access {}", status));
    }

    /// Lets the simulated platform deliver fixes that are due.
    pub fn tick(&mut self, now: Instant) {
        self.location.service_mut().tick(now);
        self.sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocationError, LocationEvent};
    use crate::infrastructure::{DEFAULT_FIX, SimulationConfig};
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct FakeClipboard {
        copied: Rc<RefCell<Vec<String>>>,
        unavailable: bool,
    }

    impl Clipboard for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), arboard::Error> {
            if self.unavailable {
                return Err(arboard::Error::ClipboardNotSupported);
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn app_with_status(status: AuthorizationStatus) -> App {
        let service = SimulatedLocationService::new(SimulationConfig {
            initial_status: status,
            ..SimulationConfig::default()
        });
        App::new(service, None)
    }

    fn located_app() -> App {
        let mut app = app_with_status(AuthorizationStatus::Granted)
            .with_clipboard(FakeClipboard::default());
        app.start();
        app.tick(Instant::now());
        app
    }

    fn names(shops: &[Shop]) -> Vec<String> {
        shops.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.screen(), Screen::PermissionPrompt);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.appearance, AppearanceMode::System);
        assert_eq!(app.distance().label, "10 miles");
        assert_eq!(app.selected_index, 0);
        assert!(app.status_message.is_none());
        assert!(app.position().is_none());
    }

    #[test]
    fn test_start_prompts_for_permission() {
        let mut app = App::default();
        app.start();
        assert!(app.is_prompting());
        assert_eq!(app.screen(), Screen::PermissionPrompt);
    }

    #[test]
    fn test_allow_then_fix_shows_list() {
        let mut app = App::default();
        app.start();
        app.answer_permission_prompt(true);
        assert_eq!(app.screen(), Screen::AcquiringLocation);

        app.tick(Instant::now());
        assert_eq!(app.screen(), Screen::ShopList);
        assert_eq!(app.position(), Some(DEFAULT_FIX));
        assert_eq!(
            names(&app.visible_shops()),
            vec!["Starbucks - Main St", "Dutch Bros - Downtown", "Dunkin' - City Center"]
        );
    }

    #[test]
    fn test_deny_then_settings_grants_on_next_sync() {
        let mut app = App::default();
        app.start();
        app.answer_permission_prompt(false);
        assert_eq!(app.screen(), Screen::PermissionDenied);

        app.open_settings();
        assert_eq!(app.screen(), Screen::PermissionDenied);

        app.sync();
        assert_eq!(app.screen(), Screen::AcquiringLocation);
        app.tick(Instant::now());
        assert_eq!(app.screen(), Screen::ShopList);
    }

    #[test]
    fn test_revocation_clears_position_and_closes_detail() {
        let mut app = located_app();
        app.open_detail();
        assert_eq!(app.mode, AppMode::Detail);

        app.open_settings();
        app.sync();

        assert_eq!(app.screen(), Screen::PermissionDenied);
        assert!(app.position().is_none());
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.detail_shop.is_none());
        assert!(!app.location.is_updating());
        assert!(!app.location.service().is_updating());
    }

    #[test]
    fn test_brand_toggle_filters_list() {
        let mut app = located_app();
        app.toggle_brand(Brand::Dunkin);
        assert_eq!(
            names(&app.visible_shops()),
            vec!["Starbucks - Main St", "Dutch Bros - Downtown"]
        );

        app.toggle_brand(Brand::Dunkin);
        assert_eq!(app.visible_shops().len(), 3);
    }

    #[test]
    fn test_deselecting_every_brand_matches_all() {
        let mut app = located_app();
        for brand in Brand::ALL {
            app.toggle_brand(brand);
        }
        assert!(app.selected_brands.is_empty());
        assert_eq!(app.visible_shops().len(), 3);
    }

    #[test]
    fn test_distance_picker_is_clamped() {
        let mut app = located_app();
        for _ in 0..10 {
            app.next_distance();
        }
        assert_eq!(app.distance().label, "20 miles");
        for _ in 0..10 {
            app.previous_distance();
        }
        assert_eq!(app.distance().label, "1 mile");
        assert_eq!(app.criteria().max_distance_meters, Some(1609.34));
    }

    #[test]
    fn test_selection_clamps_when_list_shrinks() {
        let mut app = located_app();
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_index, 2);

        app.toggle_brand(Brand::Starbucks);
        app.toggle_brand(Brand::DutchBros);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_shop().unwrap().brand, Brand::Dunkin);

        app.select_previous();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_open_detail_requires_list() {
        let mut app = app_with_status(AuthorizationStatus::Granted);
        app.start();
        app.open_detail();
        assert_eq!(app.mode, AppMode::Normal);

        app.tick(Instant::now());
        app.select_next();
        app.open_detail();
        assert_eq!(app.mode, AppMode::Detail);
        assert_eq!(app.detail_shop().unwrap().name, "Dutch Bros - Downtown");

        app.close_detail();
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_help_returns_to_previous_mode() {
        let mut app = located_app();
        app.open_detail();
        app.show_help();
        assert_eq!(app.mode, AppMode::Help);
        app.close_help();
        assert_eq!(app.mode, AppMode::Detail);
    }

    #[test]
    fn test_fix_failure_surfaces_message_and_keeps_position() {
        let mut app = located_app();
        app.location
            .service_mut()
            .deliver(LocationEvent::Failed(LocationError::Network));
        app.sync();

        assert_eq!(app.screen(), Screen::ShopList);
        assert_eq!(app.position(), Some(DEFAULT_FIX));
        assert!(app.status_message.as_ref().unwrap().contains("Location update failed"));
    }

    #[test]
    fn test_camera_follows_user() {
        let mut app = located_app();
        assert_eq!(app.camera.center, DEFAULT_FIX);

        let moved = Position::new(33.684566, -117.826508);
        app.location
            .service_mut()
            .deliver(LocationEvent::LocationsUpdated(vec![moved, DEFAULT_FIX]));
        app.sync();
        assert_eq!(app.position(), Some(moved));
        assert_eq!(app.camera.center, moved);
        assert_eq!(app.visible_shops()[0].name, "Dutch Bros - Northside");
    }

    #[test]
    fn test_appearance_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        let mut app = App::new(SimulatedLocationService::default(), Some(PreferenceStore::new(&path)));
        app.cycle_appearance();
        app.cycle_appearance();
        assert_eq!(app.appearance, AppearanceMode::Dark);

        let reopened = App::new(SimulatedLocationService::default(), Some(PreferenceStore::new(&path)));
        assert_eq!(reopened.appearance, AppearanceMode::Dark);
    }

    #[test]
    fn test_corrupt_preferences_fall_back_to_system() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{oops").unwrap();

        let app = App::new(SimulatedLocationService::default(), Some(PreferenceStore::new(&path)));
        assert_eq!(app.appearance, AppearanceMode::System);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_get_directions_copies_url() {
        let copied = Rc::new(RefCell::new(Vec::new()));
        let mut app = located_app().with_clipboard(FakeClipboard {
            copied: Rc::clone(&copied),
            unavailable: false,
        });
        assert!(app.get_directions().is_none());

        app.open_detail();
        let url = app.get_directions().unwrap();
        assert!(url.starts_with("https://maps.apple.com/?daddr=34.052235,-118.243683"));
        assert_eq!(*copied.borrow(), vec![url.clone()]);
        assert_eq!(app.status_message, Some(format!("Directions copied: {}", url)));
    }

    #[test]
    fn test_directions_shown_when_clipboard_unavailable() {
        let mut app = located_app().with_clipboard(FakeClipboard {
            unavailable: true,
            ..FakeClipboard::default()
        });
        app.open_detail();
        let url = app.get_directions().unwrap();
        assert_eq!(app.status_message, Some(format!("Directions: {}", url)));
    }

    #[test]
    fn test_directions_message_survives_next_fix() {
        let start = Instant::now();
        let mut app = app_with_status(AuthorizationStatus::Granted).with_clipboard(FakeClipboard {
            unavailable: true,
            ..FakeClipboard::default()
        });
        app.start();
        app.tick(start);
        app.open_detail();
        let url = app.get_directions().unwrap();

        app.tick(start + Duration::from_secs(2));
        assert_eq!(app.position(), Some(DEFAULT_FIX));
        assert_eq!(app.status_message, Some(format!("Directions: {}", url)));
    }

    #[test]
    fn test_preferences_error_survives_first_fix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{oops").unwrap();

        let service = SimulatedLocationService::new(SimulationConfig {
            initial_status: AuthorizationStatus::Granted,
            ..SimulationConfig::default()
        });
        let mut app = App::new(service, Some(PreferenceStore::new(&path)));
        app.start();
        app.tick(Instant::now());

        assert_eq!(app.screen(), Screen::ShopList);
        assert!(app
            .status_message
            .as_ref()
            .unwrap()
            .starts_with("Could not read preferences"));
    }

    #[test]
    fn test_fix_failure_message_cleared_by_next_fix() {
        let start = Instant::now();
        let service = SimulatedLocationService::new(SimulationConfig {
            initial_status: AuthorizationStatus::Granted,
            failed_fixes: 1,
            ..SimulationConfig::default()
        });
        let mut app = App::new(service, None);
        app.start();

        app.tick(start);
        assert_eq!(app.screen(), Screen::AcquiringLocation);
        assert!(app.status_message.as_ref().unwrap().starts_with("Location update failed"));

        app.tick(start + Duration::from_secs(2));
        assert_eq!(app.screen(), Screen::ShopList);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_fix_does_not_clear_newer_message() {
        let start = Instant::now();
        let service = SimulatedLocationService::new(SimulationConfig {
            initial_status: AuthorizationStatus::Granted,
            failed_fixes: 1,
            ..SimulationConfig::default()
        });
        let mut app = App::new(service, None);
        app.start();
        app.tick(start);
        app.cycle_appearance();

        app.tick(start + Duration::from_secs(2));
        assert_eq!(app.status_message.as_deref(), Some("Appearance: Light"));
    }
}
