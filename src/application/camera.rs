//! Map framing for the main map and the detail mini-map.

use crate::domain::{Position, Shop};

/// Used when neither the user nor any shop gives a better center.
pub const FALLBACK_CENTER: Position = Position::new(37.7749, -122.4194);

pub const DEFAULT_SPAN_DEGREES: f64 = 0.1;
pub const DETAIL_SPAN_DEGREES: f64 = 0.01;
pub const MIN_SPAN_DEGREES: f64 = 0.005;
pub const MAX_SPAN_DEGREES: f64 = 40.0;

/// Center and visible span (in degrees, both axes) of a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    pub center: Position,
    pub span_degrees: f64,
}

impl MapCamera {
    /// Frames the user if known, else the first shop, else a fallback city.
    pub fn initial(user: Option<Position>, shops: &[Shop]) -> Self {
        let center = user
            .or_else(|| shops.first().map(Shop::position))
            .unwrap_or(FALLBACK_CENTER);
        Self {
            center,
            span_degrees: DEFAULT_SPAN_DEGREES,
        }
    }

    /// Zoomed-in framing of a single shop.
    pub fn detail(shop: &Shop) -> Self {
        Self {
            center: shop.position(),
            span_degrees: DETAIL_SPAN_DEGREES,
        }
    }

    /// Re-frames after the displayed shops changed.
    ///
    /// Only moves to the user when the camera was never placed, or when there
    /// are no shops left to look at.
    pub fn on_shops_changed(&mut self, shops: &[Shop], user: Option<Position>) {
        let Some(user) = user else {
            return;
        };
        let unplaced = self.center.latitude == 0.0 && self.center.longitude == 0.0;
        if unplaced || shops.is_empty() {
            self.center = user;
        }
    }

    pub fn on_user_location_changed(&mut self, user: Option<Position>) {
        if let Some(user) = user {
            self.center = user;
        }
    }

    pub fn zoom_in(&mut self) {
        self.span_degrees = (self.span_degrees / 2.0).max(MIN_SPAN_DEGREES);
    }

    pub fn zoom_out(&mut self) {
        self.span_degrees = (self.span_degrees * 2.0).min(MAX_SPAN_DEGREES);
    }

    /// `(longitude bounds, latitude bounds)` for a canvas.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let half = self.span_degrees / 2.0;
        (
            [self.center.longitude - half, self.center.longitude + half],
            [self.center.latitude - half, self.center.latitude + half],
        )
    }
}
