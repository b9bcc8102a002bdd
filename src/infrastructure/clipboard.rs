use crate::domain::Shop;
use std::fmt;

/// Apple Maps driving directions to a shop.
pub fn directions_url(shop: &Shop) -> String {
    format!(
        "https://maps.apple.com/?daddr={:.6},{:.6}&dirflg=d",
        shop.latitude, shop.longitude
    )
}

/// Somewhere text can be copied to.
pub trait Clipboard: fmt::Debug {
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error>;
}

/// The desktop clipboard.
///
/// A connection is opened per copy, so a session without a clipboard only
/// fails when something is actually copied.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())
    }
}
