//! Fixed-width review screens
//!
//! The decoder emits an ordered, capacity-bounded set of screens, each
//! up to three fixed-width lines with a page-type tag for the renderer.
//! Lines are truncated before storage, never by the renderer.

use heapless::{String, Vec};

/// Displayable line width in characters
pub const TEXT_WIDTH: usize = 17;

/// Lines per screen
pub const TEXT_LINES: usize = 3;

/// Maximum review screens per transaction
///
/// Fields decoded past this cap are checked but not displayed.
pub const MAX_SCREENS: usize = 8;

/// Page layout hint for the renderer
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub enum PageType {
    /// Content fits a single page
    #[default]
    Single,
    /// Content spans two readable pages
    Two,
}

/// One review screen
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Screen {
    /// Screen text, truncated to [`TEXT_WIDTH`] on write
    pub lines: [String<TEXT_WIDTH>; TEXT_LINES],

    /// Page layout hint
    pub page: PageType,
}

impl Screen {
    /// Create an empty screen with the provided page type
    pub fn new(page: PageType) -> Self {
        Self {
            lines: Default::default(),
            page,
        }
    }

    /// Set a line, truncating to the display width
    pub fn set_line(&mut self, ix: usize, text: &str) {
        let line = &mut self.lines[ix];
        line.clear();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
    }

    /// Set a line from raw bytes, truncating to the display width
    pub fn set_line_bytes(&mut self, ix: usize, bytes: &[u8]) {
        let text = core::str::from_utf8(bytes).unwrap_or("INVALID_UTF8");
        self.set_line(ix, text);
    }
}

/// Ordered set of review screens, bounded at [`MAX_SCREENS`]
///
/// Pushes past capacity are silently dropped so the decode still checks
/// later fields.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ScreenSet {
    screens: Vec<Screen, MAX_SCREENS>,
}

impl ScreenSet {
    /// Create an empty screen set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a screen, dropped if the set is full
    pub fn push(&mut self, screen: Screen) {
        let _ = self.screens.push(screen);
    }

    /// Discard all screens
    pub fn clear(&mut self) {
        self.screens.clear();
    }

    /// Number of screens in the set
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Returns true if there are no screens
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Fetch a screen by index
    pub fn get(&self, ix: usize) -> Option<&Screen> {
        self.screens.get(ix)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_truncation() {
        let mut s = Screen::new(PageType::Single);

        s.set_line(0, "short");
        assert_eq!(s.lines[0].as_str(), "short");

        s.set_line(1, "a line well past seventeen characters");
        assert_eq!(s.lines[1].as_str(), "a line well past ");
        assert_eq!(s.lines[1].len(), TEXT_WIDTH);
    }

    #[test]
    fn line_from_bytes() {
        let mut s = Screen::new(PageType::Two);

        s.set_line_bytes(0, b"Transfer");
        assert_eq!(s.lines[0].as_str(), "Transfer");

        s.set_line_bytes(1, &[0xff, 0xfe]);
        assert_eq!(s.lines[1].as_str(), "INVALID_UTF8");
    }

    #[test]
    fn capacity_drops_silently() {
        let mut set = ScreenSet::new();

        for i in 0..MAX_SCREENS + 3 {
            let mut s = Screen::new(PageType::Single);
            s.set_line(0, "screen");
            s.set_line(1, &i.to_string());
            set.push(s);
        }

        assert_eq!(set.len(), MAX_SCREENS);
        assert_eq!(
            set.get(MAX_SCREENS - 1).unwrap().lines[1].as_str(),
            (MAX_SCREENS - 1).to_string()
        );
        assert!(set.get(MAX_SCREENS).is_none());
    }
}
