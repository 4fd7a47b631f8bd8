//! Viewport classification
//!
//! The shell only distinguishes two layouts. The observer turns raw terminal
//! widths into a class and reports a change exactly when the class flips.

use std::fmt;

/// Binary layout mode derived from the terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    /// Classify a width against a breakpoint; widths below it are narrow
    pub fn from_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    pub fn is_narrow(&self) -> bool {
        matches!(self, Self::Narrow)
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narrow => write!(f, "narrow"),
            Self::Wide => write!(f, "wide"),
        }
    }
}

/// Tracks the current width and class
#[derive(Debug, Clone)]
pub struct ResponsiveObserver {
    breakpoint: u16,
    width: u16,
    class: ViewportClass,
}

impl ResponsiveObserver {
    pub fn new(breakpoint: u16, width: u16) -> Self {
        Self {
            breakpoint,
            width,
            class: ViewportClass::from_width(width, breakpoint),
        }
    }

    /// Record a new width, returning the new class if it changed
    pub fn observe(&mut self, width: u16) -> Option<ViewportClass> {
        self.width = width;
        let class = ViewportClass::from_width(width, self.breakpoint);
        if class == self.class {
            return None;
        }
        self.class = class;
        Some(class)
    }

    pub fn class(&self) -> ViewportClass {
        self.class
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_narrow_width(&self) -> bool {
        self.class.is_narrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_wide() {
        assert_eq!(ViewportClass::from_width(99, 100), ViewportClass::Narrow);
        assert_eq!(ViewportClass::from_width(100, 100), ViewportClass::Wide);
    }

    #[test]
    fn test_observe_reports_only_changes() {
        let mut observer = ResponsiveObserver::new(100, 120);
        assert_eq!(observer.class(), ViewportClass::Wide);

        assert_eq!(observer.observe(110), None);
        assert_eq!(observer.observe(80), Some(ViewportClass::Narrow));
        assert_eq!(observer.observe(60), None);
        assert!(observer.is_narrow_width());
        assert_eq!(observer.width(), 60);
        assert_eq!(observer.observe(140), Some(ViewportClass::Wide));
    }
}
