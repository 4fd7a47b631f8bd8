//! In-memory navigation history

use std::fmt;

/// A parsed location: path, query string and fragment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub pathname: String,
    /// Includes the leading `?` when present
    pub search: String,
    /// Includes the leading `#` when present
    pub hash: String,
}

impl Location {
    /// Split an href into its parts; a missing path becomes `/`
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(i) => (&href[..i], href[i..].to_string()),
            None => (href, String::new()),
        };
        let (path, search) = match rest.find('?') {
            Some(i) => (&rest[..i], rest[i..].to_string()),
            None => (rest, String::new()),
        };

        let pathname = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            pathname,
            search,
            hash,
        }
    }

    /// Path, query and fragment joined back together
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

const HISTORY_LIMIT: usize = 100;

/// History stack with a cursor; the oldest entries drop past `HISTORY_LIMIT`
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<Location>,
    index: usize,
}

impl Navigator {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![Location::parse(initial)],
            index: 0,
        }
    }

    pub fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Go to `href`, dropping any forward entries when pushing
    pub fn navigate(&mut self, href: &str, options: NavigateOptions) -> &Location {
        let location = Location::parse(href);
        if options.replace {
            self.entries[self.index] = location;
        } else {
            self.entries.truncate(self.index + 1);
            self.entries.push(location);
            if self.entries.len() > HISTORY_LIMIT {
                self.entries.remove(0);
            }
            self.index = self.entries.len() - 1;
        }
        self.location()
    }

    /// Step back one entry; `None` at the start of history
    pub fn back(&mut self) -> Option<&Location> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.location())
    }

    pub fn forward(&mut self) -> Option<&Location> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.location())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let loc = Location::parse("/accounts/1?filter=open#top");
        assert_eq!(loc.pathname, "/accounts/1");
        assert_eq!(loc.search, "?filter=open");
        assert_eq!(loc.hash, "#top");
        assert_eq!(loc.href(), "/accounts/1?filter=open#top");

        assert_eq!(Location::parse("").pathname, "/");
        assert_eq!(Location::parse("budget").pathname, "/budget");
        assert_eq!(Location::parse("?q=1").pathname, "/");
    }

    #[test]
    fn test_push_replace_back() {
        let mut nav = Navigator::new("/");
        nav.navigate("/budget", NavigateOptions::replace());
        assert_eq!(nav.len(), 1);

        nav.navigate("/accounts", NavigateOptions::default());
        nav.navigate("/payees", NavigateOptions::default());
        assert_eq!(nav.back().unwrap().pathname, "/accounts");

        // Pushing drops the forward entry
        nav.navigate("/rules", NavigateOptions::default());
        assert!(nav.forward().is_none());
        assert_eq!(nav.len(), 3);
        assert_eq!(nav.back().unwrap().pathname, "/accounts");
        assert_eq!(nav.back().unwrap().pathname, "/budget");
        assert!(nav.back().is_none());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut nav = Navigator::new("/budget");
        for i in 0..(HISTORY_LIMIT + 5) {
            nav.navigate(&format!("/accounts/{}", i), NavigateOptions::default());
        }
        assert_eq!(nav.len(), HISTORY_LIMIT);
        assert_eq!(
            nav.location().pathname,
            format!("/accounts/{}", HISTORY_LIMIT + 4)
        );

        while nav.back().is_some() {}
        assert_eq!(nav.location().pathname, "/accounts/5");
    }
}
