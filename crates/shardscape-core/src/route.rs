//! Routes, pages and the navigation seam

use serde::{Deserialize, Serialize};
use std::fmt;

/// A navigation path such as `/about`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn home() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay label for this route: `/` reads `HOME`, anything else drops
    /// its first separator and is uppercased
    pub fn label(&self) -> Option<String> {
        match self.0.as_str() {
            "" => None,
            "/" => Some("HOME".to_string()),
            path => Some(path.replacen('/', "", 1).to_uppercase()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pages the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    About,
    Store,
    Works,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::About, Page::Store, Page::Works];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Store => "/store",
            Page::Works => "/works",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "HOME",
            Page::About => "ABOUT",
            Page::Store => "STORE",
            Page::Works => "WORKS",
        }
    }

    pub fn route(&self) -> Route {
        Route::new(self.path())
    }

    /// Exact match on a known path; a single trailing slash is tolerated
    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };
        Page::ALL.into_iter().find(|page| page.path() == trimmed)
    }
}

/// Imperative router the scene talks to
pub trait Navigator {
    /// Push `route` as the new current location
    fn navigate(&mut self, route: &Route);

    /// Replace the current location without adding a history entry
    fn replace(&mut self, route: &Route) {
        self.navigate(route);
    }

    /// Current location
    fn current(&self) -> Route;
}

/// In-memory router that keeps its full history
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    history: Vec<Route>,
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(Route::home())
    }
}

impl MemoryNavigator {
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&mut self, route: &Route) {
        self.history.push(route.clone());
    }

    fn replace(&mut self, route: &Route) {
        match self.history.last_mut() {
            Some(last) => *last = route.clone(),
            None => self.history.push(route.clone()),
        }
    }

    fn current(&self) -> Route {
        self.history.last().cloned().unwrap_or_else(Route::home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_labels() {
        assert_eq!(Route::home().label().as_deref(), Some("HOME"));
        assert_eq!(Route::new("/about").label().as_deref(), Some("ABOUT"));
        assert_eq!(Route::new("/works").label().as_deref(), Some("WORKS"));
        assert_eq!(Route::new("").label(), None);
    }

    #[test]
    fn test_label_strips_only_first_separator() {
        assert_eq!(
            Route::new("/works/reel").label().as_deref(),
            Some("WORKS/REEL")
        );
    }

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/"), Some(Page::Home));
        assert_eq!(Page::from_path("/store"), Some(Page::Store));
        assert_eq!(Page::from_path("/store/"), Some(Page::Store));
        assert_eq!(Page::from_path("/cart"), None);
    }

    #[test]
    fn test_page_titles_match_route_labels() {
        for page in Page::ALL {
            assert_eq!(page.route().label().as_deref(), Some(page.title()));
        }
    }

    #[test]
    fn test_memory_navigator_history() {
        let mut nav = MemoryNavigator::default();
        nav.navigate(&Route::new("/about"));
        nav.navigate(&Route::new("/store"));

        assert_eq!(nav.current(), Route::new("/store"));
        assert_eq!(
            nav.history(),
            &[Route::home(), Route::new("/about"), Route::new("/store")]
        );
    }

    #[test]
    fn test_memory_navigator_replace_keeps_length() {
        let mut nav = MemoryNavigator::new(Route::new("/nowhere"));
        nav.replace(&Route::home());
        assert_eq!(nav.history(), &[Route::home()]);
    }
}
