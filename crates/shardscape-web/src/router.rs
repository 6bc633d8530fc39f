//! Routing between pages: browser history on the web, in memory elsewhere

use bevy::prelude::*;
use shardscape_core::{Navigator, Page, Route};
use shardscape_scene::{ActivePage, NavigationRequest, SceneSystems};

/// Router the app navigates through
#[derive(Resource)]
pub struct Router {
    navigator: Box<dyn Navigator + Send + Sync>,
}

impl Router {
    pub fn new(navigator: impl Navigator + Send + Sync + 'static) -> Self {
        Self {
            navigator: Box::new(navigator),
        }
    }

    /// Browser history on wasm, an in-memory history starting at `/` elsewhere
    pub fn for_platform() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(BrowserHistory)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(shardscape_core::MemoryNavigator::default())
        }
    }

    pub fn current(&self) -> Route {
        self.navigator.current()
    }

    /// Navigate to `route` and return the page to show. Unknown routes
    /// redirect to home.
    pub fn go(&mut self, route: &Route) -> Page {
        self.navigator.navigate(route);
        self.settle()
    }

    /// Resolve the current location, redirecting unknown paths to home
    pub fn settle(&mut self) -> Page {
        let current = self.navigator.current();
        match Page::from_path(current.as_str()) {
            Some(page) => page,
            None => {
                tracing::info!(route = %current, "Unknown route, redirecting home");
                self.navigator.replace(&Route::home());
                Page::Home
            }
        }
    }
}

/// History API backed navigator
#[cfg(target_arch = "wasm32")]
pub struct BrowserHistory;

#[cfg(target_arch = "wasm32")]
impl BrowserHistory {
    fn history() -> Option<web_sys::History> {
        web_sys::window()?.history().ok()
    }
}

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserHistory {
    fn navigate(&mut self, route: &Route) {
        let Some(history) = Self::history() else {
            return;
        };
        if let Err(err) =
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.as_str()))
        {
            tracing::warn!(route = %route, ?err, "pushState failed");
        }
    }

    fn replace(&mut self, route: &Route) {
        let Some(history) = Self::history() else {
            return;
        };
        if let Err(err) =
            history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.as_str()))
        {
            tracing::warn!(route = %route, ?err, "replaceState failed");
        }
    }

    fn current(&self) -> Route {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .map(Route::new)
            .unwrap_or_else(Route::home)
    }
}

pub struct RouterPlugin;

impl Plugin for RouterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (follow_location, apply_navigation_requests)
                .chain()
                .after(SceneSystems::Animation),
        );
    }
}

/// Follow location changes made outside the app (back/forward buttons)
fn follow_location(
    mut router: ResMut<Router>,
    active: Res<State<ActivePage>>,
    mut next: ResMut<NextState<ActivePage>>,
) {
    let page = router.settle();
    if page != active.get().0 {
        tracing::debug!(?page, "Location changed externally");
        next.set(ActivePage(page));
    }
}

fn apply_navigation_requests(
    mut requests: MessageReader<NavigationRequest>,
    mut router: ResMut<Router>,
    mut next: ResMut<NextState<ActivePage>>,
) {
    for request in requests.read() {
        let page = router.go(&request.route);
        tracing::info!(route = %request.route, ?page, "Navigating");
        next.set(ActivePage(page));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use shardscape_core::MemoryNavigator;

    fn test_app(start: &str) -> App {
        let mut app = App::new();
        let mut router = Router::new(MemoryNavigator::new(Route::new(start)));
        let initial = router.settle();

        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_state(ActivePage(initial))
            .insert_resource(router)
            .add_message::<NavigationRequest>()
            .add_plugins(RouterPlugin);
        app
    }

    fn request(app: &mut App, path: &str) {
        app.world_mut().write_message(NavigationRequest {
            route: Route::new(path),
        });
    }

    fn page(app: &App) -> Page {
        app.world().resource::<State<ActivePage>>().get().0
    }

    #[test]
    fn test_request_switches_page() {
        let mut app = test_app("/");
        request(&mut app, "/about");
        app.update();
        app.update();

        assert_eq!(page(&app), Page::About);
        assert_eq!(app.world().resource::<Router>().current(), Route::new("/about"));
    }

    #[test]
    fn test_unknown_start_path_redirects_home() {
        let app = test_app("/does-not-exist");
        assert_eq!(app.world().resource::<Router>().current(), Route::home());
    }

    #[test]
    fn test_unknown_request_lands_home() {
        let mut app = test_app("/works");
        app.update();
        assert_eq!(page(&app), Page::Works);

        request(&mut app, "/gallery");
        app.update();
        app.update();

        assert_eq!(page(&app), Page::Home);
        assert_eq!(app.world().resource::<Router>().current(), Route::home());
    }
}
