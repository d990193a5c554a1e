//! Navigation: which view is active, and the title guard that runs before
//! every transition.

pub mod routes;
pub mod title;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

pub use routes::{Params, RouteDescriptor, RouteMeta, ViewId, ROUTES};
pub use title::{DocumentTitle, TitleSink};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no route matches path {0}")]
    NoMatch(String),
    #[error("no route named {0}")]
    UnknownName(String),
    #[error("route {name} is missing params for {pattern}")]
    MissingParams { name: String, pattern: String },
}

/// A route descriptor bound to a concrete path.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub descriptor: &'static RouteDescriptor,
    pub path: String,
    pub params: Params,
}

impl ResolvedRoute {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn view(&self) -> ViewId {
        self.descriptor.view
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

pub type RouteListener = Rc<dyn Fn(&ResolvedRoute)>;

struct Inner {
    current: Option<ResolvedRoute>,
    history: Vec<ResolvedRoute>,
    listeners: Vec<RouteListener>,
}

/// Route state machine. Clones share the same state.
#[derive(Clone)]
pub struct Router {
    routes: &'static [RouteDescriptor],
    title: Rc<dyn TitleSink>,
    inner: Rc<RefCell<Inner>>,
}

impl Router {
    pub fn new(title: Rc<dyn TitleSink>) -> Self {
        Self::with_routes(&ROUTES, title)
    }

    pub fn with_routes(routes: &'static [RouteDescriptor], title: Rc<dyn TitleSink>) -> Self {
        Self {
            routes,
            title,
            inner: Rc::new(RefCell::new(Inner {
                current: None,
                history: Vec::new(),
                listeners: Vec::new(),
            })),
        }
    }

    pub fn routes(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    pub fn current(&self) -> Option<ResolvedRoute> {
        self.inner.borrow().current.clone()
    }

    /// Called after every completed transition.
    pub fn on_navigate(&self, listener: impl Fn(&ResolvedRoute) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, NavigationError> {
        let normalized = routes::normalize(path);
        self.routes
            .iter()
            .find_map(|descriptor| {
                routes::match_path(descriptor.path, &normalized).map(|params| ResolvedRoute {
                    descriptor,
                    path: normalized.clone(),
                    params,
                })
            })
            .ok_or(NavigationError::NoMatch(normalized))
    }

    /// Initial navigation. An unknown start path lands on the root route.
    pub fn start(&self, path: &str) -> Result<ResolvedRoute, NavigationError> {
        let route = self.resolve(path).or_else(|e| {
            warn!(error = %e, "Unknown start path, falling back to root");
            self.resolve("/")
        })?;
        Ok(self.commit(route))
    }

    pub fn navigate(&self, path: &str) -> Result<ResolvedRoute, NavigationError> {
        let route = self.resolve(path)?;
        Ok(self.transition(route))
    }

    /// Programmatic navigation by symbolic name, e.g.
    /// `navigate_named("TopicDetail", &[("id", "42")])`.
    pub fn navigate_named(&self, name: &str, params: &[(&str, &str)]) -> Result<ResolvedRoute, NavigationError> {
        let descriptor = self
            .routes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| NavigationError::UnknownName(name.to_string()))?;
        let params: Params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let path = routes::fill_path(descriptor.path, &params).ok_or_else(|| {
            NavigationError::MissingParams {
                name: name.to_string(),
                pattern: descriptor.path.to_string(),
            }
        })?;
        self.navigate(&path)
    }

    /// Return to the previous route, if any. The guard runs as for any other
    /// transition.
    pub fn back(&self) -> Option<ResolvedRoute> {
        let previous = self.inner.borrow_mut().history.pop()?;
        Some(self.commit(previous))
    }

    fn transition(&self, to: ResolvedRoute) -> ResolvedRoute {
        let from = self.current();
        if let Some(from) = from {
            if from.path == to.path {
                debug!(path = %to.path, "Already on route");
                return from;
            }
            self.inner.borrow_mut().history.push(from);
        }
        self.commit(to)
    }

    // Guard first, then the state change, then listeners.
    fn commit(&self, to: ResolvedRoute) -> ResolvedRoute {
        self.before_each(&to);

        let listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.current = Some(to.clone());
            inner.listeners.clone()
        };
        debug!(route = to.name(), view = to.view().component(), path = %to.path, "Navigated");
        for listener in listeners {
            listener(&to);
        }
        to
    }

    /// Title guard. Never cancels or redirects.
    fn before_each(&self, to: &ResolvedRoute) {
        self.title.set_title(&title::title_for(to.descriptor));
    }
}
