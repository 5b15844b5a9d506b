//! Page registry.
//!
//! # Responsibilities
//! - Keep page routes in registration order
//! - Track the default route (`/`, else the first registered)
//! - Keep partial routes (bare-fragment endpoints) apart from pages
//! - Render the directory fragment served at `/`
//!
//! # Design Decisions
//! - Populated once during assembly, then shared immutably via `Arc`
//! - Duplicate (path, method) pairs and unmountable paths fail at
//!   registration instead of at router construction

use axum::routing::MethodFilter;

use crate::error::PageError;
use crate::html::{escape, Fragment};
use crate::pages::route::Route;
use crate::table::TABLE_ENDPOINT;

/// Ordered list of page routes plus partial endpoints.
#[derive(Debug, Default)]
pub struct PageRegistry {
    routes: Vec<Route>,
    partials: Vec<Route>,
    default: Option<usize>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page route. A route at `/`, or the first route, becomes the
    /// default.
    pub fn register(&mut self, route: Route) -> Result<(), PageError> {
        self.check(&route)?;
        tracing::debug!(path = %route.path, name = %route.name, "Page registered");
        if route.path == "/" || self.default.is_none() {
            self.default = Some(self.routes.len());
        }
        self.routes.push(route);
        Ok(())
    }

    /// Append a partial route, served without the page shell and not listed
    /// in the directory.
    pub fn register_partial(&mut self, route: Route) -> Result<(), PageError> {
        self.check(&route)?;
        tracing::debug!(path = %route.path, name = %route.name, "Partial registered");
        self.partials.push(route);
        Ok(())
    }

    fn check(&self, route: &Route) -> Result<(), PageError> {
        let invalid = |reason: &'static str| PageError::InvalidPath {
            path: route.path.clone(),
            reason,
        };
        check_path(&route.path).map_err(invalid)?;
        let shape = path_shape(&route.path);
        let conflicting = self
            .routes
            .iter()
            .chain(&self.partials)
            .any(|r| r.path != route.path && path_shape(&r.path) == shape);
        if conflicting {
            return Err(invalid("conflicts with a route differing only in parameter names"));
        }

        for method in &route.methods {
            if MethodFilter::try_from(method.clone()).is_err() {
                return Err(PageError::InvalidMethod(method.to_string()));
            }
            let taken = self
                .routes
                .iter()
                .chain(&self.partials)
                .any(|r| r.path == route.path && r.methods.contains(method));
            if taken {
                return Err(PageError::DuplicateRoute {
                    path: route.path.clone(),
                    method: method.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Page routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn partials(&self) -> &[Route] {
        &self.partials
    }

    pub fn default_route(&self) -> Option<&Route> {
        self.default.map(|i| &self.routes[i])
    }

    /// Whether some page or partial is mounted at `/`.
    pub fn owns_root(&self) -> bool {
        self.routes
            .iter()
            .chain(&self.partials)
            .any(|r| r.path == "/")
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Directory of registered pages, or a notice when there are none.
    pub fn default_page_fragment(&self) -> Fragment {
        if self.routes.is_empty() {
            return Fragment::trusted("<div class='notice'>No pages registered.</div>");
        }

        let links: String = self
            .routes
            .iter()
            .map(|r| {
                format!(
                    "<li><a href='{path}'>{} ({path})</a></li>",
                    escape(&r.name),
                    path = escape(&r.path)
                )
            })
            .collect();
        Fragment::trusted(format!(
            "<div class='card notice'><div class='notice__title'>Pages</div>\
             <p>Select a page to view:</p><ul class='notice__list'>{links}</ul></div>"
        ))
    }
}

/// Path rules of the axum router, checked up front.
fn check_path(path: &str) -> Result<(), &'static str> {
    if !path.starts_with('/') {
        return Err("must start with '/'");
    }
    if path == TABLE_ENDPOINT || path.starts_with(&format!("{TABLE_ENDPOINT}/")) {
        return Err("reserved for table partials");
    }

    let segments: Vec<&str> = path[1..].split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
        if segment.starts_with(':') {
            return Err("parameters use '{name}', not ':name'");
        }
        if !segment.contains(['{', '}']) {
            continue;
        }
        let name = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or("a parameter must fill its whole segment")?;
        let name = match name.strip_prefix('*') {
            Some(_) if i + 1 != segments.len() => {
                return Err("a wildcard must be the last segment");
            }
            Some(rest) => rest,
            None => name,
        };
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err("parameter names must be non-empty identifiers");
        }
    }
    Ok(())
}

/// `path` with parameter names erased, so `/u/{id}` and `/u/{name}` match.
fn path_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix('{') {
            Some(rest) if rest.starts_with('*') => "{*}",
            Some(_) => "{}",
            None => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}
