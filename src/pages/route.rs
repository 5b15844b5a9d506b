//! Route definitions and the handler abstraction.
//!
//! # Design Decisions
//! - A route is an explicit record (path, methods, name, handler) built at
//!   assembly time and never mutated afterwards
//! - Sync and async handlers are both stored as boxed futures so the server
//!   awaits every handler the same way

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use futures_util::future::BoxFuture;

use crate::error::PageError;
use crate::html::Fragment;
use crate::pages::context::PageContext;

pub type HandlerFuture = BoxFuture<'static, Result<Fragment, PageError>>;
pub type RouteHandler = Arc<dyn Fn(PageContext) -> HandlerFuture + Send + Sync>;

/// Values a handler may return.
pub trait IntoPageResult {
    fn into_page_result(self) -> Result<Fragment, PageError>;
}

impl IntoPageResult for Fragment {
    fn into_page_result(self) -> Result<Fragment, PageError> {
        Ok(self)
    }
}

impl<E: Into<PageError>> IntoPageResult for Result<Fragment, E> {
    fn into_page_result(self) -> Result<Fragment, PageError> {
        self.map_err(Into::into)
    }
}

/// One registered route.
#[derive(Clone)]
pub struct Route {
    pub path: String,
    pub methods: Vec<Method>,
    /// Handler identity, shown in the page directory and in logs.
    pub name: String,
    handler: RouteHandler,
}

impl Route {
    /// `GET` route backed by an async handler.
    pub fn new<H, Fut, R>(path: impl Into<String>, name: impl Into<String>, handler: H) -> Self
    where
        H: Fn(PageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoPageResult,
    {
        let handler: RouteHandler = Arc::new(move |ctx: PageContext| -> HandlerFuture {
            let fut = handler(ctx);
            Box::pin(async move { fut.await.into_page_result() })
        });
        Self {
            path: path.into(),
            methods: vec![Method::GET],
            name: name.into(),
            handler,
        }
    }

    /// `GET` route backed by a synchronous handler.
    pub fn new_sync<H, R>(path: impl Into<String>, name: impl Into<String>, handler: H) -> Self
    where
        H: Fn(PageContext) -> R + Send + Sync + 'static,
        R: IntoPageResult,
    {
        let handler: RouteHandler = Arc::new(move |ctx: PageContext| -> HandlerFuture {
            let result = handler(ctx).into_page_result();
            Box::pin(async move { result })
        });
        Self {
            path: path.into(),
            methods: vec![Method::GET],
            name: name.into(),
            handler,
        }
    }

    /// Replace the accepted methods. Repeats are dropped.
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods.clear();
        for method in methods {
            if !self.methods.contains(&method) {
                self.methods.push(method);
            }
        }
        self
    }

    /// Replace the accepted methods from names such as `"post"`.
    pub fn method_names<I, S>(self, names: I) -> Result<Self, PageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let methods = names
            .into_iter()
            .map(|name| {
                let upper = name.as_ref().trim().to_ascii_uppercase();
                Method::from_bytes(upper.as_bytes())
                    .map_err(|_| PageError::InvalidMethod(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.methods(methods))
    }

    /// Invoke the handler.
    pub fn call(&self, ctx: PageContext) -> HandlerFuture {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("methods", &self.methods)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
