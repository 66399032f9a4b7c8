//! Template executors.
//!
//! The renderer finds template files, the executor runs them. A template body can be
//! Rust code ([`from_fn`], [`Handlers`]) or a text file using Rwf tags ([`Directives`]).
pub mod directives;

pub use directives::Directives;

use crate::{Error, Scope, Template};

use std::collections::HashMap;

/// Executes the body of a template against a scope.
pub trait Executor {
    fn execute(&self, template: &Template, scope: &mut Scope<'_>) -> Result<(), Error>;
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&self, template: &Template, scope: &mut Scope<'_>) -> Result<(), Error> {
        (**self).execute(template, scope)
    }
}

/// Executor backed by a single function, called for every template.
pub struct FromFn<F>(F);

/// Use a function as the executor.
///
/// ```
/// use rwf_view::executor::from_fn;
///
/// let executor = from_fn(|template, scope| {
///     scope.write(template.name());
///     Ok(())
/// });
/// # let _ = executor;
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&Template, &mut Scope<'_>) -> Result<(), Error>,
{
    FromFn(f)
}

impl<F> Executor for FromFn<F>
where
    F: Fn(&Template, &mut Scope<'_>) -> Result<(), Error>,
{
    fn execute(&self, template: &Template, scope: &mut Scope<'_>) -> Result<(), Error> {
        (self.0)(template, scope)
    }
}

type Handler = Box<dyn Fn(&mut Scope<'_>) -> Result<(), Error> + Send + Sync>;

/// Template bodies written in Rust, registered by template name.
///
/// The template file still has to exist on disk, since that's where the
/// renderer looks for it. Its body is the registered handler.
#[derive(Default)]
pub struct Handlers {
    handlers: HashMap<String, Handler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, builder-style.
    pub fn handler<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&mut Scope<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.register(name, handler);
        self
    }

    pub fn register<F>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Scope<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl Executor for Handlers {
    fn execute(&self, template: &Template, scope: &mut Scope<'_>) -> Result<(), Error> {
        match self.handlers.get(template.name()) {
            Some(handler) => handler(scope),
            None => Err(Error::NoHandler(template.name().to_string())),
        }
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("templates", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
