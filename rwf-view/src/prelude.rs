//! Types and traits you'll need to render views.
//!
//! ```
//! use rwf_view::prelude::*;
//! ```
pub use crate::config::Config;
pub use crate::executor::{from_fn, Directives, Executor, Handlers};
pub use crate::logging::Logger;
pub use crate::{Attributes, Error, Renderer, Scope, Template, ToValue, Value};
