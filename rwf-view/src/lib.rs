//! Layouts for Rwf views: blocks and template inheritance.
//!
//! A [`Renderer`] finds template files on disk and executes them with a [`Scope`], which
//! gives the template its variables and a handle back into the renderer. Templates can
//! capture named blocks of output and declare a parent template to render around them:
//!
//! ```
//! # fn main() -> Result<(), rwf_view::Error> {
//! use rwf_view::prelude::*;
//! # let dir = tempdir::TempDir::new("rwf-view")?;
//! # std::fs::write(
//! #     dir.path().join("index.html"),
//! #     r#"<% inherits "layout" %><% begin_block "content" %>Hi, <%= name %><% end_block %>"#,
//! # )?;
//! # std::fs::write(
//! #     dir.path().join("layout.html"),
//! #     r#"<main><%- block "content" %></main>"#,
//! # )?;
//!
//! let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), Directives::new(false));
//! let page = renderer.render("index", [("name", "Lev")])?;
//!
//! assert_eq!(page, "<main>Hi, Lev</main>");
//! # Ok(())
//! # }
//! ```
//!
//! Template bodies are run by an [`Executor`]. [`Directives`] reads text templates with
//! Rwf tags, [`Handlers`] runs Rust functions registered by template name.
pub mod attributes;
pub mod colors;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod prelude;
pub mod renderer;
pub mod scope;
pub mod template;
pub mod value;

mod state;

pub use attributes::Attributes;
pub use error::Error;
pub use executor::{Directives, Executor, Handlers};
pub use renderer::Renderer;
pub use scope::Scope;
pub use template::Template;
pub use value::{ToValue, Value};

/// Remove unsafe characters from a string printed
/// inside an HTML template.
pub fn safe_html(string: &str) -> String {
    string
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
