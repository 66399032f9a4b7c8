//! Template renderer with blocks and template inheritance.
//!
//! A render executes the requested template, then every parent template it (or its
//! parents) registered with [`Scope::inherits`], latest first. Each parent replaces the
//! captured output, so the last template in the chain produces the result. Blocks
//! captured along the way are what ties the chain together: the child captures them,
//! the layout reads them back.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), rwf_view::Error> {
//! use rwf_view::prelude::*;
//! # let dir = tempdir::TempDir::new("rwf-view")?;
//! # std::fs::write(dir.path().join("index.html"), "")?;
//! # std::fs::write(dir.path().join("layout.html"), "")?;
//!
//! let handlers = Handlers::new()
//!     .handler("index", |scope| {
//!         scope.inherits("layout");
//!         scope.begin_block("content").write("<p>Hello</p>");
//!         scope.end_block()?;
//!         Ok(())
//!     })
//!     .handler("layout", |scope| {
//!         let content = scope.block_or("content", "");
//!         scope.write("<body>").write(&content).write("</body>");
//!         Ok(())
//!     });
//!
//! let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);
//! assert_eq!(renderer.render_default("index")?, "<body><p>Hello</p></body>");
//! # Ok(())
//! # }
//! ```
use crate::colors::MaybeColorize;
use crate::config::get_config;
use crate::executor::{Directives, Executor};
use crate::state::State;
use crate::{Attributes, Error, Scope, Template, ToValue, Value};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// Renders templates found under a base path.
///
/// A renderer keeps its attributes and captured blocks between renders and isn't
/// meant to be shared: use one renderer per response.
#[derive(Debug)]
pub struct Renderer<E = Directives> {
    path: PathBuf,
    extension: String,
    executor: E,
    state: State,
}

impl Default for Renderer<Directives> {
    fn default() -> Self {
        Self::from_config(Directives::default())
    }
}

impl<E: Executor> Renderer<E> {
    /// Create a renderer for templates at `<path>/<name>.<extension>`.
    pub fn new(
        path: impl AsRef<Path>,
        extension: &str,
        attributes: Attributes,
        executor: E,
    ) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            extension: extension.to_string(),
            executor,
            state: State::new(attributes),
        }
    }

    /// Create a renderer using the template path and extension from the configuration.
    pub fn from_config(executor: E) -> Self {
        let view = &get_config().view;
        Self::new(&view.templates, &view.extension, Attributes::new(), executor)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.path = path.as_ref().to_owned();
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn set_extension(&mut self, extension: &str) -> &mut Self {
        self.extension = extension.to_string();
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn attributes(&self) -> &Attributes {
        &self.state.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.state.attributes
    }

    pub fn set_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.state.attributes = attributes;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.state.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl ToValue) -> Result<&mut Self, Error> {
        self.state.attributes.set(name, value)?;
        Ok(self)
    }

    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.state.attributes.remove(name);
        self
    }

    /// Captured block, if any template captured it.
    pub fn block(&self, name: &str) -> Option<&str> {
        self.state.block(name)
    }

    pub fn block_or(&self, name: &str, default: &str) -> String {
        self.block(name).unwrap_or(default).to_string()
    }

    pub fn blocks(&self) -> &HashMap<String, String> {
        &self.state.blocks
    }

    /// Forget all captured blocks, e.g. before reusing the renderer for another page.
    pub fn clear_blocks(&mut self) -> &mut Self {
        self.state.blocks.clear();
        self
    }

    /// Render a template and its parents.
    ///
    /// `data` is layered on top of the renderer's attributes, winning on conflicts, and is
    /// visible to every template in the chain.
    pub fn render(
        &mut self,
        template: &str,
        data: impl TryInto<Attributes, Error = Error>,
    ) -> Result<String, Error> {
        let data = data.try_into()?;
        let start = Instant::now();

        match self.render_chain(template, &data) {
            Ok(output) => {
                info!(
                    "rendered {} ({:.3} ms)",
                    template.green(),
                    start.elapsed().as_secs_f64() * 1000.0
                );
                Ok(output)
            }

            Err(err) => {
                error!("failed to render {}: {}", template.red(), err);
                self.state.reset();
                Err(err)
            }
        }
    }

    /// Render a template with no additional data.
    pub fn render_default(&mut self, template: &str) -> Result<String, Error> {
        self.render(template, &Attributes::new())
    }

    fn render_chain(&mut self, template: &str, data: &Attributes) -> Result<String, Error> {
        self.state.open();
        self.require_template(template, data)?;

        while let Some(parent) = self.state.inherits.pop() {
            self.state.clear();
            self.require_template(&parent, data)?;
        }

        self.state.close()
    }

    /// Execute one template. Everything in its scope afterwards becomes an attribute.
    fn require_template(&mut self, name: &str, data: &Attributes) -> Result<(), Error> {
        let template = Template::resolve(&self.path, name, &self.extension)?;
        debug!("executing {}", template.path().display().to_string().purple());

        let mut locals = self.state.attributes.get_all().clone();
        locals.extend(data.clone());

        let mut scope = Scope::new(&template, &mut self.state, locals);
        self.executor.execute(&template, &mut scope)?;
        let locals = scope.into_locals();

        if let Some(block) = self.state.open_block() {
            return Err(Error::UnclosedBlock(block.to_string()));
        }

        self.state.attributes.merge(locals);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::executor::{from_fn, Handlers};
    use tempdir::TempDir;

    fn templates(names: &[&str]) -> TempDir {
        let dir = TempDir::new("rwf-view").expect("tempdir");
        for name in names {
            std::fs::write(dir.path().join(format!("{}.html", name)), "").expect("write");
        }
        dir
    }

    #[test]
    fn test_plain_render() -> Result<(), Error> {
        let dir = templates(&["hello"]);
        let handlers = Handlers::new().handler("hello", |scope| {
            let greeting = scope.get("greeting").cloned().unwrap_or_default();
            let name = scope.get("name").cloned().unwrap_or_default();
            scope
                .write(&greeting.to_string())
                .write(", ")
                .write(&name.to_string());
            Ok(())
        });

        let mut renderer = Renderer::new(
            dir.path(),
            "html",
            Attributes::try_from([("greeting", "Hello"), ("name", "nobody")])?,
            handlers,
        );

        assert_eq!(renderer.render("hello", [("name", "Lev")])?, "Hello, Lev");

        Ok(())
    }

    #[test]
    fn test_second_capture_replays_first() -> Result<(), Error> {
        let dir = templates(&["page"]);
        let handlers = Handlers::new().handler("page", |scope| {
            scope.begin_block("x").write("A");
            scope.end_block()?;
            scope.write("-");
            scope.begin_block("x").write("B");
            scope.end_block()?;
            Ok(())
        });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);
        assert_eq!(renderer.render_default("page")?, "A-A");
        assert_eq!(renderer.block("x"), Some("A"));

        Ok(())
    }

    #[test]
    fn test_default_then_override() -> Result<(), Error> {
        let dir = templates(&["layout", "child"]);
        let handlers = Handlers::new()
            .handler("layout", |scope| {
                let x = scope.block_or("x", "default");
                scope.write(&x);
                Ok(())
            })
            .handler("child", |scope| {
                scope.begin_block("x").write("child");
                scope.end_block()?;
                Ok(())
            });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);

        assert_eq!(renderer.render_default("layout")?, "default");
        assert_eq!(renderer.render_default("child")?, "child");
        assert_eq!(renderer.render_default("layout")?, "child");

        renderer.clear_blocks();
        assert_eq!(renderer.render_default("layout")?, "default");

        Ok(())
    }

    #[test]
    fn test_single_inheritance() -> Result<(), Error> {
        let dir = templates(&["layout", "child"]);
        let handlers = Handlers::new()
            .handler("child", |scope| {
                scope.inherits("layout");
                scope.write("ignored");
                scope.set("title", "Child page")?;
                Ok(())
            })
            .handler("layout", |scope| {
                let title = scope.get("title").cloned().unwrap_or_default();
                scope.write("<title>").print(&title).write("</title>");
                Ok(())
            });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);
        assert_eq!(
            renderer.render_default("child")?,
            "<title>Child page</title>"
        );

        Ok(())
    }

    #[test]
    fn test_multi_level_inheritance() -> Result<(), Error> {
        let dir = templates(&["child", "a", "b"]);
        let handlers = Handlers::new()
            .handler("child", |scope| {
                scope.inherits("a");
                scope.set("from_child", 1)?;
                scope.write("child");
                Ok(())
            })
            .handler("a", |scope| {
                scope.inherits("b");
                scope.set("from_a", 2)?;
                scope.write("a");
                Ok(())
            })
            .handler("b", |scope| {
                let child = scope.get("from_child").cloned().unwrap_or_default();
                let a = scope.get("from_a").cloned().unwrap_or_default();
                scope.write(&format!("b:{}:{}", child, a));
                Ok(())
            });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);
        assert_eq!(renderer.render_default("child")?, "b:1:2");

        Ok(())
    }

    #[test]
    fn test_latest_declaration_renders_next() -> Result<(), Error> {
        let dir = templates(&["child", "first", "second"]);
        let executor = from_fn(|template: &Template, scope: &mut Scope<'_>| {
            if template.name() == "child" {
                scope.inherits("first").inherits("second");
            }
            scope.write(template.name());
            Ok(())
        });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), executor);

        // "second" renders, then "first" replaces it.
        assert_eq!(renderer.render_default("child")?, "first");

        Ok(())
    }

    #[test]
    fn test_missing_template() -> Result<(), Error> {
        let dir = templates(&["child"]);
        let handlers = Handlers::new().handler("child", |scope| {
            scope.inherits("missing-layout");
            scope.write("child");
            Ok(())
        });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);

        assert!(matches!(
            renderer.render_default("does-not-exist"),
            Err(Error::TemplateNotFound { ref template, .. }) if template == "does-not-exist"
        ));

        assert!(matches!(
            renderer.render_default("child"),
            Err(Error::TemplateNotFound { ref template, .. }) if template == "missing-layout"
        ));

        Ok(())
    }

    #[test]
    fn test_attributes_round_trip() -> Result<(), Error> {
        let dir = templates(&["page"]);
        let handlers = Handlers::new().handler("page", |scope| {
            scope.set("computed", 42)?;
            Ok(())
        });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);
        renderer.render("page", [("user", "lev")])?;

        assert_eq!(renderer.attribute("computed"), Some(Value::Integer(42)));
        assert_eq!(renderer.attributes().get("user"), Some(Value::String("lev".into())));

        Ok(())
    }

    #[test]
    fn test_data_wins_in_every_template() -> Result<(), Error> {
        let dir = templates(&["child", "layout"]);
        let handlers = Handlers::new()
            .handler("child", |scope| {
                scope.inherits("layout");
                scope.set("title", "from child")?;
                Ok(())
            })
            .handler("layout", |scope| {
                let title = scope.get("title").cloned().unwrap_or_default();
                scope.print(&title);
                Ok(())
            });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);
        assert_eq!(renderer.render("child", [("title", "from data")])?, "from data");

        Ok(())
    }

    #[test]
    fn test_unclosed_block() -> Result<(), Error> {
        let dir = templates(&["open", "ok"]);
        let handlers = Handlers::new()
            .handler("open", |scope| {
                scope.inherits("ok");
                scope.begin_block("content").write("never closed");
                Ok(())
            })
            .handler("ok", |scope| {
                scope.write("ok");
                Ok(())
            });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);

        assert!(matches!(
            renderer.render_default("open"),
            Err(Error::UnclosedBlock(ref name)) if name == "content"
        ));

        // Nothing is left over from the failed render.
        assert_eq!(renderer.render_default("ok")?, "ok");

        Ok(())
    }

    #[test]
    fn test_failed_render_drops_pending_parents() -> Result<(), Error> {
        let dir = templates(&["child", "layout", "plain"]);
        let executor = from_fn(|template: &Template, scope: &mut Scope<'_>| {
            if template.name() == "child" {
                scope.inherits("layout").inherits("missing");
            }
            scope.write(template.name());
            Ok(())
        });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), executor);

        assert!(matches!(
            renderer.render_default("child"),
            Err(Error::TemplateNotFound { ref template, .. }) if template == "missing"
        ));

        // "layout" was still queued when "missing" failed.
        assert_eq!(renderer.render_default("plain")?, "plain");

        Ok(())
    }

    #[test]
    fn test_default_from_config() {
        let renderer = Renderer::default();

        assert_eq!(renderer.extension(), "html");
        assert_eq!(renderer.path(), Path::new("templates"));
    }

    #[test]
    fn test_unbalanced_block() {
        let dir = templates(&["page"]);
        let handlers = Handlers::new().handler("page", |scope| {
            scope.end_block()?;
            Ok(())
        });

        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), handlers);
        assert!(matches!(
            renderer.render_default("page"),
            Err(Error::UnbalancedBlock)
        ));
    }

    #[test]
    fn test_no_handler() {
        let dir = templates(&["page"]);
        let mut renderer = Renderer::new(dir.path(), "html", Attributes::new(), Handlers::new());

        assert!(matches!(
            renderer.render_default("page"),
            Err(Error::NoHandler(ref name)) if name == "page"
        ));
    }

    #[test]
    fn test_accessors() -> Result<(), Error> {
        let mut renderer = Renderer::new("", "html", Attributes::new(), Handlers::new());
        renderer.set_path("views").set_extension("tpl");
        renderer.set_attribute("a", 1)?.set_attribute("b", true)?;
        renderer.remove_attribute("a");

        assert_eq!(renderer.path(), Path::new("views"));
        assert_eq!(renderer.extension(), "tpl");
        assert_eq!(renderer.attribute("a"), None);
        assert_eq!(renderer.attribute("b"), Some(Value::Boolean(true)));

        renderer.set_attributes(Attributes::new());
        assert!(renderer.attributes().is_empty());

        Ok(())
    }
}
