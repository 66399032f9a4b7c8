//! Templates written as text files with Rwf tags.
//!
//! Text outside of tags is written to the output as-is. Tags map directly onto the
//! renderer's block and inheritance calls:
//!
//! ```html
//! <% inherits "layout" %>
//! <% set title = "Home" %>
//! <% begin_block "content" %>
//!   <h1>Hello, <%= user.name %></h1>
//! <% end_block %>
//! ```
//!
//! and the layout:
//!
//! ```html
//! <html>
//!   <head><title><%= block "title" title %></title></head>
//!   <body><%- block "content" "Nothing here yet" %></body>
//! </html>
//! ```
//!
//! `<%= %>` escapes HTML, `<%- %>` prints as-is. There are no loops or conditionals.
pub mod lexer;
pub mod program;
pub mod statement;
pub mod token;

pub use lexer::Lexer;
pub use program::Program;
pub use statement::{Expression, Statement, Term};
pub use token::{Token, TokenWithContext};

use super::Executor;
use crate::config::get_config;
use crate::{Error, Scope, Template};

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Directive interpreter.
///
/// Parsed programs are kept in memory when template caching is enabled,
/// so each file is only read and parsed once.
#[derive(Debug)]
pub struct Directives {
    cache_templates: bool,
    programs: Mutex<HashMap<PathBuf, Arc<Program>>>,
}

impl Default for Directives {
    fn default() -> Self {
        Self::new(get_config().view.cache_templates)
    }
}

impl Directives {
    pub fn new(cache_templates: bool) -> Self {
        Self {
            cache_templates,
            programs: Mutex::new(HashMap::new()),
        }
    }

    /// Get the program for a template file, reading and parsing it if needed.
    pub fn program(&self, path: impl AsRef<Path>) -> Result<Arc<Program>, Error> {
        let path = path.as_ref();

        if let Some(program) = self.programs.lock().get(path) {
            return Ok(program.clone());
        }

        let source = read_to_string(path)?;
        let program = Arc::new(Program::from_str(&source)?);
        debug!("parsed \"{}\"", path.display());

        if self.cache_templates {
            self.programs
                .lock()
                .insert(path.to_owned(), program.clone());
        }

        Ok(program)
    }

    /// Forget all parsed programs.
    pub fn clear(&self) {
        self.programs.lock().clear();
    }

    pub fn cached(&self) -> usize {
        self.programs.lock().len()
    }
}

impl Executor for Directives {
    fn execute(&self, template: &Template, scope: &mut Scope<'_>) -> Result<(), Error> {
        self.program(template.path())?.execute(scope)
    }
}
