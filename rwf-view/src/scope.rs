//! The handle a template body executes against.
//!
//! A scope holds the template's local variables, the renderer's attributes with the render
//! data on top, and forwards output and the block and inheritance calls to the renderer.
//! Locals are merged back into the renderer's attributes once the template returns,
//! so assigning a variable with [`Scope::set`] makes it visible to parent layouts and
//! later renders.
use crate::state::State;
use crate::{safe_html, Error, Template, ToValue, Value};

use std::collections::HashMap;
use std::path::Path;

pub struct Scope<'a> {
    template: &'a Template,
    state: &'a mut State,
    locals: HashMap<String, Value>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        template: &'a Template,
        state: &'a mut State,
        locals: HashMap<String, Value>,
    ) -> Self {
        Self {
            template,
            state,
            locals,
        }
    }

    pub(crate) fn into_locals(self) -> HashMap<String, Value> {
        self.locals
    }

    /// The template being executed.
    pub fn template(&self) -> &Template {
        self.template
    }

    pub fn path(&self) -> &Path {
        self.template.path()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }

    /// All variables in scope.
    pub fn vars(&self) -> &HashMap<String, Value> {
        &self.locals
    }

    /// Assign a variable.
    pub fn set(&mut self, name: &str, value: impl ToValue) -> Result<&mut Self, Error> {
        self.locals.insert(name.to_string(), value.to_value()?);
        Ok(self)
    }

    /// Write text to the output as-is.
    pub fn write(&mut self, text: &str) -> &mut Self {
        self.state.write(text);
        self
    }

    /// Write a value to the output, escaping HTML.
    pub fn print(&mut self, value: &Value) -> &mut Self {
        self.state.write(&safe_html(&value.to_string()));
        self
    }

    /// Register a parent template rendered once this one returns.
    pub fn inherits(&mut self, template: &str) -> &mut Self {
        self.state.inherits(template);
        self
    }

    /// Start capturing output into a block.
    pub fn begin_block(&mut self, name: &str) -> &mut Self {
        self.state.begin_block(name);
        self
    }

    /// Stop capturing the innermost block. Returns whatever is stored for the block,
    /// which is also written to the output.
    pub fn end_block(&mut self) -> Result<String, Error> {
        self.state.end_block()
    }

    /// Captured block, without capturing anything.
    pub fn block(&self, name: &str) -> Option<&str> {
        self.state.block(name)
    }

    pub fn block_or(&self, name: &str, default: &str) -> String {
        self.block(name).unwrap_or(default).to_string()
    }
}

impl std::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("template", &self.template)
            .field("locals", &self.locals)
            .finish()
    }
}
