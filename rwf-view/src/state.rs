//! Render state shared by every template a renderer executes.
//!
//! Output goes to the buffer on top of the stack. The root buffer belongs to
//! the render call, every other buffer belongs to an open block.
use crate::{Attributes, Error};

use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct Buffer {
    block: Option<String>,
    text: String,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) attributes: Attributes,
    pub(crate) blocks: HashMap<String, String>,
    pub(crate) inherits: Vec<String>,
    buffers: Vec<Buffer>,
}

impl State {
    pub(crate) fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Default::default()
        }
    }

    /// Open the root buffer for a render.
    pub(crate) fn open(&mut self) {
        self.buffers.push(Buffer::default());
    }

    /// Close the root buffer and take its output.
    pub(crate) fn close(&mut self) -> Result<String, Error> {
        if let Some(name) = self.open_block() {
            return Err(Error::UnclosedBlock(name.to_string()));
        }

        Ok(self.buffers.pop().map(|buffer| buffer.text).unwrap_or_default())
    }

    /// Discard everything written to the root buffer so far.
    pub(crate) fn clear(&mut self) {
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.text.clear();
        }
    }

    /// Drop all buffers and pending parents after a failed render.
    pub(crate) fn reset(&mut self) {
        self.buffers.clear();
        self.inherits.clear();
    }

    pub(crate) fn write(&mut self, text: &str) {
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.text.push_str(text);
        }
    }

    /// Name of the innermost block that's still open.
    pub(crate) fn open_block(&self) -> Option<&str> {
        self.buffers.last().and_then(|buffer| buffer.block.as_deref())
    }

    pub(crate) fn begin_block(&mut self, name: &str) {
        self.buffers.push(Buffer {
            block: Some(name.to_string()),
            text: String::new(),
        });
    }

    /// Close the innermost block. The first capture of a name is kept, and
    /// whatever is stored under the name is written in place of the block.
    pub(crate) fn end_block(&mut self) -> Result<String, Error> {
        let (name, text) = match self.buffers.pop() {
            Some(Buffer {
                block: Some(name),
                text,
            }) => (name, text),
            Some(root) => {
                self.buffers.push(root);
                return Err(Error::UnbalancedBlock);
            }
            None => return Err(Error::UnbalancedBlock),
        };

        let stored = match self.blocks.get(&name) {
            Some(stored) => {
                debug!("block \"{}\" already captured, replaying", name);
                stored.clone()
            }
            None => {
                debug!("captured block \"{}\" ({} bytes)", name, text.len());
                self.blocks.insert(name, text.clone());
                text
            }
        };

        self.write(&stored);

        Ok(stored)
    }

    pub(crate) fn block(&self, name: &str) -> Option<&str> {
        self.blocks.get(name).map(|block| block.as_str())
    }

    pub(crate) fn inherits(&mut self, name: &str) {
        self.inherits.push(name.to_string());
    }
}
