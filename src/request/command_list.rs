use std::fmt;
use std::mem;

use super::Request;

/// Ordered list of follow-up requests a handler wants cascaded.
///
/// Insertion order is dispatch order.
#[derive(Default)]
pub struct CommandList {
    commands: Vec<Box<dyn Request>>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a follow-up to the end of the list.
    pub fn push<R: Request>(&mut self, command: R) {
        self.commands.push(Box::new(command));
    }

    /// Append an already boxed follow-up.
    pub fn push_boxed(&mut self, command: Box<dyn Request>) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn Request>> {
        self.commands.iter()
    }

    /// Request type identifiers, in order.
    pub fn request_types(&self) -> Vec<&'static str> {
        self.iter().map(|c| c.request_type()).collect()
    }

    /// Move every entry out, leaving the list empty.
    pub fn take(&mut self) -> CommandList {
        CommandList {
            commands: mem::take(&mut self.commands),
        }
    }

}

impl fmt::Debug for CommandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.request_types()).finish()
    }
}

impl IntoIterator for CommandList {
    type Item = Box<dyn Request>;
    type IntoIter = std::vec::IntoIter<Box<dyn Request>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
