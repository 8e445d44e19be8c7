use std::collections::HashMap;

use nexus_model::ModelTool;

use crate::tool::{AnyTool, Tool, ToolObject};

/// A fixed mapping from tool name to callable tool.
///
/// The registry is populated once at process start and is read-only
/// afterwards; all in-flight requests share it without locking.
#[derive(Default)]
pub struct Registry {
    tools: HashMap<String, Box<dyn ToolObject>>,
}

impl Registry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a tool under its own name.
    #[inline]
    pub fn register<T: Tool>(mut self, tool: T) -> Self {
        let name = tool.name().to_owned();
        self.tools.insert(name, Box::new(AnyTool(tool)));
        self
    }

    /// Returns the definitions of all registered tools.
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.tools
            .values()
            .map(|tool| ModelTool {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&dyn ToolObject> {
        self.tools.get(name).map(Box::as_ref)
    }
}
