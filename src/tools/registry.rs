use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use super::handler::{ToolDef, ToolHandler};
use super::spec::ToolSpec;
use crate::error::ToolError;

/// Catalog of available tools. Built once, read-only afterwards.
/// Stores definitions, provides schemas, and looks up handlers by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool under `spec.name`. A second registration of the
    /// same name replaces the first in place.
    pub fn add(mut self, spec: ToolSpec, handler: impl ToolHandler + 'static) -> Self {
        let def = ToolDef {
            spec,
            handler: Arc::new(handler),
        };
        match self.tools.iter().position(|t| t.name() == def.name()) {
            Some(idx) => {
                warn!(tool = def.name(), "tool registered twice, replacing earlier definition");
                self.tools[idx] = def;
            }
            None => self.tools.push(def),
        }
        self
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Result<&ToolDef, ToolError> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// `{name, description, parameters}` for every tool, in registration order.
    pub fn catalog(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec.clone()).collect()
    }

    /// All tool schemas for the LLM API request.
    pub fn schemas(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.spec.schema()).collect()
    }

    /// Schema for a specific tool by name.
    pub fn schema(&self, name: &str) -> Option<Value> {
        self.get(name).ok().map(|t| t.spec.schema())
    }

    /// Search tools by query. Matches any whitespace-separated term against
    /// name and description. Returns compact `{name, description}` summaries.
    pub fn search(&self, query: &str) -> Vec<Value> {
        let query_lower = query.to_lowercase();
        let terms: Vec<&str> = query_lower.split_whitespace().collect();

        self.tools
            .iter()
            .filter(|t| {
                let haystack = format!(
                    "{} {}",
                    t.spec.name.to_lowercase(),
                    t.spec.description.to_lowercase()
                );
                terms.iter().any(|term| haystack.contains(term))
            })
            .map(|t| {
                json!({
                    "name": t.spec.name,
                    "description": t.spec.description,
                })
            })
            .collect()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolDef::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}
