pub mod builtin;
pub mod handler;
pub mod registry;
pub mod spec;

pub use builtin::standard_registry;
pub use handler::{ToolDef, ToolHandler};
pub use registry::ToolRegistry;
pub use spec::{ArgValue, Args, ParamSpec, ParamType, ToolSpec};
