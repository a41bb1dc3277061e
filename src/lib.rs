pub mod config;
pub mod delegate;
pub mod dispatcher;
pub mod error;
pub mod state;
pub mod tools;
pub mod zone;

use serde_json::Value;
use tracing::info;

pub use config::AssistantConfig;
pub use delegate::{
    DelegateAnswer, DelegateClient, DelegateTopic, DelegateTransport, HttpTransport,
    TransportResponse, NO_ANSWER,
};
pub use dispatcher::{Dispatcher, Disposition, ToolOutcome};
pub use error::{ConfigError, DelegateError, ToolError};
pub use state::TemperatureStore;
pub use tools::{standard_registry, ToolHandler, ToolRegistry, ToolSpec};
pub use zone::{parse_zone, Zone};

/// The assistant's tool surface. Owns the temperature store and a
/// dispatcher over the seven built-in tools.
#[derive(Clone)]
pub struct Assistant {
    store: TemperatureStore,
    dispatcher: Dispatcher,
}

impl Assistant {
    /// Wire everything up with the HTTP delegate transport.
    pub fn new(config: AssistantConfig) -> Self {
        let transport = HttpTransport::new(config.delegate_timeout);
        Self::with_transport(config, transport)
    }

    /// Same as `new`, with a caller-supplied delegate transport. The
    /// configured delegate timeout bounds every call either way.
    pub fn with_transport(
        config: AssistantConfig,
        transport: impl DelegateTransport + 'static,
    ) -> Self {
        let client = config.endpoint_overrides.into_iter().fold(
            DelegateClient::new(transport)
                .with_max_query_chars(config.max_query_chars)
                .with_timeout(config.delegate_timeout),
            |client, (topic, url)| client.with_endpoint(topic, url),
        );

        let store = TemperatureStore::new();
        let dispatcher = Dispatcher::new(standard_registry(store.clone(), client));
        info!(tools = dispatcher.registry().len(), "assistant ready");

        Self { store, dispatcher }
    }

    /// Run a tool. Always returns text; failures start with `Error: `.
    pub async fn invoke(&self, name: &str, arguments: &Value) -> String {
        self.dispatcher.invoke(name, arguments).await
    }

    pub async fn dispatch(&self, name: &str, arguments: &Value) -> ToolOutcome {
        self.dispatcher.dispatch(name, arguments).await
    }

    pub fn catalog(&self) -> Vec<ToolSpec> {
        self.dispatcher.catalog()
    }

    /// LLM function schemas for every tool.
    pub fn schemas(&self) -> Vec<Value> {
        self.dispatcher.schemas()
    }

    pub fn store(&self) -> &TemperatureStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
