//! The assistant's fixed tool set: two temperature tools backed by the
//! `TemperatureStore`, and one delegate tool per `DelegateTopic`.

use async_trait::async_trait;
use tracing::info;

use super::handler::ToolHandler;
use super::registry::ToolRegistry;
use super::spec::{Args, ParamType, ToolSpec};
use crate::delegate::{DelegateClient, DelegateTopic};
use crate::error::ToolError;
use crate::state::TemperatureStore;

pub const GET_TEMPERATURE: &str = "get_temperature";
pub const SET_TEMPERATURE: &str = "set_temperature";

fn zone_param(spec: ToolSpec) -> ToolSpec {
    spec.param("zone", ParamType::Zone, "The specific zone")
}

pub fn get_temperature_spec() -> ToolSpec {
    zone_param(ToolSpec::new(
        GET_TEMPERATURE,
        "get the temperature in a specific room",
    ))
}

pub fn set_temperature_spec() -> ToolSpec {
    zone_param(ToolSpec::new(
        SET_TEMPERATURE,
        "set temperature in a specific room",
    ))
    .param("temp", ParamType::Integer, "The temperature to set")
}

pub fn delegate_spec(topic: DelegateTopic) -> ToolSpec {
    ToolSpec::new(topic.tool_name(), topic.description()).param(
        "query",
        ParamType::String,
        topic.query_description(),
    )
}

pub struct GetTemperature {
    store: TemperatureStore,
}

impl GetTemperature {
    pub fn new(store: TemperatureStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolHandler for GetTemperature {
    async fn call(&self, args: &Args) -> Result<String, ToolError> {
        let zone = args.zone("zone")?;
        let temp = self.store.get(zone).await;
        info!(zone = %zone, temp, "read temperature");
        Ok(format!("The temperature in the {zone} is {temp}C"))
    }
}

pub struct SetTemperature {
    store: TemperatureStore,
}

impl SetTemperature {
    pub fn new(store: TemperatureStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolHandler for SetTemperature {
    async fn call(&self, args: &Args) -> Result<String, ToolError> {
        let zone = args.zone("zone")?;
        let temp = args.integer("temp")?;
        let (before, after) = self.store.set(zone, temp).await;
        info!(zone = %zone, before, after, "set temperature");
        Ok(format!("The temperature in the {zone} is now {after}C"))
    }
}

/// Forwards `query` to one topic's delegate. The store lock is never
/// involved, so a slow delegate cannot stall temperature calls.
pub struct DelegateTool {
    topic: DelegateTopic,
    client: DelegateClient,
}

impl DelegateTool {
    pub fn new(topic: DelegateTopic, client: DelegateClient) -> Self {
        Self { topic, client }
    }
}

#[async_trait]
impl ToolHandler for DelegateTool {
    async fn call(&self, args: &Args) -> Result<String, ToolError> {
        let query = args.string("query")?;
        Ok(self.client.ask(self.topic, query).await.into_result()?)
    }
}

/// The seven-tool catalog.
pub fn standard_registry(store: TemperatureStore, client: DelegateClient) -> ToolRegistry {
    let registry = ToolRegistry::new()
        .add(get_temperature_spec(), GetTemperature::new(store.clone()))
        .add(set_temperature_spec(), SetTemperature::new(store));

    DelegateTopic::ALL.into_iter().fold(registry, |registry, topic| {
        registry.add(delegate_spec(topic), DelegateTool::new(topic, client.clone()))
    })
}
