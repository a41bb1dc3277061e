use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ToolError;
use crate::zone::{parse_zone, Zone};

/// Primitive type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Zone,
    Integer,
    String,
}

impl ParamType {
    fn expected(self) -> &'static str {
        match self {
            Self::Zone => "a zone name",
            Self::Integer => "an integer",
            Self::String => "a string",
        }
    }

    fn json_schema(self, description: &str) -> Value {
        match self {
            Self::Zone => json!({
                "type": "string",
                "enum": Zone::identifiers(),
                "description": description,
            }),
            Self::Integer => json!({ "type": "integer", "description": description }),
            Self::String => json!({ "type": "string", "description": description }),
        }
    }

    /// Coerce a raw JSON value into this type.
    fn coerce(self, name: &str, raw: &Value) -> Result<ArgValue, ToolError> {
        let mismatch = || ToolError::TypeCoercion {
            name: name.to_string(),
            expected: self.expected(),
            got: describe(raw),
        };

        match self {
            Self::Zone => match raw {
                Value::String(s) => parse_zone(s).map(ArgValue::Zone),
                _ => Err(mismatch()),
            },
            Self::Integer => match raw {
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Ok(ArgValue::Integer(i))
                    } else {
                        match n.as_f64() {
                            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                                Ok(ArgValue::Integer(f as i64))
                            }
                            _ => Err(mismatch()),
                        }
                    }
                }
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(ArgValue::Integer)
                    .map_err(|_| mismatch()),
                _ => Err(mismatch()),
            },
            Self::String => match raw {
                Value::String(s) => Ok(ArgValue::String(s.clone())),
                Value::Number(n) => Ok(ArgValue::String(n.to_string())),
                Value::Bool(b) => Ok(ArgValue::String(b.to_string())),
                _ => Err(mismatch()),
            },
        }
    }
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::Null => "null".into(),
        Value::Bool(_) => "a boolean".into(),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("'{s}'"),
        Value::Array(_) => "an array".into(),
        Value::Object(_) => "an object".into(),
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    pub description: String,
}

/// Everything the reasoning layer sees about a tool. Parameter order is
/// the declaration order and does not change after registration.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn param(
        mut self,
        name: impl Into<String>,
        kind: ParamType,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.push(ParamSpec {
            name: name.into(),
            kind,
            description: description.into(),
        });
        self
    }

    /// The LLM function definition: name, description, input_schema.
    pub fn schema(&self) -> Value {
        let mut properties = Map::new();
        for p in &self.parameters {
            properties.insert(p.name.clone(), p.kind.json_schema(&p.description));
        }
        let required: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();

        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    /// Validate a raw argument bag against the declared parameters.
    ///
    /// Parameters are checked in declaration order and the first failure
    /// wins. Undeclared keys are ignored. `null` counts as an empty bag.
    pub fn coerce(&self, input: &Value) -> Result<Args, ToolError> {
        let empty = Map::new();
        let bag = match input {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(match self.parameters.first() {
                    Some(p) => ToolError::TypeCoercion {
                        name: p.name.clone(),
                        expected: p.kind.expected(),
                        got: describe(other),
                    },
                    None => ToolError::TypeCoercion {
                        name: "arguments".into(),
                        expected: "an object",
                        got: describe(other),
                    },
                })
            }
        };

        let mut values = HashMap::with_capacity(self.parameters.len());
        for p in &self.parameters {
            let raw = bag
                .get(&p.name)
                .ok_or_else(|| ToolError::MissingParameter(p.name.clone()))?;
            values.insert(p.name.clone(), p.kind.coerce(&p.name, raw)?);
        }
        Ok(Args { values })
    }
}

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Zone(Zone),
    Integer(i64),
    String(String),
}

/// Validated, typed arguments for one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: HashMap<String, ArgValue>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn zone(&self, name: &str) -> Result<Zone, ToolError> {
        match self.get(name)? {
            ArgValue::Zone(z) => Ok(*z),
            other => Err(wrong_kind(name, ParamType::Zone, other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        match self.get(name)? {
            ArgValue::Integer(i) => Ok(*i),
            other => Err(wrong_kind(name, ParamType::Integer, other)),
        }
    }

    pub fn string(&self, name: &str) -> Result<&str, ToolError> {
        match self.get(name)? {
            ArgValue::String(s) => Ok(s),
            other => Err(wrong_kind(name, ParamType::String, other)),
        }
    }

    fn get(&self, name: &str) -> Result<&ArgValue, ToolError> {
        self.values
            .get(name)
            .ok_or_else(|| ToolError::MissingParameter(name.to_string()))
    }
}

fn wrong_kind(name: &str, wanted: ParamType, got: &ArgValue) -> ToolError {
    ToolError::TypeCoercion {
        name: name.to_string(),
        expected: wanted.expected(),
        got: format!("{got:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_temp_spec() -> ToolSpec {
        ToolSpec::new("set_temperature", "set temperature in a specific room")
            .param("zone", ParamType::Zone, "The specific zone")
            .param("temp", ParamType::Integer, "The temperature to set")
    }

    #[test]
    fn coerces_declared_parameters() {
        let args = set_temp_spec()
            .coerce(&json!({"zone": "office", "temp": 18}))
            .unwrap();
        assert_eq!(args.zone("zone").unwrap(), Zone::Office);
        assert_eq!(args.integer("temp").unwrap(), 18);
    }

    #[test]
    fn integer_accepts_numeric_strings_and_whole_floats() {
        let spec = set_temp_spec();
        let args = spec.coerce(&json!({"zone": "office", "temp": " -3 "})).unwrap();
        assert_eq!(args.integer("temp").unwrap(), -3);
        let args = spec.coerce(&json!({"zone": "office", "temp": 19.0})).unwrap();
        assert_eq!(args.integer("temp").unwrap(), 19);
    }

    #[test]
    fn integer_rejects_non_numeric() {
        let spec = set_temp_spec();
        for bad in [json!("warm"), json!(19.5), json!(true), json!(null), json!([1])] {
            let err = spec
                .coerce(&json!({"zone": "office", "temp": bad}))
                .unwrap_err();
            assert!(
                matches!(err, ToolError::TypeCoercion { ref name, .. } if name == "temp"),
                "{err}"
            );
        }
    }

    #[test]
    fn unknown_zone_is_invalid_zone() {
        let err = set_temp_spec()
            .coerce(&json!({"zone": "garage", "temp": 18}))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidZone(_)));
    }

    #[test]
    fn non_string_zone_is_type_error() {
        let err = set_temp_spec()
            .coerce(&json!({"zone": 3, "temp": 18}))
            .unwrap_err();
        assert!(matches!(err, ToolError::TypeCoercion { .. }));
    }

    #[test]
    fn missing_parameter_reported_in_declaration_order() {
        let err = set_temp_spec().coerce(&json!({})).unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(ref p) if p == "zone"));

        let err = set_temp_spec().coerce(&json!({"zone": "bedroom"})).unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(ref p) if p == "temp"));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let args = set_temp_spec()
            .coerce(&json!({"zone": "kitchen", "temp": 20, "unit": "C"}))
            .unwrap();
        assert_eq!(args.integer("temp").unwrap(), 20);
    }

    #[test]
    fn null_bag_is_empty_and_non_object_bag_is_rejected() {
        let no_params = ToolSpec::new("ping", "no parameters");
        assert!(no_params.coerce(&Value::Null).is_ok());
        assert!(no_params.coerce(&json!("oops")).is_err());

        let err = set_temp_spec().coerce(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ToolError::TypeCoercion { ref name, .. } if name == "zone"));
    }

    #[test]
    fn string_renders_scalars() {
        let spec = ToolSpec::new("echo", "echo").param("query", ParamType::String, "q");
        let args = spec.coerce(&json!({"query": 42})).unwrap();
        assert_eq!(args.string("query").unwrap(), "42");
        assert!(spec.coerce(&json!({"query": {"a": 1}})).is_err());
    }

    #[test]
    fn schema_lists_zone_enum_and_required() {
        let schema = set_temp_spec().schema();
        assert_eq!(schema["name"], "set_temperature");
        let zone = &schema["input_schema"]["properties"]["zone"];
        assert_eq!(zone["type"], "string");
        assert_eq!(zone["enum"].as_array().unwrap().len(), 5);
        assert_eq!(schema["input_schema"]["properties"]["temp"]["type"], "integer");
        assert_eq!(schema["input_schema"]["required"], json!(["zone", "temp"]));
    }

    #[test]
    fn spec_serializes_for_introspection() {
        let value = serde_json::to_value(set_temp_spec()).unwrap();
        assert_eq!(value["parameters"][0]["name"], "zone");
        assert_eq!(value["parameters"][0]["type"], "zone");
        assert_eq!(value["parameters"][1]["type"], "integer");
    }

    #[test]
    fn args_accessors_check_kind() {
        let args = Args::new().with("zone", ArgValue::Integer(1));
        assert!(matches!(args.zone("zone"), Err(ToolError::TypeCoercion { .. })));
        assert!(matches!(args.string("query"), Err(ToolError::MissingParameter(_))));
    }
}
