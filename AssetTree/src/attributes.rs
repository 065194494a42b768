//! Node attribute bags
//!
//! An attribute bag is an open record: the fields the engine and its
//! consumers rely on are typed, everything else the caller supplied is kept
//! in [`Attributes::extra`] in source order.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Classification of a node, supplied by the caller when registering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Location,
    Asset,
    Component,
    /// Any value the engine does not know about.
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Location => "Location",
            NodeKind::Asset => "Asset",
            NodeKind::Component => "Component",
            NodeKind::Unknown => "Unknown",
        }
    }
}

/// Operating status reported for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Operating,
    Alert,
    /// Any value the engine does not know about.
    #[serde(other)]
    Unknown,
}

impl AssetStatus {
    /// Parse a user-supplied status name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "operating" => Some(AssetStatus::Operating),
            "alert" => Some(AssetStatus::Alert),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Operating => "operating",
            AssetStatus::Alert => "alert",
            AssetStatus::Unknown => "unknown",
        }
    }
}

/// Kind of sensor attached to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Energy,
    Vibration,
    /// Any value the engine does not know about.
    #[serde(other)]
    Unknown,
}

impl SensorType {
    /// Parse a user-supplied sensor type name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "energy" => Some(SensorType::Energy),
            "vibration" => Some(SensorType::Vibration),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SensorType::Energy => "energy",
            SensorType::Vibration => "vibration",
            SensorType::Unknown => "unknown",
        }
    }
}

/// The attribute bag stored for every registered node.
///
/// Serialized with the caller's field names (`parentId`, `type`,
/// `sensorType`, ...). Absent fields are omitted rather than written as null.
///
/// Loading never rejects a bag over a known field's value: numbers and
/// booleans in string fields are kept in their JSON text form, and values
/// that cannot be read as the field's type are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    /// Display name, also the sort key among siblings.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier of the parent node, if any.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Node classification.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<NodeKind>,
    #[serde(default, deserialize_with = "lenient_enum", skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(default, deserialize_with = "lenient_enum", skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<SensorType>,
    /// Present on components only.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
    /// Caller-defined fields not covered above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attributes {
    /// Bag with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_sensor_type(mut self, sensor_type: SensorType) -> Self {
        self.sensor_type = Some(sensor_type);
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The parent identifier, treating an empty string as no parent.
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The sensor identifier, treating an empty string as no sensor.
    pub fn sensor(&self) -> Option<&str> {
        self.sensor_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The name used for display and sorting.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// True for a placeholder bag with no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.parent_id.is_none()
            && self.kind.is_none()
            && self.status.is_none()
            && self.sensor_type.is_none()
            && self.sensor_id.is_none()
            && self.extra.is_empty()
    }
}

/// Strings as-is, numbers and booleans as their JSON text, anything else absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}
