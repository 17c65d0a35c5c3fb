use super::Pair;
use serde::{Deserialize, Serialize};

/// An organization, the gateway's notion of a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
    #[serde(default, with = "properties", skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Pair>,
}

impl Organization {
    pub fn property(&self, name: &str) -> Option<&str> {
        super::attribute(&self.properties, name)
    }
}

/// Organization properties arrive wrapped as `{"property": [...]}`.
mod properties {
    use super::Pair;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Envelope {
        #[serde(default)]
        property: Vec<Pair>,
    }

    pub fn serialize<S: Serializer>(value: &[Pair], serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            property: value.to_vec(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Pair>, D::Error> {
        Ok(Envelope::deserialize(deserializer)?.property)
    }
}
