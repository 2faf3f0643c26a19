//! Persisted UI record for a cube control: which grids form the stack and
//! where the grid loader should look for them.
//!
//! JSON shape, as stored in the control's text attribute:
//! `{"Primary": ["/grids/a.json", "/grids/b.json"], "location": "scn"}`

use serde::{Deserialize, Serialize};

use crate::error::CubeError;

/// Storage location preference handed to the grid loader.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PreferredLocation {
    #[default]
    Scene,
    Project,
    User,
    /// Unrecognised tag, preserved verbatim for round-tripping.
    Other(String),
}

impl PreferredLocation {
    pub fn as_str(&self) -> &str {
        match self {
            PreferredLocation::Scene => "scn",
            PreferredLocation::Project => "prj",
            PreferredLocation::User => "usr",
            PreferredLocation::Other(tag) => tag,
        }
    }
}

impl From<String> for PreferredLocation {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "scn" => PreferredLocation::Scene,
            "prj" => PreferredLocation::Project,
            "usr" => PreferredLocation::User,
            _ => PreferredLocation::Other(tag),
        }
    }
}

impl From<PreferredLocation> for String {
    fn from(loc: PreferredLocation) -> Self {
        loc.as_str().to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CubeUiData {
    /// Stored grid references, ordered from w = 0 to w = 1.
    #[serde(rename = "Primary", default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub location: PreferredLocation,
}

impl CubeUiData {
    pub fn new(primary: Vec<String>, location: PreferredLocation) -> Self {
        Self { primary, location }
    }

    pub fn from_json(s: &str) -> Result<Self, CubeError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, CubeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Record a location change reported by the grid loader.
    pub fn with_location(mut self, location: PreferredLocation) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_record() {
        let data = CubeUiData::from_json(
            r#"{"Primary":["/scripts/test1.json","/scripts/test2.json"],"location":"scn"}"#,
        )
        .expect("parse ui data");
        assert_eq!(data.primary.len(), 2);
        assert_eq!(data.location, PreferredLocation::Scene);
    }

    #[test]
    fn unknown_location_round_trips() {
        let data = CubeUiData::from_json(r#"{"Primary":[],"location":"net"}"#).expect("parse");
        assert_eq!(data.location, PreferredLocation::Other("net".into()));
        let json = data.to_json().expect("serialize");
        assert!(json.contains(r#""location":"net""#), "{json}");
    }

    #[test]
    fn location_change_is_persisted() {
        let data = CubeUiData::new(vec!["a".into()], PreferredLocation::Scene)
            .with_location(PreferredLocation::Project);
        let json = data.to_json().expect("serialize");
        assert_eq!(json, r#"{"Primary":["a"],"location":"prj"}"#);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            CubeUiData::from_json("{not json"),
            Err(CubeError::UiData(_))
        ));
    }
}
