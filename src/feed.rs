use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Identifier of the tracked side.
    pub team: String,
    pub opponent: String,
    /// Whether the tracked side played at home.
    #[serde(default)]
    pub home: bool,
    pub date: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(default, deserialize_with = "prediction_map")]
    pub predictions: HashMap<String, String>,
}

impl Participant {
    pub fn prediction_for(&self, match_id: &str) -> Option<&str> {
        self.predictions
            .get(match_id)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub teams: HashMap<String, Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default, rename = "guesses")]
    pub participants: Vec<Participant>,
}

impl Feed {
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.get(id)
    }

    /// Team entry for `id`, or a bare entry named after the identifier when the
    /// mapping has no such team.
    pub fn team_or_fallback(&self, id: &str) -> Team {
        self.team(id).cloned().unwrap_or_else(|| Team {
            name: id.to_string(),
            logo: String::new(),
        })
    }
}

pub fn parse_feed_json(raw: &str) -> Result<Feed> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty feed document"));
    }
    serde_json::from_str::<Feed>(trimmed).context("invalid feed json")
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

// The feed writes a missing result as JSON null, an absent key, or the string "null".
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "null"))
}

// Null or non-text entries count as "no prediction" rather than failing the feed.
fn prediction_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(id, value)| match value {
            Value::String(p) if !p.trim().is_empty() => Some((id, p)),
            _ => None,
        })
        .collect())
}
