//! The character record shared by every data source and view.

use serde::{Deserialize, Deserializer, Serialize};

/// Seven-field ability profile. Values are meant to sit in `0..=100` but
/// nothing enforces that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub kick: i32,
    pub control: i32,
    pub technique: i32,
    pub pressure: i32,
    pub physical: i32,
    pub agility: i32,
    pub intelligence: i32,
}

impl StatBlock {
    pub fn total(&self) -> i32 {
        self.entries().iter().map(|(_, value)| value).sum()
    }

    /// Stats in display order.
    pub fn entries(&self) -> [(&'static str, i32); 7] {
        [
            ("Kick", self.kick),
            ("Control", self.control),
            ("Technique", self.technique),
            ("Pressure", self.pressure),
            ("Physical", self.physical),
            ("Agility", self.agility),
            ("Intelligence", self.intelligence),
        ]
    }
}

/// One catalog entry.
///
/// Records come out of a data source fully formed and are never mutated by
/// the views afterwards. Missing JSON fields fall back to empty values so a
/// single sparse entry cannot fail a whole page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub image_url: String,
    pub gender: String,
    pub element: String,
    pub position: String,
    pub team: String,
    pub stats: StatBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_to_obtain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_role: Option<String>,
}

impl CharacterRecord {
    pub fn element_kind(&self) -> ElementKind {
        ElementKind::classify(&self.element)
    }

    pub fn gender_kind(&self) -> GenderKind {
        GenderKind::classify(&self.gender)
    }

    /// Nickname when present, otherwise the name.
    pub fn display_nickname(&self) -> &str {
        if self.nickname.trim().is_empty() {
            &self.name
        } else {
            &self.nickname
        }
    }
}

// The backend emits numeric ids while the CSV carries strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
        Text(String),
        Missing(()),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(value) => value.to_string(),
        RawId::Float(value) => value.to_string(),
        RawId::Text(value) => value,
        RawId::Missing(()) => String::new(),
    })
}

/// Element affinity with the aliases used across data sets folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Fire,
    Wind,
    Wood,
    Earth,
    Void,
}

impl ElementKind {
    /// Unknown or empty labels land on `Void`.
    pub fn classify(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "fire" => ElementKind::Fire,
            "wind" => ElementKind::Wind,
            "wood" | "forest" => ElementKind::Wood,
            "earth" | "mountain" => ElementKind::Earth,
            _ => ElementKind::Void,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Fire => "Fire",
            ElementKind::Wind => "Wind",
            ElementKind::Wood => "Wood",
            ElementKind::Earth => "Earth",
            ElementKind::Void => "Void",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderKind {
    Male,
    Female,
    Other,
}

impl GenderKind {
    pub fn classify(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "male" => GenderKind::Male,
            "female" => GenderKind::Female,
            _ => GenderKind::Other,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            GenderKind::Male => "♂",
            GenderKind::Female => "♀",
            GenderKind::Other => "?",
        }
    }
}
