// src/data.rs
//
// Canonical records shared by the fetch pipeline, the store and the transforms.
// Field names match the JSON files the site reads; every field defaults so a
// hand-edited file with gaps still loads.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub title: String,
    /// ISO-ish, format depends on the upstream.
    pub date: String,
    pub time: String,
    pub location: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// On-disk shape of `events.json`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsFile {
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub title: String,
    pub date: String,
    pub summary: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardMember {
    pub name: String,
    pub initials: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cohort {
    Current,
    Distinguished,
    Faculty,
}

impl Cohort {
    pub const ALL: [Cohort; 3] = [Cohort::Current, Cohort::Distinguished, Cohort::Faculty];

    pub fn title(self) -> &'static str {
        match self {
            Cohort::Current => "Current board",
            Cohort::Distinguished => "Distinguished members",
            Cohort::Faculty => "Faculty",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    pub current: Vec<BoardMember>,
    pub distinguished: Vec<BoardMember>,
    pub faculty: Vec<BoardMember>,
}

impl Board {
    pub fn cohort(&self, c: Cohort) -> &[BoardMember] {
        match c {
            Cohort::Current => &self.current,
            Cohort::Distinguished => &self.distinguished,
            Cohort::Faculty => &self.faculty,
        }
    }
}
