//! Tech stack normalization.

use serde::{Deserialize, Serialize};

/// Tech stack as submitted by a client: either `"React, Express"` or `["React", "Express"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TechStackInput {
    Text(String),
    List(Vec<String>),
}

/// Normalized tech stack: trimmed, non-empty entries in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechStack(Vec<String>);

impl TechStack {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render for humans (and prompts) as `"React, Express"`.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl From<TechStackInput> for TechStack {
    fn from(input: TechStackInput) -> Self {
        let entries = match input {
            TechStackInput::Text(text) => text.split(',').map(str::to_owned).collect(),
            TechStackInput::List(list) => list,
        };
        entries.into_iter().collect()
    }
}

impl FromIterator<String> for TechStack {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}
