use serde::{Deserialize, Serialize};

/// The person taking the challenges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub name: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        let mut player = Self::default();
        player.set_name(name);
        player
    }

    /// Blank names clear the player.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let trimmed = name.trim();
        self.name = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown entity")
    }

    pub fn greeting(&self) -> String {
        format!("Welcome {}", self.display_name())
    }
}
