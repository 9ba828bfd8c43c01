use serde::{Deserialize, Serialize};

/// Languages editable in the playground, one buffer each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    Javascript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Html, Language::Css, Language::Javascript];

    /// Canonical wire name, matching the completion service contract
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Css => "css",
            Language::Javascript => "javascript",
        }
    }

    /// Fixed persistence key for this buffer
    pub fn storage_key(&self) -> &'static str {
        match self {
            Language::Html => "scratchpad_html",
            Language::Css => "scratchpad_css",
            Language::Javascript => "scratchpad_js",
        }
    }

    /// Human-readable pane label
    pub fn label(&self) -> &'static str {
        match self {
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Javascript => "JavaScript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
