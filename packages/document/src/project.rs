//! The playground project: exactly one buffer per language, seeded with
//! non-empty placeholder documents for first launch.

use crate::{Buffer, Language};

pub const SEED_HTML: &str = r#"<h1>Welcome to Scratchpad</h1>
<p>Edit the HTML, CSS, and JavaScript panes to see the preview update.</p>
<button id="demo-button">Try me</button>"#;

pub const SEED_CSS: &str = r#"body {
  font-family: sans-serif;
  margin: 2rem;
  background-color: #fafafa;
  color: #222;
}

h1 {
  color: #4658a5;
}

button {
  padding: 8px 14px;
  border: none;
  border-radius: 4px;
  background-color: #4658a5;
  color: white;
  cursor: pointer;
}

button:hover {
  background-color: #37477f;
}"#;

pub const SEED_JS: &str = r#"const button = document.getElementById('demo-button');
button.addEventListener('click', () => {
  alert('Hello from Scratchpad!');
});
console.log('Scratchpad ready');"#;

/// The three playground buffers
#[derive(Debug, Clone)]
pub struct Project {
    html: Buffer,
    css: Buffer,
    js: Buffer,
}

impl Project {
    /// Project holding the placeholder documents shown on first launch
    pub fn seeded() -> Self {
        Self::with_sources(SEED_HTML, SEED_CSS, SEED_JS)
    }

    pub fn with_sources(
        html: impl Into<String>,
        css: impl Into<String>,
        js: impl Into<String>,
    ) -> Self {
        Self {
            html: Buffer::new(Language::Html, html),
            css: Buffer::new(Language::Css, css),
            js: Buffer::new(Language::Javascript, js),
        }
    }

    pub fn buffer(&self, language: Language) -> &Buffer {
        match language {
            Language::Html => &self.html,
            Language::Css => &self.css,
            Language::Javascript => &self.js,
        }
    }

    pub fn buffer_mut(&mut self, language: Language) -> &mut Buffer {
        match language {
            Language::Html => &mut self.html,
            Language::Css => &mut self.css,
            Language::Javascript => &mut self.js,
        }
    }

    /// Seed source for a language, the authoritative default when nothing
    /// was persisted.
    pub fn seed(language: Language) -> &'static str {
        match language {
            Language::Html => SEED_HTML,
            Language::Css => SEED_CSS,
            Language::Javascript => SEED_JS,
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::seeded()
    }
}
