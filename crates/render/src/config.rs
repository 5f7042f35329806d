use std::sync::Arc;

/// Renderer options.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Tag of the descriptor synthesized for pending values.
    pub await_kind: Arc<str>,
    /// Truncate the debug text of malformed values to this many characters.
    /// `None` keeps the full serialization.
    pub malformed_preview_chars: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            await_kind: Arc::from("await"),
            malformed_preview_chars: None,
        }
    }
}

impl RenderConfig {
    pub(crate) fn malformed_text(&self, json: String) -> String {
        match self.malformed_preview_chars {
            Some(max) if json.chars().count() > max => {
                let mut out: String = json.chars().take(max).collect();
                out.push('…');
                out
            }
            _ => json,
        }
    }
}
