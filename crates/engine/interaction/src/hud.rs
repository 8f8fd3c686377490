//! On-screen text and panel sink
//!
//! Rendering lives outside this crate. The inspection controller only pushes
//! values into a [`Hud`] implementation.

/// Receiver of inspection UI updates
pub trait Hud {
    /// Replace the look-at prompt text (empty string hides it)
    fn set_prompt(&mut self, text: &str);

    /// Replace the item name and description fields
    fn set_item_text(&mut self, name: &str, description: &str);

    /// Show or hide the inspection panel
    fn set_panel_visible(&mut self, visible: bool);
}

/// Plain in-memory HUD, usable directly by a renderer or in tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudState {
    pub prompt: String,
    pub name: String,
    pub description: String,
    pub panel_visible: bool,
    /// Number of `set_panel_visible` calls received
    pub panel_updates: u32,
}

impl Hud for HudState {
    fn set_prompt(&mut self, text: &str) {
        self.prompt = text.to_string();
    }

    fn set_item_text(&mut self, name: &str, description: &str) {
        self.name = name.to_string();
        self.description = description.to_string();
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
        self.panel_updates += 1;
    }
}
