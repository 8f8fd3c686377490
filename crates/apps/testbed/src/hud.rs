//! HUD that records every change it receives
//!
//! Stands in for on-screen text. Each change is logged and kept with the
//! tick it happened on, so a run can be inspected afterwards.

use interaction::{Hud, HudState};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudEvent {
    Prompt(String),
    ItemText { name: String, description: String },
    Panel(bool),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingHud {
    state: HudState,
    events: Vec<(u64, HudEvent)>,
    tick: u64,
}

impl RecordingHud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick number stamped on subsequent events
    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    pub fn state(&self) -> &HudState {
        &self.state
    }

    pub fn events(&self) -> &[(u64, HudEvent)] {
        &self.events
    }

    fn record(&mut self, event: HudEvent) {
        self.events.push((self.tick, event));
    }
}

impl Hud for RecordingHud {
    fn set_prompt(&mut self, text: &str) {
        // Prompt is pushed every tick; only changes are interesting
        if self.state.prompt == text {
            return;
        }
        info!(tick = self.tick, prompt = %text.replace('\n', " "), "prompt");
        self.state.set_prompt(text);
        self.record(HudEvent::Prompt(text.to_string()));
    }

    fn set_item_text(&mut self, name: &str, description: &str) {
        info!(tick = self.tick, name, description, "item text");
        self.state.set_item_text(name, description);
        self.record(HudEvent::ItemText {
            name: name.to_string(),
            description: description.to_string(),
        });
    }

    fn set_panel_visible(&mut self, visible: bool) {
        info!(tick = self.tick, visible, "panel");
        self.state.set_panel_visible(visible);
        self.record(HudEvent::Panel(visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_changes_only() {
        let mut hud = RecordingHud::new();
        hud.set_tick(3);
        hud.set_prompt("[E]\nvase");
        hud.set_prompt("[E]\nvase");
        hud.set_tick(4);
        hud.set_panel_visible(true);
        hud.set_item_text("Vase", "Old");

        assert_eq!(
            hud.events(),
            &[
                (3, HudEvent::Prompt("[E]\nvase".to_string())),
                (4, HudEvent::Panel(true)),
                (
                    4,
                    HudEvent::ItemText {
                        name: "Vase".to_string(),
                        description: "Old".to_string()
                    }
                ),
            ]
        );
        assert!(hud.state().panel_visible);
        assert_eq!(hud.state().panel_updates, 1);
    }
}
