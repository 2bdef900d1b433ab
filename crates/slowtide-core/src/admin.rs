//! Debug overlay toggled with Ctrl+Shift+D.

use crate::config::ViewKind;

/// Values shown in the overlay, refreshed once a second while it is open.
#[derive(Clone, Debug, PartialEq)]
pub struct AdminSnapshot {
    pub session_running: bool,
    pub view: Option<ViewKind>,
    pub paused: bool,
    /// Audio context state as reported by the browser.
    pub audio_state: Option<String>,
    pub entity_count: usize,
}

impl AdminSnapshot {
    /// `(element id, text)` pairs for the overlay fields.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        let yes_no = |b: bool| if b { "Yes" } else { "No" }.to_string();
        [
            ("admin-session-status", yes_no(self.session_running)),
            (
                "admin-current-view",
                self.view.map_or("none", |v| v.as_str()).to_string(),
            ),
            ("admin-paused-status", yes_no(self.paused)),
            (
                "admin-audio-status",
                self.audio_state
                    .clone()
                    .unwrap_or_else(|| "Not Initialized".to_string()),
            ),
            ("admin-entities-count", self.entity_count.to_string()),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct AdminPanel {
    visible: bool,
    sunset_forced: bool,
}

impl AdminPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn sunset_forced(&self) -> bool {
        self.sunset_forced
    }

    /// Flip the forced sunset. Returns the overlay opacity to apply.
    pub fn toggle_sunset(&mut self) -> f64 {
        self.sunset_forced = !self.sunset_forced;
        if self.sunset_forced {
            1.0
        } else {
            0.0
        }
    }

    pub fn sunset_label(&self) -> &'static str {
        if self.sunset_forced {
            "Sunset ON"
        } else {
            "Sunset OFF"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_rows() {
        let snap = AdminSnapshot {
            session_running: true,
            view: Some(ViewKind::Marbles),
            paused: false,
            audio_state: None,
            entity_count: 50,
        };
        let rows = snap.rows();
        assert_eq!(rows[0].1, "Yes");
        assert_eq!(rows[1].1, "marbles");
        assert_eq!(rows[3].1, "Not Initialized");
        assert_eq!(rows[4].1, "50");
    }
}
