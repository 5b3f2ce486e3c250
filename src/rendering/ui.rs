//! # User Interface Elements
//!
//! Status bar, help text and the intro banner, laid out as plain lines so
//! every display sink renders the same text.

use crate::rendering::RenderFrame;

/// Key help shown under the map.
pub const CONTROLS_LINE: &str = "Controls: W/A/S/D move  F toggle flashlight  Q quit";

/// Reminder shown under the controls.
pub const TAGLINE: &str = "Explore the map. Be careful of the thing that wanders the dark...";

/// Banner shown before the first frame.
pub const INTRO_LINES: [&str; 3] = [
    "=== DIMLIGHT ===",
    "You are trapped in the yard of an old church. Find the truth, or run...",
    "Press any key to begin...",
];

/// One bar segment per two battery steps.
///
/// # Examples
///
/// ```
/// use dimlight::battery_bar;
///
/// assert_eq!(battery_bar(7), "|||");
/// assert_eq!(battery_bar(0), "");
/// ```
pub fn battery_bar(battery: u32) -> String {
    "|".repeat((battery / 2) as usize)
}

/// The battery and flashlight line.
pub fn status_line(frame: &RenderFrame) -> String {
    format!(
        "Battery: {} ({})   Flashlight: {}",
        battery_bar(frame.battery),
        frame.battery,
        if frame.flashlight_on { "ON" } else { "OFF" }
    )
}

/// The full screen as text: map, status, help, then messages.
pub fn frame_lines(frame: &RenderFrame) -> Vec<String> {
    let mut lines = frame.map_lines();
    lines.push(String::new());
    lines.push(status_line(frame));
    lines.push(CONTROLS_LINE.to_string());
    lines.push(TAGLINE.to_string());
    if !frame.messages.is_empty() {
        lines.push(String::new());
        lines.extend(frame.messages.iter().cloned());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::Symbol;

    fn frame(battery: u32, flashlight_on: bool, messages: Vec<String>) -> RenderFrame {
        RenderFrame {
            symbols: vec![vec![Symbol::Wall, Symbol::Player, Symbol::Unknown]],
            battery,
            max_battery: 40,
            flashlight_on,
            messages,
        }
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line(&frame(40, true, Vec::new())),
            "Battery: |||||||||||||||||||| (40)   Flashlight: ON"
        );
        assert_eq!(
            status_line(&frame(1, false, Vec::new())),
            "Battery:  (1)   Flashlight: OFF"
        );
    }

    #[test]
    fn test_frame_lines_layout() {
        let lines = frame_lines(&frame(4, false, vec!["A cold wind passes.".to_string()]));
        assert_eq!(lines[0], "#@ ");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("Battery: || (4)"));
        assert_eq!(lines[3], CONTROLS_LINE);
        assert_eq!(lines.last().unwrap(), "A cold wind passes.");
    }

    #[test]
    fn test_frame_lines_without_messages() {
        let lines = frame_lines(&frame(4, false, Vec::new()));
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], TAGLINE);
    }
}
