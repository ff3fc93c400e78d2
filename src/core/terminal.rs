//! Color auto-detection

use super::features::Features;
use super::sink::SinkSlot;

/// Whether a `$TERM` value names a terminal that understands ANSI colors
pub fn term_supports_color(term: &str) -> bool {
    term.contains("xterm") || term.contains("vt100") || term.contains("color")
}

/// `feats` plus `COLOR` when the sink is a terminal and `$TERM` supports color
pub(crate) fn with_auto_color(sink: &SinkSlot, feats: Features) -> Features {
    if !sink.is_terminal() {
        return feats;
    }
    match std::env::var("TERM") {
        Ok(term) if term_supports_color(&term) => feats | Features::COLOR,
        _ => feats,
    }
}
