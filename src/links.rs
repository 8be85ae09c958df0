//! Terminal hyperlinks to content in the web UI.

use crate::model::ContentType;
use std::io::IsTerminal;

/// Web UI address of a piece of content.
pub fn content_url(base_url: &str, content_type: ContentType, id: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        content_type.path_segment(),
        id
    )
}

/// `#id`, wrapped in an OSC 8 hyperlink when `hyperlinks` is set.
pub fn content_reference(base_url: &str, content_type: ContentType, id: &str, hyperlinks: bool) -> String {
    if hyperlinks {
        format!(
            "\x1B]8;;{}\x1B\\#{}\x1B]8;;\x1B\\",
            content_url(base_url, content_type, id),
            id
        )
    } else {
        format!("#{}", id)
    }
}

/// Hyperlinks are only emitted when stdout is a terminal.
pub fn stdout_supports_hyperlinks() -> bool {
    std::io::stdout().is_terminal()
}
