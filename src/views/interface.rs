//! The composed interface view.

use super::explorer::render_explorer;
use super::working_set::{render_notifications, render_working_set};
use crate::interface::Interface;
use crate::store::Store;
use crate::types::TAB;
use serde::{Deserialize, Serialize};

/// Which components an interface view carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// `<opened>` only.
    WorkingSet,
    /// Explorer, opened notes and notifications.
    Full,
    /// As `Full`, with note-to-note references shown on every opened note.
    Tie,
}

impl ViewMode {
    fn components(self) -> &'static [Component] {
        match self {
            ViewMode::WorkingSet => &[Component::Opened],
            ViewMode::Full | ViewMode::Tie => {
                &[Component::Explorer, Component::Opened, Component::Notifications]
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Component {
    Explorer,
    Opened,
    Notifications,
}

impl Component {
    fn tag(self) -> &'static str {
        match self {
            Component::Explorer => "explorer",
            Component::Opened => "opened",
            Component::Notifications => "notifications",
        }
    }
}

/// Render `interface` within `max_length`. Components are rendered in order,
/// each with whatever budget the previous ones left.
pub fn render_interface(
    store: &Store,
    interface: &Interface,
    mode: ViewMode,
    max_length: usize,
    schema_priority: f64,
) -> String {
    let inner = TAB.repeat(2);
    let mut room_left = max_length;
    let mut out = String::from("<interface>\n");

    for component in mode.components() {
        let body = match component {
            Component::Explorer => {
                let rendered =
                    render_explorer(store, interface.explorer(), room_left, schema_priority, &inner);
                // The explorer body already ends with a newline.
                rendered.trim_end_matches('\n').to_string()
            }
            Component::Opened => render_working_set(
                store,
                interface.opened(),
                room_left,
                &inner,
                mode == ViewMode::Tie,
            ),
            Component::Notifications => {
                render_notifications(interface.notifications(), room_left, &inner)
            }
        };
        room_left = room_left.saturating_sub(body.len());

        let tag = component.tag();
        out.push_str(&format!("{}<{}>\n", TAB, tag));
        if !body.is_empty() {
            out.push_str(&body);
            out.push('\n');
        }
        out.push_str(&format!("{}</{}>\n", TAB, tag));
    }

    out.push_str("</interface>");
    out
}
