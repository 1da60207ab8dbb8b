use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Commands that can be issued from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabletCommand {
    /// Quit the application
    Quit,
    /// Focus the previous device surface
    PreviousDevice,
    /// Focus the next device surface
    NextDevice,
    /// No action
    None,
}

/// Map a key press to a command; releases and unbound keys do nothing.
pub fn command_for_key(key: KeyEvent) -> TabletCommand {
    if key.kind == KeyEventKind::Release {
        return TabletCommand::None;
    }

    match key.code {
        KeyCode::Char('q') if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            TabletCommand::Quit
        }
        KeyCode::Left => TabletCommand::PreviousDevice,
        KeyCode::Right => TabletCommand::NextDevice,
        _ => TabletCommand::None,
    }
}
