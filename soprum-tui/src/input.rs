use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.all_costs_for_user`(...)
    ReloadCosts,
    /// Run `service.comparison`(...) for the highlighted property
    OpenComparison,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Right, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::PropertyList => match key.code {
            Up | Char('k') => {
                if app.list_index > 0 {
                    app.list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.list_index + 1 < app.costs.len() {
                    app.list_index += 1;
                }
            }
            Enter | Right | Char(' ') => {
                action = Action::OpenComparison;
            }
            Char('r') => {
                action = Action::ReloadCosts;
            }
            _ => {}
        },

        Screen::ComparisonView => match key.code {
            Left | Esc | Char('b') => {
                app.back_to_list();
            }
            _ => {}
        },
    }
    action
}
