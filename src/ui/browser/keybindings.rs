//! Key to action mapping.
//!
//! Mapping is a pure function of the key and the current state, so the
//! event loop stays free of view-specific branching.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::FilterField;
use crate::core::app::{ActiveView, App, AppAction};

pub fn actions_for_key(app: &App, key: KeyEvent) -> Vec<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return vec![AppAction::Quit];
    }

    if app.detail.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => vec![AppAction::DismissDetail],
            _ => Vec::new(),
        };
    }

    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        return vec![AppAction::SwitchView];
    }

    match app.view {
        ActiveView::Scout => scout_keys(key, ctrl),
        ActiveView::Encyclopedia => encyclopedia_keys(app, key, ctrl),
    }
}

fn scout_keys(key: KeyEvent, ctrl: bool) -> Vec<AppAction> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => vec![AppAction::RequestScout],
        KeyCode::Char('r') if ctrl => vec![AppAction::RequestScout],
        KeyCode::Char('q') if !ctrl => vec![AppAction::Quit],
        KeyCode::Esc => vec![AppAction::ClearStatus],
        _ => Vec::new(),
    }
}

fn encyclopedia_keys(app: &App, key: KeyEvent, ctrl: bool) -> Vec<AppAction> {
    let search = &app.browse.search_input;
    match key.code {
        KeyCode::Char('r') if ctrl => {
            let mut actions = vec![AppAction::ReloadPage];
            if app.browse.teams.is_empty() {
                actions.push(AppAction::LoadTeams);
            }
            actions
        }
        KeyCode::Char('u') if ctrl => vec![AppAction::SearchChanged {
            text: String::new(),
        }],
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut text = search.clone();
            text.push(ch);
            vec![AppAction::SearchChanged { text }]
        }
        KeyCode::Backspace => {
            let mut text = search.clone();
            if text.pop().is_none() {
                return Vec::new();
            }
            vec![AppAction::SearchChanged { text }]
        }
        KeyCode::Esc if !search.is_empty() => vec![AppAction::SearchChanged {
            text: String::new(),
        }],
        KeyCode::Esc => vec![AppAction::ClearStatus],
        KeyCode::F(n) => match n {
            1 => vec![AppAction::CycleFilter {
                field: FilterField::Element,
            }],
            2 => vec![AppAction::CycleFilter {
                field: FilterField::Position,
            }],
            3 => vec![AppAction::CycleFilter {
                field: FilterField::Gender,
            }],
            4 => vec![AppAction::CycleFilter {
                field: FilterField::Team,
            }],
            _ => Vec::new(),
        },
        KeyCode::Left | KeyCode::PageUp => vec![AppAction::PreviousPage],
        KeyCode::Right | KeyCode::PageDown => vec![AppAction::NextPage],
        KeyCode::Up => vec![AppAction::SelectPrevious],
        KeyCode::Down => vec![AppAction::SelectNext],
        KeyCode::Enter => vec![AppAction::OpenSelected],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CharacterRecord;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn encyclopedia_app() -> App {
        let mut app = App::new("test", 10);
        app.view = ActiveView::Encyclopedia;
        app
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut app = encyclopedia_app();
        app.detail = Some(CharacterRecord::default());
        assert!(matches!(
            actions_for_key(&app, ctrl('c')).as_slice(),
            [AppAction::Quit]
        ));
    }

    #[test]
    fn detail_overlay_swallows_other_keys() {
        let mut app = encyclopedia_app();
        app.detail = Some(CharacterRecord::default());
        assert!(actions_for_key(&app, key(KeyCode::Char('x'))).is_empty());
        assert!(matches!(
            actions_for_key(&app, key(KeyCode::Esc)).as_slice(),
            [AppAction::DismissDetail]
        ));
    }

    #[test]
    fn typing_extends_search_text() {
        let mut app = encyclopedia_app();
        app.browse.search_input = "En".into();
        match actions_for_key(&app, key(KeyCode::Char('d'))).as_slice() {
            [AppAction::SearchChanged { text }] => assert_eq!(text, "End"),
            _ => panic!("expected search change"),
        }
        match actions_for_key(&app, key(KeyCode::Backspace)).as_slice() {
            [AppAction::SearchChanged { text }] => assert_eq!(text, "E"),
            _ => panic!("expected search change"),
        }
    }

    #[test]
    fn backspace_on_empty_search_does_nothing() {
        let app = encyclopedia_app();
        assert!(actions_for_key(&app, key(KeyCode::Backspace)).is_empty());
    }

    #[test]
    fn function_keys_cycle_filters() {
        let app = encyclopedia_app();
        assert!(matches!(
            actions_for_key(&app, key(KeyCode::F(2))).as_slice(),
            [AppAction::CycleFilter {
                field: FilterField::Position
            }]
        ));
        assert!(actions_for_key(&app, key(KeyCode::F(9))).is_empty());
    }

    #[test]
    fn retry_reloads_page_and_missing_teams() {
        let app = encyclopedia_app();
        assert!(matches!(
            actions_for_key(&app, ctrl('r')).as_slice(),
            [AppAction::ReloadPage, AppAction::LoadTeams]
        ));
    }

    #[test]
    fn scout_view_keys() {
        let app = App::new("test", 10);
        assert!(matches!(
            actions_for_key(&app, key(KeyCode::Char(' '))).as_slice(),
            [AppAction::RequestScout]
        ));
        assert!(matches!(
            actions_for_key(&app, key(KeyCode::Tab)).as_slice(),
            [AppAction::SwitchView]
        ));
        assert!(matches!(
            actions_for_key(&app, key(KeyCode::Char('q'))).as_slice(),
            [AppAction::Quit]
        ));
    }
}
