use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Screen};
use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                let ev = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                    Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                    Ok(_) | Err(_) => continue,
                };
                if tx.blocking_send(Event::Input(ev)).is_err() {
                    break;
                }
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Key(k) => {
            if state.prompt.is_some() {
                return handle_prompt(k);
            }
            match state.screen {
                Screen::Generator => handle_generator_screen(k),
                Screen::Saved => handle_saved_screen(k),
                Screen::Account => handle_account_screen(state, k),
                Screen::Help => handle_global(k),
            }
        }
    }
}

fn handle_prompt(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Enter | KeyCode::Char('y') => Some(Action::ConfirmPrompt),
        KeyCode::Esc | KeyCode::Char('n') => Some(Action::DismissPrompt),
        _ => None,
    }
}

/// Keys shared by every screen that does not capture text.
fn handle_global(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Generator)),
        KeyCode::Char('2') => Some(Action::SetScreen(Screen::Saved)),
        KeyCode::Char('3') => Some(Action::SetScreen(Screen::Account)),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::SetScreen(Screen::Help)),
        _ => None,
    }
}

fn handle_generator_screen(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::CursorRight),
        KeyCode::Char('r') => Some(Action::RegenerateUnlocked),
        KeyCode::Char('n') => Some(Action::GeneratePalette),
        KeyCode::Char(' ') => Some(Action::ToggleLockSelected),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::SizeUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::SizeDown),
        KeyCode::Char('c') | KeyCode::Enter => Some(Action::CopySelected),
        KeyCode::Char('C') => Some(Action::CopyPalette),
        KeyCode::Char('s') => Some(Action::SavePalette),
        _ => handle_global(k),
    }
}

fn handle_saved_screen(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::ColorLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::ColorRight),
        KeyCode::Char('c') | KeyCode::Enter => Some(Action::CopySavedColor),
        KeyCode::Char('C') => Some(Action::CopySavedPalette),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::RequestDelete),
        KeyCode::Char('r') | KeyCode::F(5) => Some(Action::RefreshSaved),
        _ => handle_global(k),
    }
}

fn handle_account_screen(state: &AppState, k: KeyEvent) -> Option<Action> {
    if state.user.is_some() {
        return match k.code {
            KeyCode::Char('o') => Some(Action::SignOut),
            _ => handle_global(k),
        };
    }

    // Signed out: the form captures text, so q and digits are input.
    match k.code {
        KeyCode::Esc => Some(Action::SetScreen(Screen::Generator)),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::AccountFocusNext),
        KeyCode::Enter => Some(Action::SubmitAccount),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('t') if k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ToggleAccountMode)
        }
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Prompt;
    use crate::clipboard::ClipboardAdapter;
    use crate::identity::User;
    use crate::palette::PaletteState;

    fn state_on(screen: Screen) -> AppState {
        let mut state = AppState::new(PaletteState::new(), ClipboardAdapter::system());
        state.screen = screen;
        state
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_generator_keys() {
        let state = state_on(Screen::Generator);
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('s'))), Some(Action::SavePalette));
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char(' '))),
            Some(Action::ToggleLockSelected)
        );
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_prompt_takes_precedence() {
        let mut state = state_on(Screen::Saved);
        state.prompt = Some(Prompt::ConfirmDelete {
            id: "a".into(),
            name: "Paleta".into(),
        });
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('d'))), None);
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::ConfirmPrompt));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Esc)), Some(Action::DismissPrompt));
    }

    #[test]
    fn test_account_form_captures_text() {
        let mut state = state_on(Screen::Account);
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        );
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::SubmitAccount));

        state.user = Some(User {
            id: "U".into(),
            email: "u@example.com".into(),
        });
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('o'))), Some(Action::SignOut));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::Quit));
    }
}
