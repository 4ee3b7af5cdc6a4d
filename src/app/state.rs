use crate::clipboard::ClipboardAdapter;
use crate::gateway::SavedPalette;
use crate::identity::User;
use crate::palette::PaletteState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Generator,
    Saved,
    Account,
    Help,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Generator, Screen::Saved, Screen::Account, Screen::Help];

    pub fn next(self) -> Self {
        match self {
            Screen::Generator => Screen::Saved,
            Screen::Saved => Screen::Account,
            Screen::Account => Screen::Help,
            Screen::Help => Screen::Generator,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Generator => Screen::Help,
            Screen::Saved => Screen::Generator,
            Screen::Account => Screen::Saved,
            Screen::Help => Screen::Account,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Generator => "generator",
            Screen::Saved => "saved",
            Screen::Account => "account",
            Screen::Help => "help",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Modal shown over the current screen until the user answers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// No clipboard: show the text so it can be copied by hand.
    CopyManually(String),
    ConfirmDelete { id: String, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub email: String,
    pub password: String,
    pub mode: AccountMode,
    pub focus: AccountField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl AccountForm {
    pub fn active_input_mut(&mut self) -> &mut String {
        match self.focus {
            AccountField::Email => &mut self.email,
            AccountField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AccountField::Email => AccountField::Password,
            AccountField::Password => AccountField::Email,
        };
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AccountMode::SignIn => AccountMode::SignUp,
            AccountMode::SignUp => AccountMode::SignIn,
        };
        self.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Saved palettes screen: the cached list plus cursor state.
#[derive(Debug, Clone, Default)]
pub struct SavedListState {
    pub palettes: Vec<SavedPalette>,
    pub selected: usize,
    pub color_selected: usize,
    pub scroll_offset: usize,
    pub loading: bool,
    pub loaded: bool,
}

impl SavedListState {
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.color_selected = 0;
    }

    pub fn select_next(&mut self) {
        if !self.palettes.is_empty() {
            self.selected = (self.selected + 1).min(self.palettes.len() - 1);
            self.color_selected = 0;
        }
    }

    pub fn color_prev(&mut self) {
        self.color_selected = self.color_selected.saturating_sub(1);
    }

    pub fn color_next(&mut self) {
        if let Some(p) = self.selected_palette()
            && !p.colors.is_empty()
        {
            self.color_selected = (self.color_selected + 1).min(p.colors.len() - 1);
        }
    }

    pub fn selected_palette(&self) -> Option<&SavedPalette> {
        self.palettes.get(self.selected)
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.selected_palette()
            .and_then(|p| p.colors.get(self.color_selected))
            .map(String::as_str)
    }

    pub fn set_palettes(&mut self, palettes: Vec<SavedPalette>) {
        self.palettes = palettes;
        self.selected = self.selected.min(self.palettes.len().saturating_sub(1));
        self.color_selected = 0;
        self.loaded = true;
        self.loading = false;
    }

    /// Drop a palette the store has confirmed deleted.
    pub fn remove(&mut self, id: &str) {
        self.palettes.retain(|p| p.id != id);
        self.selected = self.selected.min(self.palettes.len().saturating_sub(1));
        self.color_selected = 0;
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub screen: Screen,

    // Generator
    pub palette: PaletteState,
    pub cursor: usize,
    pub saving: bool,

    // Saved palettes
    pub saved: SavedListState,

    // Account
    pub user: Option<User>,
    pub account: AccountForm,

    pub clipboard: ClipboardAdapter,
    pub prompt: Option<Prompt>,

    // Toast notification
    pub toast: Option<Toast>,

    // Status message (for debugging/info)
    pub status: String,
}

impl AppState {
    pub fn new(palette: PaletteState, clipboard: ClipboardAdapter) -> Self {
        Self {
            should_quit: false,
            tick: 0,
            screen: Screen::Generator,
            palette,
            cursor: 0,
            saving: false,
            saved: SavedListState::default(),
            user: None,
            account: AccountForm::default(),
            clipboard,
            prompt: None,
            toast: None,
            status: String::new(),
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if !self.palette.is_empty() {
            self.cursor = (self.cursor + 1).min(self.palette.len() - 1);
        }
    }

    /// Keep the cursor inside the palette after it was replaced.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.palette.len().saturating_sub(1));
    }

    pub fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn saved(id: &str, colors: usize) -> SavedPalette {
        SavedPalette {
            id: id.into(),
            name: format!("Paleta {id}"),
            colors: vec!["#000000".to_string(); colors],
            created_at: OffsetDateTime::UNIX_EPOCH,
            owner_id: "U".into(),
        }
    }

    #[test]
    fn test_screen_cycle_and_names() {
        let mut s = Screen::Generator;
        for _ in 0..4 {
            s = s.next();
        }
        assert_eq!(s, Screen::Generator);
        assert_eq!(Screen::Generator.prev(), Screen::Help);
        assert_eq!(Screen::from_name("saved"), Some(Screen::Saved));
        assert_eq!(Screen::from_name("nope"), None);
    }

    #[test]
    fn test_saved_list_remove_clamps_selection() {
        let mut list = SavedListState::default();
        list.set_palettes(vec![saved("a", 3), saved("b", 5)]);
        list.select_next();
        assert_eq!(list.selected, 1);
        list.remove("b");
        assert_eq!(list.selected, 0);
        assert_eq!(list.palettes.len(), 1);
        list.remove("missing");
        assert_eq!(list.palettes.len(), 1);
    }

    #[test]
    fn test_saved_list_color_cursor() {
        let mut list = SavedListState::default();
        list.set_palettes(vec![saved("a", 2)]);
        list.color_next();
        list.color_next();
        assert_eq!(list.color_selected, 1);
        list.color_prev();
        assert_eq!(list.selected_color(), Some("#000000"));
    }

    #[test]
    fn test_account_form_focus_and_mode() {
        let mut form = AccountForm::default();
        form.active_input_mut().push('a');
        form.toggle_focus();
        form.active_input_mut().push('b');
        assert_eq!(form.email, "a");
        assert_eq!(form.password, "b");
        form.error = Some("x".into());
        form.toggle_mode();
        assert_eq!(form.mode, AccountMode::SignUp);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_expire_toast_keeps_fresh_one() {
        use crate::clipboard::testing::{Mode, RecordingClipboard};

        let clipboard = ClipboardAdapter::new(Box::new(RecordingClipboard::new(Mode::Works)));
        let mut state = AppState::new(PaletteState::from_values(&["#AABBCC"]), clipboard);

        state.toast = Some(Toast::success("Palette saved!"));
        state.expire_toast();
        assert!(state.toast.is_some());

        let mut old = Toast::error("Could not delete palette");
        if let Some(earlier) = old.created_at.checked_sub(std::time::Duration::from_secs(4)) {
            old.created_at = earlier;
            state.toast = Some(old);
            state.expire_toast();
            assert!(state.toast.is_none());
        }
    }
}
