use crate::clipboard::Generation;
use crate::gateway::SavedPalette;
use crate::identity::User;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Network(NetworkEvent),
    Timer(TimerEvent),
    /// Current user changed (login, logout, restored session).
    Auth(Option<User>),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Resize,
}

/// Palette results carry `owner`, the id of the user the request ran for.
/// They are dropped if that user is no longer signed in.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    Error(String),
    PaletteSaved { id: String, owner: String },
    SaveFailed(String),
    PalettesLoaded { palettes: Vec<SavedPalette>, owner: String },
    ListFailed { message: String, owner: String },
    PaletteDeleted { id: String, owner: String },
    DeleteFailed { id: String, message: String },
    AuthFailed(String),
}

#[derive(Debug, Clone)]
pub enum TimerEvent {
    CopyExpired(Generation),
}
