pub mod actions;
pub mod events;
pub mod state;

use crate::clipboard::{ClipboardAdapter, CopyAllOutcome, CopyOutcome, Generation};
use crate::config::Config;
use crate::gateway::{Confirmation, DeleteOutcome, PaletteGateway};
use crate::identity::{AuthContext, IdentityProvider, LocalAccounts, User};
use crate::input;
use crate::palette::{self, PaletteState};
use crate::storage::{DocumentStore, SqliteStore, Storage, StorageHandle};
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent, TimerEvent};
use state::{AccountMode, AppState, Prompt, Screen, Toast};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    config_path: std::path::PathBuf,
    state: AppState,
    auth: AuthContext,
    gateway: PaletteGateway,
}

impl App {
    pub fn new(cfg: Config, config_path: std::path::PathBuf) -> anyhow::Result<Self> {
        let db_path = cfg.database_path();
        let _ = Storage::open(&db_path)?;
        let handle = StorageHandle::new(db_path);

        let store = Arc::new(SqliteStore::new(handle.clone()));
        let identity = Arc::new(LocalAccounts::new(handle));
        Ok(Self::with_services(
            cfg,
            config_path,
            store,
            identity,
            ClipboardAdapter::system(),
        ))
    }

    pub fn with_services(
        cfg: Config,
        config_path: std::path::PathBuf,
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        clipboard: ClipboardAdapter,
    ) -> Self {
        let palette = PaletteState::with_size(cfg.startup_size());
        let mut state = AppState::new(palette, clipboard);

        // Restore last screen if available
        if let Some(screen) = cfg.ui.last_screen.as_deref().and_then(Screen::from_name) {
            state.screen = screen;
        }

        Self {
            cfg,
            config_path,
            state,
            auth: AuthContext::new(identity),
            gateway: PaletteGateway::new(store),
        }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());
        self.spawn_auth_forwarder(&tx);
        self.spawn_restore_session();

        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            self.handle_event(ev, &tx);

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &mut self.state)?;
        }

        self.save_state_on_quit();

        Ok(())
    }

    fn handle_event(&mut self, ev: Event, tx: &mpsc::Sender<Event>) {
        match ev {
            Event::Input(input_ev) => {
                if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                    self.handle_action(action, tx);
                }
            }
            Event::Network(ne) => self.handle_network(ne, tx),
            Event::Timer(TimerEvent::CopyExpired(generation)) => {
                self.state.clipboard.expire(generation);
            }
            Event::Auth(user) => self.handle_auth(user, tx),
        }
    }

    /// Forward every login / logout from the auth context into the event loop.
    fn spawn_auth_forwarder(&self, tx: &mpsc::Sender<Event>) {
        let mut rx = self.auth.subscribe();
        let tx = tx.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let user = rx.borrow_and_update().clone();
                if tx.send(Event::Auth(user)).await.is_err() {
                    break;
                }
            }
        });
    }

    fn spawn_restore_session(&self) {
        let auth = self.auth.clone();
        tokio::spawn(async move {
            match auth.restore().await {
                Ok(Some(user)) => tracing::info!(user = %user.id, "session restored"),
                Ok(None) => {}
                Err(e) => tracing::warn!("session restore failed: {e}"),
            }
        });
    }

    fn on_screen_enter(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.screen == Screen::Saved && !self.state.saved.loaded {
            self.spawn_load_saved(tx);
        }
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.ui.last_screen = Some(self.state.screen.name().to_string());
        if let Err(e) = crate::config::save(&self.cfg, Some(&self.config_path)) {
            tracing::warn!("failed to save config: {e:#}");
        }
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::SetScreen(_) | Action::NextScreen | Action::PrevScreen => {
                self.reduce(action);
                self.on_screen_enter(tx);
            }
            Action::CopySelected => {
                let value = self.state.palette.get(self.state.cursor).map(|s| s.value.clone());
                if let Some(value) = value {
                    self.copy_color(&value, tx);
                }
            }
            Action::CopyPalette => {
                let values = self.state.palette.values();
                self.copy_all(&values);
            }
            Action::CopySavedColor => {
                let value = self.state.saved.selected_color().map(str::to_string);
                if let Some(value) = value {
                    self.copy_color(&value, tx);
                }
            }
            Action::CopySavedPalette => {
                let values = self.state.saved.selected_palette().map(|p| p.colors.clone());
                if let Some(values) = values {
                    self.copy_all(&values);
                }
            }
            Action::SavePalette => self.spawn_save(tx),
            Action::RefreshSaved => self.spawn_load_saved(tx),
            Action::ConfirmPrompt => match self.state.prompt.take() {
                Some(Prompt::ConfirmDelete { id, .. }) => self.spawn_delete(id, tx),
                Some(Prompt::CopyManually(_)) | None => {}
            },
            Action::DismissPrompt => {
                if let Some(Prompt::ConfirmDelete { .. }) = self.state.prompt.take() {
                    self.state.status = "Delete cancelled".into();
                }
            }
            Action::SubmitAccount => self.spawn_account_submit(tx),
            Action::SignOut => self.spawn_sign_out(tx),
            _ => self.reduce(action),
        }
    }

    fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::NextScreen => self.state.screen = self.state.screen.next(),
            Action::PrevScreen => self.state.screen = self.state.screen.prev(),
            Action::SetScreen(screen) => self.state.screen = screen,
            Action::Resize => {}

            Action::CursorLeft => self.state.cursor_left(),
            Action::CursorRight => self.state.cursor_right(),
            Action::GeneratePalette => {
                let size = self.state.palette.requested_size();
                self.state.palette.generate_new(size);
                self.state.clamp_cursor();
            }
            Action::RegenerateUnlocked => self.state.palette.regenerate_unlocked(),
            Action::ToggleLockSelected => {
                if let Some(id) = self.state.palette.get(self.state.cursor).map(|s| s.id) {
                    self.state.palette.toggle_lock(id);
                }
            }
            Action::SizeUp | Action::SizeDown => {
                let current = self.state.palette.requested_size();
                let size = if action == Action::SizeUp {
                    palette::next_size(current)
                } else {
                    palette::prev_size(current)
                };
                self.state.palette.set_requested_size(size);
                self.state.clamp_cursor();
                self.state.status = format!("{size} colors");
            }

            Action::ListUp => {
                self.state.saved.select_prev();
                self.state.saved.update_scroll(10);
            }
            Action::ListDown => {
                self.state.saved.select_next();
                self.state.saved.update_scroll(10);
            }
            Action::ColorLeft => self.state.saved.color_prev(),
            Action::ColorRight => self.state.saved.color_next(),
            Action::RequestDelete => {
                if let Some(p) = self.state.saved.selected_palette() {
                    self.state.prompt = Some(Prompt::ConfirmDelete {
                        id: p.id.clone(),
                        name: p.name.clone(),
                    });
                }
            }

            Action::InputChar(c) => self.state.account.active_input_mut().push(c),
            Action::Backspace => {
                self.state.account.active_input_mut().pop();
            }
            Action::AccountFocusNext => self.state.account.toggle_focus(),
            Action::ToggleAccountMode => self.state.account.toggle_mode(),

            // Handled in handle_action
            Action::CopySelected
            | Action::CopyPalette
            | Action::CopySavedColor
            | Action::CopySavedPalette
            | Action::SavePalette
            | Action::RefreshSaved
            | Action::ConfirmPrompt
            | Action::DismissPrompt
            | Action::SubmitAccount
            | Action::SignOut => {}
        }
    }

    fn copy_color(&mut self, value: &str, tx: &mpsc::Sender<Event>) {
        match self.state.clipboard.copy_color(value) {
            CopyOutcome::Copied(generation) => {
                self.state.status = format!("Copied {value}");
                self.schedule_copy_expiry(generation, tx);
            }
            CopyOutcome::Presented(generation) => {
                self.state.prompt = Some(Prompt::CopyManually(value.to_string()));
                self.schedule_copy_expiry(generation, tx);
            }
            CopyOutcome::Failed(e) => {
                self.state.toast = Some(Toast::error(format!("{}: {value}", e.user_message())));
            }
        }
    }

    fn copy_all(&mut self, values: &[String]) {
        if values.is_empty() {
            return;
        }
        match self.state.clipboard.copy_all(values) {
            CopyAllOutcome::Copied => self.state.toast = Some(Toast::success("Palette copied!")),
            CopyAllOutcome::Presented(text) => self.state.prompt = Some(Prompt::CopyManually(text)),
            CopyAllOutcome::Failed(e) => self.state.toast = Some(Toast::error(e.user_message())),
        }
    }

    fn schedule_copy_expiry(&self, generation: Generation, tx: &mpsc::Sender<Event>) {
        let deadline =
            tokio::time::Instant::now() + Duration::from_millis(self.cfg.clipboard.feedback_ms);
        let tx = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx
                .send(Event::Timer(TimerEvent::CopyExpired(generation)))
                .await;
        });
    }

    fn spawn_save(&mut self, tx: &mpsc::Sender<Event>) {
        let user = self.auth.current_user();
        let pending = match self.gateway.begin_save(self.state.palette.swatches(), user.as_ref()) {
            Ok(p) => p,
            Err(e) => {
                self.state.toast = Some(Toast::error(e.user_message()));
                return;
            }
        };
        self.state.saving = self.gateway.is_saving();
        self.state.status = "Saving...".into();

        let owner = pending.owner_id().to_string();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match pending.commit().await {
                Ok(id) => NetworkEvent::PaletteSaved { id, owner },
                Err(e) => NetworkEvent::SaveFailed(e.user_message()),
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_load_saved(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.saved.loading {
            return;
        }
        let Some(user) = self.auth.current_user() else {
            self.state.status = "Sign in to see your saved palettes".into();
            return;
        };
        self.state.saved.loading = true;
        self.state.status = "Loading palettes...".into();

        let gateway = self.gateway.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let res = gateway.list(Some(&user)).await;
            let ev = match res {
                Ok(palettes) => NetworkEvent::PalettesLoaded {
                    palettes,
                    owner: user.id,
                },
                Err(e) => NetworkEvent::ListFailed {
                    message: e.user_message(),
                    owner: user.id,
                },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_delete(&mut self, id: String, tx: &mpsc::Sender<Event>) {
        let user = self.auth.current_user();
        let owner = user.as_ref().map(|u| u.id.clone()).unwrap_or_default();
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        self.state.status = "Deleting...".into();
        tokio::spawn(async move {
            let ev = match gateway
                .delete(&id, user.as_ref(), Confirmation::Confirmed)
                .await
            {
                Ok(DeleteOutcome::Deleted) => NetworkEvent::PaletteDeleted { id, owner },
                Ok(DeleteOutcome::Cancelled) => return,
                Err(e) => NetworkEvent::DeleteFailed {
                    id,
                    message: e.user_message(),
                },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_account_submit(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.account.submitting {
            return;
        }
        self.state.account.submitting = true;
        self.state.account.error = None;

        let auth = self.auth.clone();
        let email = self.state.account.email.clone();
        let password = self.state.account.password.clone();
        let mode = self.state.account.mode;
        let tx = tx.clone();
        tokio::spawn(async move {
            let res = match mode {
                AccountMode::SignIn => auth.sign_in(&email, &password).await,
                AccountMode::SignUp => auth.sign_up(&email, &password).await,
            };
            // Success arrives through the auth watch.
            if let Err(e) = res {
                let _ = tx
                    .send(Event::Network(NetworkEvent::AuthFailed(e.user_message())))
                    .await;
            }
        });
    }

    fn spawn_sign_out(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.user.is_none() {
            return;
        }
        let auth = self.auth.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = auth.sign_out().await {
                let _ = tx
                    .send(Event::Network(NetworkEvent::Error(e.user_message())))
                    .await;
            }
        });
    }

    fn handle_auth(&mut self, user: Option<User>, tx: &mpsc::Sender<Event>) {
        self.state.user = user.clone();
        match user {
            Some(user) => {
                self.state.account.reset();
                self.state.toast = Some(Toast::success(format!(
                    "Signed in as {}",
                    user.display_name()
                )));
                if self.state.screen == Screen::Saved {
                    self.spawn_load_saved(tx);
                }
            }
            None => {
                self.state.saved.clear();
                self.state.toast = Some(Toast::success("Signed out"));
            }
        }
    }

    fn is_signed_in_as(&self, owner: &str) -> bool {
        self.state.user.as_ref().is_some_and(|u| u.id == owner)
    }

    fn handle_network(&mut self, ne: NetworkEvent, tx: &mpsc::Sender<Event>) {
        match ne {
            NetworkEvent::Error(e) => {
                self.state.toast = Some(Toast::error(e.clone()));
                self.state.status = format!("Error: {e}");
            }
            NetworkEvent::PaletteSaved { id, owner } => {
                self.state.saving = self.gateway.is_saving();
                self.state.status = String::new();
                self.state.toast = Some(Toast::success("Palette saved!"));
                tracing::debug!(palette = %id, "save confirmed");
                if self.state.saved.loaded && self.is_signed_in_as(&owner) {
                    self.spawn_load_saved(tx);
                }
            }
            NetworkEvent::SaveFailed(e) => {
                self.state.saving = self.gateway.is_saving();
                self.state.status = String::new();
                self.state.toast = Some(Toast::error(e));
            }
            NetworkEvent::PalettesLoaded { owner, .. }
            | NetworkEvent::ListFailed { owner, .. }
            | NetworkEvent::PaletteDeleted { owner, .. }
                if !self.is_signed_in_as(&owner) =>
            {
                tracing::debug!(owner = %owner, "dropping palette result for signed-out user");
            }
            NetworkEvent::PalettesLoaded { palettes, .. } => {
                self.state.saved.set_palettes(palettes);
                let n = self.state.saved.palettes.len();
                self.state.status = match n {
                    0 => "No saved palettes yet".into(),
                    1 => "1 palette".into(),
                    n => format!("{n} palettes"),
                };
            }
            NetworkEvent::ListFailed { message, .. } => {
                self.state.saved.loading = false;
                self.state.status = format!("Error: {message} (press r to retry)");
                self.state.toast = Some(Toast::error(message));
            }
            NetworkEvent::PaletteDeleted { id, .. } => {
                self.state.saved.remove(&id);
                self.state.status = String::new();
                self.state.toast = Some(Toast::success("Palette deleted"));
            }
            NetworkEvent::DeleteFailed { id, message } => {
                tracing::warn!(palette = %id, "delete failed: {message}");
                self.state.status = String::new();
                self.state.toast = Some(Toast::error(message));
            }
            NetworkEvent::AuthFailed(e) => {
                self.state.account.submitting = false;
                self.state.account.error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::{Mode, RecordingClipboard};
    use crate::error::{AuthError, StorageError};
    use crate::storage::{PaletteRecord, StoredRecord};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct MemoryStore {
        docs: Mutex<Vec<StoredRecord>>,
        fail_delete: AtomicBool,
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn create(&self, _c: &str, record: &PaletteRecord) -> Result<String, StorageError> {
            let mut docs = self.docs.lock().unwrap();
            let id = format!("doc{}", docs.len() + 1);
            docs.push(StoredRecord {
                id: id.clone(),
                record: record.clone(),
            });
            Ok(id)
        }

        async fn query_by_owner(&self, _c: &str, owner: &str) -> Result<Vec<StoredRecord>, StorageError> {
            Ok(self
                .docs
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.record.owner_id == owner)
                .cloned()
                .collect())
        }

        async fn delete(&self, _c: &str, id: &str, owner: &str) -> Result<(), StorageError> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(StorageError::Delete("offline".into()));
            }
            self.docs
                .lock()
                .unwrap()
                .retain(|d| !(d.id == id && d.record.owner_id == owner));
            Ok(())
        }
    }

    struct StubIdentity;

    #[async_trait]
    impl IdentityProvider for StubIdentity {
        async fn sign_in(&self, email: &str, _password: &str) -> Result<User, AuthError> {
            Ok(User {
                id: "U".into(),
                email: email.into(),
            })
        }

        async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
            self.sign_in(email, password).await
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }

        async fn restore(&self) -> Result<Option<User>, AuthError> {
            Ok(None)
        }
    }

    fn seed(store: &MemoryStore, id: &str) {
        store.docs.lock().unwrap().push(StoredRecord {
            id: id.into(),
            record: PaletteRecord {
                name: format!("Paleta {id}"),
                colors: vec!["#AABBCC".into(), "#112233".into()],
                created_at_ms: Some(1_000),
                owner_id: "U".into(),
            },
        });
    }

    fn app_with(store: Arc<MemoryStore>, clipboard: RecordingClipboard) -> App {
        let dir = std::env::temp_dir().join("paleta-app-tests");
        App::with_services(
            Config::default(),
            dir.join("config.toml"),
            store,
            Arc::new(StubIdentity),
            ClipboardAdapter::new(Box::new(clipboard)),
        )
    }

    async fn sign_in(app: &mut App, tx: &mpsc::Sender<Event>) {
        let user = app.auth.sign_in("u@example.com", "secret1").await.unwrap();
        app.handle_event(Event::Auth(Some(user)), tx);
    }

    async fn pump(app: &mut App, rx: &mut mpsc::Receiver<Event>, tx: &mpsc::Sender<Event>) {
        let ev = rx.recv().await.unwrap();
        app.handle_event(ev, tx);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_expiry_only_clears_latest_copy() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut app = app_with(Arc::default(), RecordingClipboard::new(Mode::Works));
        app.state.palette = PaletteState::from_values(&["#AABBCC", "#112233"]);

        app.handle_action(Action::CopySelected, &tx);
        tokio::time::advance(Duration::from_millis(1000)).await;
        app.handle_action(Action::CursorRight, &tx);
        app.handle_action(Action::CopySelected, &tx);
        assert_eq!(app.state.clipboard.feedback().current(), Some("#112233"));

        // first copy's timer fires at 2000ms and must not clear the second mark
        pump(&mut app, &mut rx, &tx).await;
        assert_eq!(app.state.clipboard.feedback().current(), Some("#112233"));

        pump(&mut app, &mut rx, &tx).await;
        assert_eq!(app.state.clipboard.feedback().current(), None);
    }

    #[tokio::test]
    async fn test_copy_without_clipboard_presents_value() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = app_with(Arc::default(), RecordingClipboard::new(Mode::Unavailable));
        app.state.palette = PaletteState::from_values(&["#AABBCC"]);

        app.handle_action(Action::CopySelected, &tx);
        assert_eq!(app.state.prompt, Some(Prompt::CopyManually("#AABBCC".into())));
        assert!(app.state.clipboard.feedback().is_copied("#AABBCC"));

        app.handle_action(Action::ConfirmPrompt, &tx);
        assert!(app.state.prompt.is_none());
    }

    #[tokio::test]
    async fn test_save_requires_sign_in() {
        let (tx, _rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        let mut app = app_with(store.clone(), RecordingClipboard::new(Mode::Works));

        app.handle_action(Action::SavePalette, &tx);
        assert!(!app.state.saving);
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.message.as_str()),
            Some("You need to be signed in to do that")
        );
        assert!(store.docs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_uses_palette_at_request_time() {
        let (tx, mut rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        let mut app = app_with(store.clone(), RecordingClipboard::new(Mode::Works));
        sign_in(&mut app, &tx).await;
        app.state.palette = PaletteState::from_values(&["#AABBCC", "#112233", "#445566"]);

        app.handle_action(Action::SavePalette, &tx);
        assert!(app.state.saving);

        // edits and a second save while the first is in flight
        app.handle_action(Action::GeneratePalette, &tx);
        app.handle_action(Action::SavePalette, &tx);
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.message.as_str()),
            Some("Still saving the previous palette")
        );

        pump(&mut app, &mut rx, &tx).await;
        assert!(!app.state.saving);

        let docs = store.docs.lock().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].record.colors, ["#AABBCC", "#112233", "#445566"]);
        assert_eq!(docs[0].record.owner_id, "U");
    }

    #[tokio::test]
    async fn test_delete_removes_entry_only_after_success() {
        let (tx, mut rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        seed(&store, "a");
        seed(&store, "b");
        let mut app = app_with(store.clone(), RecordingClipboard::new(Mode::Works));
        sign_in(&mut app, &tx).await;

        app.handle_action(Action::SetScreen(Screen::Saved), &tx);
        pump(&mut app, &mut rx, &tx).await;
        assert_eq!(app.state.saved.palettes.len(), 2);

        app.handle_action(Action::RequestDelete, &tx);
        assert!(matches!(app.state.prompt, Some(Prompt::ConfirmDelete { .. })));
        app.handle_action(Action::ConfirmPrompt, &tx);
        assert_eq!(app.state.saved.palettes.len(), 2);

        pump(&mut app, &mut rx, &tx).await;
        assert_eq!(app.state.saved.palettes.len(), 1);
        assert_eq!(store.docs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry() {
        let (tx, mut rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        seed(&store, "a");
        store.fail_delete.store(true, Ordering::SeqCst);
        let mut app = app_with(store.clone(), RecordingClipboard::new(Mode::Works));
        sign_in(&mut app, &tx).await;

        app.handle_action(Action::SetScreen(Screen::Saved), &tx);
        pump(&mut app, &mut rx, &tx).await;

        app.handle_action(Action::RequestDelete, &tx);
        app.handle_action(Action::ConfirmPrompt, &tx);
        pump(&mut app, &mut rx, &tx).await;

        assert_eq!(app.state.saved.palettes.len(), 1);
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.message.as_str()),
            Some("Could not delete palette")
        );
    }

    #[tokio::test]
    async fn test_declined_delete_touches_nothing() {
        let (tx, _rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        seed(&store, "a");
        let mut app = app_with(store.clone(), RecordingClipboard::new(Mode::Works));
        sign_in(&mut app, &tx).await;
        app.state.saved.set_palettes(
            app.gateway.list(app.auth.current_user().as_ref()).await.unwrap(),
        );

        app.handle_action(Action::RequestDelete, &tx);
        app.handle_action(Action::DismissPrompt, &tx);
        assert!(app.state.prompt.is_none());
        assert_eq!(app.state.status, "Delete cancelled");
        assert_eq!(store.docs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_clears_saved_list() {
        let (tx, _rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        seed(&store, "a");
        let mut app = app_with(store, RecordingClipboard::new(Mode::Works));
        sign_in(&mut app, &tx).await;
        app.state.saved.set_palettes(
            app.gateway.list(app.auth.current_user().as_ref()).await.unwrap(),
        );

        app.handle_event(Event::Auth(None), &tx);
        assert!(app.state.user.is_none());
        assert!(app.state.saved.palettes.is_empty());
        assert!(!app.state.saved.loaded);
    }

    #[tokio::test]
    async fn test_list_result_after_sign_out_is_dropped() {
        let (tx, mut rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        seed(&store, "a");
        let mut app = app_with(store, RecordingClipboard::new(Mode::Works));
        sign_in(&mut app, &tx).await;

        app.handle_action(Action::SetScreen(Screen::Saved), &tx);
        assert!(app.state.saved.loading);

        app.auth.sign_out().await.unwrap();
        app.handle_event(Event::Auth(None), &tx);

        // list task finishes after the sign-out
        pump(&mut app, &mut rx, &tx).await;
        assert!(app.state.user.is_none());
        assert!(app.state.saved.palettes.is_empty());
        assert!(!app.state.saved.loaded);
    }

    #[tokio::test]
    async fn test_results_for_another_user_are_dropped() {
        let (tx, _rx) = mpsc::channel(16);
        let store = Arc::new(MemoryStore::default());
        seed(&store, "a");
        let mut app = app_with(store, RecordingClipboard::new(Mode::Works));
        sign_in(&mut app, &tx).await;
        let palettes = app.gateway.list(app.auth.current_user().as_ref()).await.unwrap();
        app.state.saved.set_palettes(palettes.clone());

        app.handle_event(
            Event::Network(NetworkEvent::PaletteDeleted {
                id: "a".into(),
                owner: "V".into(),
            }),
            &tx,
        );
        assert_eq!(app.state.saved.palettes.len(), 1);

        app.state.saved.clear();
        app.handle_event(
            Event::Network(NetworkEvent::PalettesLoaded {
                palettes,
                owner: "V".into(),
            }),
            &tx,
        );
        assert!(app.state.saved.palettes.is_empty());
        assert!(!app.state.saved.loaded);
    }

    #[tokio::test]
    async fn test_resize_keeps_cursor_in_range() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = app_with(Arc::default(), RecordingClipboard::new(Mode::Works));
        for _ in 0..4 {
            app.handle_action(Action::CursorRight, &tx);
        }
        assert_eq!(app.state.cursor, 4);

        app.handle_action(Action::SizeDown, &tx);
        assert_eq!(app.state.palette.len(), 4);
        assert_eq!(app.state.cursor, 3);
    }
}
