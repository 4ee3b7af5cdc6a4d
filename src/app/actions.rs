use super::state::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextScreen,
    PrevScreen,
    SetScreen(Screen),
    Resize,

    // Generator
    CursorLeft,
    CursorRight,
    GeneratePalette,
    RegenerateUnlocked,
    ToggleLockSelected,
    SizeUp,
    SizeDown,
    CopySelected,
    CopyPalette,
    SavePalette,

    // Saved palettes
    ListUp,
    ListDown,
    ColorLeft,
    ColorRight,
    RefreshSaved,
    CopySavedColor,
    CopySavedPalette,
    RequestDelete,

    // Prompt
    ConfirmPrompt,
    DismissPrompt,

    // Account
    InputChar(char),
    Backspace,
    AccountFocusNext,
    ToggleAccountMode,
    SubmitAccount,
    SignOut,
}
