use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// A wake-up requested through [`Tui::wake_at`](super::Tui::wake_at) is due.
    Wake,
    /// State changed since the last draw.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
