//! # UI Module
//!
//! The terminal dashboard: state, rendering, input handling and terminal
//! ownership.
//!
//! ## Components
//!
//! - [`App`] - Selection cursor, output history and quit flag
//! - [`mod@buffer`] - Bounded line history with a scroll offset
//! - [`mod@render`] - Layout and drawing
//! - [`mod@event`] - Key handling and the blocking event loop
//! - [`mod@terminal`] - Raw-mode guard that always restores the terminal
//!
//! ## Layout
//!
//! ```text
//! ┌─────────┬─────────────────────────────────────┐
//! │ build   │ Output                              │
//! │ clean   │                                     │
//! │ info    │   (window into the output buffer,   │
//! │ ...     │    clipped to the pane)             │
//! │ exit    │                                     │
//! └─────────┴─────────────────────────────────────┘
//!  [↑↓] Navigate  [Enter] Run  [PgUp/PgDn] Scroll  [q/Esc] Quit
//! ```

pub mod app;
pub mod buffer;
pub mod event;
pub mod render;
pub mod terminal;

pub use app::App;
pub use buffer::OutputBuffer;
pub use event::{run_app, CrosstermEventReader, EventReader};
pub use render::render;
pub use terminal::TerminalGuard;
