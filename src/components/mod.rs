//! UI components

pub mod detail_view;
pub mod list_view;
pub mod shell;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_view::{DetailView, DetailViewProps};
pub use list_view::{list_cards, Card, ListView, ListViewProps};
pub use shell::{shell_layout, PokedexShell, PokedexShellProps, TITLE};
