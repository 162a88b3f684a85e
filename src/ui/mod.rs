//! Rendering: every function takes the [`AppState`](crate::state::AppState)
//! and draws into an egui `Ui`. Mutations go through the state's setters.

pub mod charts;
pub mod panels;
pub mod table;
