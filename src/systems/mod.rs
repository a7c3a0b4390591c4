pub mod assembly;
pub mod grid;
pub mod ui;
