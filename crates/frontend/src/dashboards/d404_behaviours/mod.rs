pub mod api;
pub mod tab_state;
pub mod ui;
