pub mod d404_behaviours;

pub use d404_behaviours::ui::Behaviours;
