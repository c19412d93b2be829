pub mod d404_behaviours;
