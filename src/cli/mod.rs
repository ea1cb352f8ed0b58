pub mod check_mechanics;
pub mod count_points;
pub mod parse;
pub mod select;
