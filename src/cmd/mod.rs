pub mod catalog;
pub mod optimize;
pub mod random;
pub mod score;
