pub mod button;
pub mod flex;
pub mod label;
