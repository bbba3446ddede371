pub mod add;
pub mod diff;
