pub mod loggers;
pub mod time;
