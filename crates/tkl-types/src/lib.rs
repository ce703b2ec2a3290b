pub mod models;

pub use models::{Cursor, Message};
