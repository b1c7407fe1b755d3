pub mod body;
pub mod compose;
pub mod sync;
pub mod text;
