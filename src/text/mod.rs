pub mod chars;
pub mod index;
pub mod location;
pub mod string;

pub use index::TextIndex;
pub use location::{utf16_offset, LineIndex, Location};
