pub mod index;
pub mod text;
pub mod mention;
pub mod batch;
pub mod wikilink;
pub mod render;

#[cfg(test)]
mod tests;

pub use index::*;
pub use mention::*;
pub use batch::*;
pub use wikilink::*;
pub use render::*;
