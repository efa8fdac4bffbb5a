//! Pure renderers. Every function here is deterministic and IO-free.

#![forbid(unsafe_code)]

mod dot;
mod markdown;
mod tree;

pub use dot::render_dot;
pub use markdown::render_markdown;
pub use tree::{render_plain, render_tree};
