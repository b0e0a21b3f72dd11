#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Multi-species automata where every live cell carries a colour.

pub mod color;
pub mod rock_paper_scissors;

pub use color::LifeInColor;
pub use rock_paper_scissors::RockPaperScissorsLife;
