pub mod use_random;

pub use use_random::*;
