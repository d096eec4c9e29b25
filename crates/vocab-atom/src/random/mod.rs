mod interface;
mod seeded;
mod thread;

pub use interface::*;
pub use seeded::*;
pub use thread::*;
