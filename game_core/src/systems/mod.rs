pub mod collision;
pub mod difficulty;
pub mod input;
pub mod movement;
pub mod scoring;
pub mod scroll;
pub mod spawn;

pub use collision::*;
pub use difficulty::*;
pub use input::*;
pub use movement::*;
pub use scoring::*;
pub use scroll::*;
pub use spawn::*;
