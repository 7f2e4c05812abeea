pub mod item;
pub mod state;

pub use item::ContentItem;
pub use state::{Observation, PollState};
