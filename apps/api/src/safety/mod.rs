// Ratings on connections and the safety protocol they can trigger.

pub mod handlers;
pub mod protocol;
pub mod ratings;
