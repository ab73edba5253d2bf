// Matching: country + skill candidate retrieval, then either store order
// or proximity ranking around the finder's coordinate.

pub mod handlers;
pub mod proximity;
pub mod search;
