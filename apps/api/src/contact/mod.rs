// Contact gate: a fee quote per finder country, then the connection record
// that reveals the worker's contact details.

pub mod fees;
pub mod handlers;
