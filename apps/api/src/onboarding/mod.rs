// Onboarding: basic info -> skills -> location -> complete.
// Each step is a typed transition on a draft the client carries between calls.

pub mod handlers;
pub mod steps;
