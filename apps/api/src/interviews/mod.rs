// Read-side interview accessors. Interviews are written by the interview-generation
// workflow; this service only queries them.

pub mod handlers;
