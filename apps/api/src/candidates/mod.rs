// Candidate records owned by the signed-in user.

pub mod handlers;
