pub mod chat;
pub mod mood;
pub mod routine;
