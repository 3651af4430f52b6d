pub mod email;
pub mod message;
