pub mod channel_ops;
pub mod registration;
