pub mod category;
pub mod channel;
