pub mod meta;
pub mod ownership;
