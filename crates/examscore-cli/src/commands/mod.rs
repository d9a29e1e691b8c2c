pub mod aggregate;
pub mod band;
pub mod init;
pub mod score;
pub mod validate;
