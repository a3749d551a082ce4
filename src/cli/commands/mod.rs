mod context;
pub mod describe;
pub mod fix;
pub mod init;
