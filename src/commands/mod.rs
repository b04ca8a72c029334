pub mod dry;
pub mod init;
pub mod status;
pub mod sync;
