pub mod init;
pub mod insert_permit;
