mod fs_upload_store;

pub use fs_upload_store::*;
