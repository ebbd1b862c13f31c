// Adapters layer: concrete implementations of the domain ports (local files, Firebase Storage).

pub mod firebase;
pub mod local_fs;

pub use firebase::FirebaseStorage;
pub use local_fs::LocalFileSystem;
