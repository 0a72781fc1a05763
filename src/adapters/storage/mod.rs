//! Output storage adapter
//!
//! [`OutputStore`] is the capability the export coordinator writes through;
//! [`LocalDirectory`] is the filesystem implementation.

pub mod local;
pub mod traits;

pub use local::LocalDirectory;
pub use traits::OutputStore;
