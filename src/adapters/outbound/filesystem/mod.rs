pub mod file_writer;
pub mod snapshot;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use snapshot::{read_snapshot, write_snapshot, SnapshotInventorySource};
