/// Filesystem adapters for dataset input and report output
mod dataset_reader;
mod file_writer;

pub use dataset_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
