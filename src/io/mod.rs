pub mod memory;
pub mod output;
pub mod real;
pub mod traits;

pub use memory::MemoryFileSystem;
pub use output::{write_report, OutputFormat};
pub use real::RealFileSystem;
pub use traits::FileSystem;
