pub mod reader;

pub use reader::{ReadOptions, ReadReport, ReaderController};
