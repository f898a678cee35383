pub mod concat;
pub mod executable;
pub mod player;

pub use concat::{AudioConcatenator, FfmpegConcatenator};
pub use player::AudioPlayer;
