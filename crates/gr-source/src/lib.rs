/// Frame sources for glyphreel: ffmpeg-decoded video and pre-decoded GIF.

pub mod gif;
pub mod video;

pub use gif::GifReader;
pub use video::VideoReader;
