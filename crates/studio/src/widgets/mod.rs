pub mod scrubber;
pub mod thumbnails;
