pub mod palette;
pub mod view;
pub mod rle;
pub mod compose;
pub mod export;
