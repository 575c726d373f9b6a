pub mod clock;
pub mod cue;
pub mod scene;
