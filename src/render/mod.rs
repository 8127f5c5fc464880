pub mod canvas;
pub mod fit;
pub mod renderer;
pub mod schedule;
