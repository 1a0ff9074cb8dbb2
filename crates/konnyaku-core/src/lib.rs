pub mod language;
pub mod mode;
pub mod partial;
pub mod preprocess;
pub mod sse;
