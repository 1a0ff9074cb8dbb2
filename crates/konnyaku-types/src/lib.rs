pub mod types;

pub use types::{AppEvent, DictionaryRecord, ProcessorResult};
