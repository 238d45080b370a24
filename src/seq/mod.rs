pub mod store;

pub use store::{load_sequences, Sequence, SequenceStore, StoreMeta};
