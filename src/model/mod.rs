pub mod annotation;
pub mod interval;
pub mod transcript;

pub use annotation::{LabelList, TranscriptAnnotation};
pub use interval::{ChromosomeInterval, Strand};
pub use transcript::{remove_alignment_number, Transcript};
