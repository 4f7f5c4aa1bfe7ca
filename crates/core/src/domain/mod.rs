// Domain Layer - Pure text encoding

pub mod codec;
pub mod text;

// Re-exports
pub use codec::{encode, measure, until_nul, Codec, Step, TruncatedSequence, REPLACEMENT};
pub use text::Utf16Text;
