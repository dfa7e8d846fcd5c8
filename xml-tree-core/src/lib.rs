//! Owned XML tree primitives used to build and read back generated documents.

pub mod parser;
pub mod tree;
pub mod writer;

pub use parser::{parse, ParseError};
pub use tree::XmlNode;
pub use writer::{write, write_document, WriteError};
