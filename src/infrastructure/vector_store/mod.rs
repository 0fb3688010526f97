//! Vector store implementations

mod pinecone;

pub use pinecone::{PineconeStore, DEFAULT_PINECONE_CONTROL_URL};
