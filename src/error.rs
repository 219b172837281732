use thiserror::Error;

use crate::color::VertexId;

/** errors raised while reading instances or running the search */
#[derive(Debug, Error)]
pub enum ColoringError {
    /// a file could not be read or written
    #[error("unable to access {path}: {source}")]
    Io {
        /// file involved
        path: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// a JSON file could not be parsed
    #[error("unable to parse the json file {path}: {source}")]
    Json {
        /// file involved
        path: String,
        /// underlying error
        #[source]
        source: serde_json::Error,
    },

    /// a command line argument could not be parsed
    #[error("invalid value '{value}' for argument {name}")]
    InvalidArgument {
        /// argument name
        name: String,
        /// value given
        value: String,
    },

    /// the beam width must be at least 1
    #[error("invalid beam width {0} (must be at least 1)")]
    InvalidBeamWidth(usize),

    /// colors start at 1
    #[error("vertex {vertex} is pre-assigned color 0 (colors start at 1)")]
    InvalidPreAssignedColor {
        /// offending vertex
        vertex: VertexId,
    },

    /// a pre-assigned vertex does not belong to the graph
    #[error("pre-assigned vertex {0} is not in the graph")]
    UnknownPreAssignedVertex(VertexId),
}

/// result type of the crate
pub type Result<T> = std::result::Result<T, ColoringError>;
