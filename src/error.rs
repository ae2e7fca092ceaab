use crate::graph6::Graph6Error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed diagram: no `{marker}` marker to anchor annotations")]
    MissingAnchor { marker: &'static str },

    #[error("malformed diagram: `{close}` comes before `{scope}`")]
    MisplacedAnchor {
        scope: &'static str,
        close: &'static str,
    },

    #[error("node id `{id}` leaves no room for another annotation id")]
    IdOutOfRange { id: String },

    #[error("layout has no position for vertex `{id}`")]
    MissingPosition { id: String },

    #[error("record {row}: missing `{column}` column")]
    MissingColumn { row: usize, column: &'static str },

    #[error("record {row} ({name}): {source}")]
    Record {
        row: usize,
        name: String,
        #[source]
        source: Graph6Error,
    },

    #[error(transparent)]
    Decode(#[from] Graph6Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
