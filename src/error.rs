use thiserror::Error;

/// Top-level error type for geogen.
#[derive(Debug, Error)]
pub enum GeogenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors in the user-supplied parameter set.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one airfoil station is required")]
    NoStations,

    #[error("{given} stations were given, but at most {max} are supported")]
    TooManyStations { given: usize, max: usize },

    #[error("\"{name}\" has {given} entries, but {expected} were expected")]
    LengthMismatch {
        name: &'static str,
        given: usize,
        expected: usize,
    },

    #[error("\"{name}\" must be strictly positive, but {value} was given")]
    NotPositive { name: &'static str, value: f64 },

    #[error("\"{name}\" must be finite, but {value} was given")]
    NotFinite { name: &'static str, value: f64 },

    #[error("domain type can be either \"box\" or \"sphere\", but \"{0}\" was given")]
    UnknownDomain(String),

    #[error("missing \"{field}\" for the {domain} domain")]
    MissingField {
        domain: &'static str,
        field: &'static str,
    },

    #[error("invalid box bounds: {0}")]
    InvalidBounds(String),
}

/// Errors raised while reserving entity ID ranges.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("{key}: {requested} IDs requested, but only {capacity} are reserved")]
    CapacityExceeded {
        key: String,
        requested: usize,
        capacity: u32,
    },

    #[error("{key} overlaps {other} in the {class} ID space")]
    Overlap {
        key: String,
        other: String,
        class: &'static str,
    },

    #[error("{0}: range already reserved")]
    AlreadyReserved(String),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("airfoil has {given} distinct points, but at least {min} are required")]
    TooFewPoints { given: usize, min: usize },

    #[error("station {station}: break indices {indices:?} are not strictly increasing within 0..{len}")]
    BreakPoints {
        station: usize,
        indices: Vec<usize>,
        len: usize,
    },

    #[error("wingtip mean line: break indices (aft {aft}, forward {fwd}) are not strictly increasing within 0..{len}")]
    TipBreakPoints { aft: usize, fwd: usize, len: usize },

    #[error("station {station}: trailing edge slope sample {n_slope} does not lie on both surfaces")]
    SlopeSample { station: usize, n_slope: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the assembled topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("duplicate {class} id {id}")]
    DuplicateId { class: &'static str, id: u32 },

    #[error("entity not found: {class} {id}")]
    EntityNotFound { class: &'static str, id: u32 },

    #[error("curve loop {0} is not closed")]
    LoopNotClosed(u32),

    #[error("curve loop {id} passes through point {point} more than once")]
    LoopNotSimple { id: u32, point: u32 },

    #[error("volume {volume}: curve {curve} bounds {count} surfaces instead of 2")]
    NotWatertight { volume: u32, curve: u32, count: usize },

    #[error("volume {volume}: surfaces meeting at curve {curve} are not consistently oriented")]
    MisOriented { volume: u32, curve: u32 },
}

/// Features that are declared but not available.
#[derive(Debug, Error)]
pub enum UnsupportedError {
    #[error("rounded wingtip is not implemented")]
    RoundedWingtip,
}

/// Errors while reading text inputs.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Airfoil { line: usize, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`GeogenError`].
pub type Result<T> = std::result::Result<T, GeogenError>;
