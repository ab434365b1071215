use std::error::Error;
use std::fmt;
use std::io;

/// Errors raised while encoding a raw record against the category schema.
#[derive(Debug)]
pub enum EncodeError {
    /// A required attribute key was absent from the input.
    MissingAttribute(String),
    /// An input value was not found in the attribute's fixed vocabulary.
    UnknownCategory { attribute: String, value: String },
    /// An ordered input row carried more values than the schema has
    /// attributes.
    TooManyValues { expected: usize, got: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodeError::MissingAttribute(name) => {
                write!(f, "Missing required attribute '{}'", name)
            }
            EncodeError::UnknownCategory { attribute, value } => {
                write!(f, "Unknown category '{}' for attribute '{}'", value, attribute)
            }
            EncodeError::TooManyValues { expected, got } => {
                write!(f, "Row has {} values but the schema has {} attributes", got, expected)
            }
        }
    }
}

impl Error for EncodeError {}

/// Errors raised during model inference. These indicate an internal
/// consistency fault (the encoder was bypassed or a stale schema was used),
/// not bad user input.
#[derive(Debug)]
pub enum PredictError {
    CategoryIndexOutOfRange {
        attribute: String,
        index: usize,
        num_categories: usize,
    },
    AttributeCountMismatch { expected: usize, got: usize },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictError::CategoryIndexOutOfRange {
                attribute,
                index,
                num_categories,
            } => write!(
                f,
                "Encoded index {} for attribute '{}' is out of range (attribute has {} categories)",
                index, attribute, num_categories
            ),
            PredictError::AttributeCountMismatch { expected, got } => write!(
                f,
                "Encoded record has {} attributes but the model expects {}",
                got, expected
            ),
        }
    }
}

impl Error for PredictError {}

/// Errors raised while fitting the model.
#[derive(Debug)]
pub enum TrainError {
    LengthMismatch { rows: usize, labels: usize },
    EmptyDataset,
    /// A training row carries an index outside its attribute's vocabulary.
    CategoryIndexOutOfRange {
        attribute: String,
        index: usize,
        num_categories: usize,
    },
    /// A training row has a different arity than the schema.
    AttributeCountMismatch { expected: usize, got: usize },
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrainError::LengthMismatch { rows, labels } => write!(
                f,
                "Encoded rows ({}) and labels ({}) must have equal length",
                rows, labels
            ),
            TrainError::EmptyDataset => write!(f, "Cannot fit a model on an empty training set"),
            TrainError::CategoryIndexOutOfRange {
                attribute,
                index,
                num_categories,
            } => write!(
                f,
                "Training row index {} for attribute '{}' is out of range (attribute has {} categories)",
                index, attribute, num_categories
            ),
            TrainError::AttributeCountMismatch { expected, got } => write!(
                f,
                "Training row has {} attributes but the schema expects {}",
                got, expected
            ),
        }
    }
}

impl Error for TrainError {}

/// Errors raised while loading or saving the serialized pipeline artifact.
/// A load failure is fatal to a serving process: without the artifact no
/// predictions can be made.
#[derive(Debug)]
pub enum ArtifactError {
    Io(io::Error),
    Parse(serde_json::Error),
    UnsupportedVersion(u32),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArtifactError::Io(e) => write!(f, "Failed to read or write artifact: {}", e),
            ArtifactError::Parse(e) => write!(f, "Artifact is corrupt or not a valid pipeline: {}", e),
            ArtifactError::UnsupportedVersion(v) => {
                write!(f, "Artifact format version {} is not supported", v)
            }
        }
    }
}

impl Error for ArtifactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArtifactError::Io(e) => Some(e),
            ArtifactError::Parse(e) => Some(e),
            ArtifactError::UnsupportedVersion(_) => None,
        }
    }
}

impl From<io::Error> for ArtifactError {
    fn from(e: io::Error) -> Self {
        ArtifactError::Io(e)
    }
}

impl From<serde_json::Error> for ArtifactError {
    fn from(e: serde_json::Error) -> Self {
        ArtifactError::Parse(e)
    }
}

/// Request-scoped error for the combined encode-then-predict path.
#[derive(Debug)]
pub enum PipelineError {
    Encode(EncodeError),
    Predict(PredictError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::Encode(e) => e.fmt(f),
            PipelineError::Predict(e) => e.fmt(f),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Encode(e) => Some(e),
            PipelineError::Predict(e) => Some(e),
        }
    }
}

impl From<EncodeError> for PipelineError {
    fn from(e: EncodeError) -> Self {
        PipelineError::Encode(e)
    }
}

impl From<PredictError> for PipelineError {
    fn from(e: PredictError) -> Self {
        PipelineError::Predict(e)
    }
}
