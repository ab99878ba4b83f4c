use std::path::PathBuf;

/// Errors reported while scanning argv.
///
/// Every variant except [`ParseError::Value`], [`ParseError::MissingRequiredFlag`]
/// and [`ParseError::MissingRequiredArgument`] is structural: it halts the scan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unrecognized flag {0}")]
    UnrecognizedFlag(String),

    #[error("{0} does not take an argument")]
    FlagTakesNoArgument(String),

    #[error("{0} requires an argument")]
    MissingFlagValue(String),

    #[error("{flag} may be used at most {max} time(s)")]
    FlagRepeated { flag: String, max: usize },

    #[error("extra argument {0}")]
    ExtraArgument(String),

    #[error("stray dash")]
    StrayDash,

    #[error("{0} is required")]
    MissingRequiredFlag(String),

    #[error("argument {0:?} is required")]
    MissingRequiredArgument(String),

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl ParseError {
    /// Whether this error halts the scan by itself.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            Self::Value(_) | Self::MissingRequiredFlag(_) | Self::MissingRequiredArgument(_)
        )
    }
}

/// Conversion failures produced by value parsers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("{text:?} cannot be converted into an {type_name}")]
    InvalidInteger { text: String, type_name: String },

    #[error("{text:?} is not in {set}")]
    NotInSet { text: String, set: String },

    #[error("{}: no such file or directory", .0.display())]
    NoSuchFile(PathBuf),
}

/// Registry definition problems, detected by [`crate::AppBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("flag has no name")]
    Nameless,

    #[error("invalid flag name {0:?}")]
    InvalidName(String),

    #[error("tried to redefine --{0}")]
    DuplicateLong(String),

    #[error("tried to redefine -{0}")]
    DuplicateShort(char),

    #[error("{0} has a default value but no value handler")]
    DefaultWithoutValue(String),

    #[error("{flag} requires {min} use(s) but allows at most {max}")]
    InvalidBounds { flag: String, min: usize, max: usize },
}
