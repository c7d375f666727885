use std::path::PathBuf;

/// Failures while turning files on disk into contract descriptions.
/// Generation itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {detail}", path.display())]
    Json { path: PathBuf, detail: String },
    #[error("{} is neither an ABI array nor an artifact with an `abi` key", path.display())]
    MissingAbi { path: PathBuf },
    #[error(transparent)]
    GlobPattern(#[from] glob::PatternError),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error("glob pattern matched no files: {pattern}")]
    NoMatch { pattern: String },
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = LoadError::Json { path: "fixtures/x.json".into(), detail: "at JSON path name → missing field".into() };
        assert_eq!(err.to_string(), "invalid JSON in fixtures/x.json: at JSON path name → missing field");
        let err = LoadError::MissingAbi { path: "out/A.json".into() };
        assert!(err.to_string().starts_with("out/A.json is neither"));
    }
}
