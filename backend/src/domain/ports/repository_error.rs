//! Error type shared by the entity repository ports.

use super::{ContentSourceError, define_port_error};

define_port_error! {
    /// Failures raised by post, media and user repositories.
    pub enum RepositoryError {
        /// The backing store could not be reached.
        Unavailable { message: String } => "repository backend unavailable: {message}",
        /// The backing store did not answer in time.
        Timeout { message: String } => "repository backend timed out: {message}",
        /// The backing store refused the caller.
        Forbidden { message: String } => "repository access refused: {message}",
        /// The query failed inside the backing store.
        Query { message: String } => "repository query failed: {message}",
        /// A stored record could not be mapped into a domain entity.
        Mapping { message: String } => "repository record mapping failed: {message}",
        /// The adapter does not implement the operation.
        Unsupported { operation: String } => "repository operation not supported: {operation}",
    }
}

impl From<ContentSourceError> for RepositoryError {
    fn from(value: ContentSourceError) -> Self {
        match value {
            ContentSourceError::Transport { message } => Self::Unavailable { message },
            ContentSourceError::Timeout { message } => Self::Timeout { message },
            ContentSourceError::Forbidden { message } => Self::Forbidden { message },
            ContentSourceError::Rejected { message } => Self::Query { message },
            ContentSourceError::Decode { message } => Self::Mapping { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ContentSourceError::transport("down"), RepositoryError::unavailable("down"))]
    #[case(ContentSourceError::timeout("slow"), RepositoryError::timeout("slow"))]
    #[case(ContentSourceError::forbidden("origin"), RepositoryError::forbidden("origin"))]
    #[case(ContentSourceError::rejected("bad where"), RepositoryError::query("bad where"))]
    #[case(ContentSourceError::decode("not json"), RepositoryError::mapping("not json"))]
    fn content_source_errors_keep_their_category(
        #[case] source: ContentSourceError,
        #[case] expected: RepositoryError,
    ) {
        assert_eq!(RepositoryError::from(source), expected);
    }

    #[rstest]
    fn unsupported_names_the_operation() {
        let err = RepositoryError::unsupported("media.save");
        assert_eq!(err.to_string(), "repository operation not supported: media.save");
    }
}
