//! Query value built from command-line words

use crate::errors::{ClientError, Result};
use std::fmt;

/// A non-empty research query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Join words with single spaces.
    ///
    /// Fails with [`ClientError::EmptyQuery`] when the joined text is empty.
    pub fn from_args<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (i, word) in words.into_iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(word.as_ref());
        }

        if text.is_empty() {
            return Err(ClientError::EmptyQuery);
        }

        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
