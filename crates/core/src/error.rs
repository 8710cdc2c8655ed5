use thiserror::Error;

use crate::model::{ParseIdError, UnknownRole};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
    #[error(transparent)]
    Role(#[from] UnknownRole),
}
