use crate::segment_tree::OperationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("operation on an empty structure")]
    Empty,
    #[error("invalid range {begin}..{end}: the len is {len}")]
    InvalidRange {
        begin: usize,
        end: usize,
        len: usize,
    },
    #[error("operation {0} is not registered")]
    UnknownOperation(OperationId),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects `begin..end` unless `begin < end <= len`.
#[inline]
pub(crate) fn check_range(begin: usize, end: usize, len: usize) -> Result<()> {
    if len == 0 {
        Err(Error::Empty)
    } else if begin >= end || end > len {
        Err(Error::InvalidRange { begin, end, len })
    } else {
        Ok(())
    }
}
