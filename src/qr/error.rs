use thiserror::Error;

/// Failure to build a QR symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    #[error(
        "The amount of data is too big to be stored in a QR Code \
         ({needed} bits needed, {capacity} available)"
    )]
    DataTooLong { needed: usize, capacity: usize },
}
