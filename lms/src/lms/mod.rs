//! Everything related to LMS (and not LM-OTS)

pub(crate) mod modes;
mod private;
mod public;
mod shared;
pub mod signature;
mod tree;

pub use modes::{
    LmsMode, LmsModeInternal, LmsSha256M24H10, LmsSha256M24H15, LmsSha256M24H20,
    LmsSha256M24H25, LmsSha256M24H5, LmsSha256M32H10, LmsSha256M32H15, LmsSha256M32H20,
    LmsSha256M32H25, LmsSha256M32H5,
};
pub use private::SigningKey;
pub use public::VerifyingKey;
pub use shared::SharedSigningKey;
pub use signature::Signature;
