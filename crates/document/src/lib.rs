//! Document metadata handling: a minimal front-matter codec and the
//! truncated body digest used for tamper checks.
//!
//! The metadata model is a closed tagged union (scalar or list of strings)
//! behind an insertion-ordered mapping, so decode/encode round-trips keep
//! both values and key order intact.

pub mod codec;
pub mod digest;
pub mod value;

pub use codec::{compose, decode, encode};
pub use digest::{digest10, DIGEST_LEN};
pub use value::{FrontMatter, Scalar, Value};
