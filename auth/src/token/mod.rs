pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::InvalidRole;
pub use claims::Role;
pub use claims::SessionClaims;
pub use codec::TokenCodec;
pub use errors::TokenError;
