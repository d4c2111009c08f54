//! Identity adapters.
//!
//! - `StaticTokenIdentityProvider` - Token → caller map

mod static_tokens;

pub use static_tokens::StaticTokenIdentityProvider;
