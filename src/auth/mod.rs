pub mod credentials;

pub use credentials::{CredentialSource, resolve};
