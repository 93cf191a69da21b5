pub mod credentials;
pub mod posts;
pub mod sessions;

pub use credentials::{CredentialStore, ProvisionOutcome};
pub use posts::ContentStore;
pub use sessions::SessionStore;
