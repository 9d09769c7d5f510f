pub mod org_acme;
pub mod utils;
