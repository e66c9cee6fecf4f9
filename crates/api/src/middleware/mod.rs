/// Bearer-token verification and role guards
pub mod auth;
/// `LabError` to HTTP response mapping
pub mod error_handling;
