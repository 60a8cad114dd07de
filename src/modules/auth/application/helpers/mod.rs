pub mod session_fingerprint;

pub use session_fingerprint::session_fingerprint;
