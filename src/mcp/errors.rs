pub const INVALID_INPUT: &str = "invalid_input";
pub const MISSING_CONFIG: &str = "missing_config";
pub const MALFORMED_CREDENTIAL: &str = "malformed_credential";
pub const REMOTE_ERROR: &str = "remote_error";
pub const JOB_FAILED: &str = "job_failed";
pub const MISSING_ARTIFACT: &str = "missing_artifact";
pub const POLL_TIMEOUT: &str = "poll_timeout";
pub const INTERNAL_ERROR: &str = "internal_error";
