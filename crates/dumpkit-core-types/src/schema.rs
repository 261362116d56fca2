//! Canonical schema constants for structured logging
//!
//! These constants keep field names consistent between the logging macros,
//! the test capture layer and anything that post-processes JSON logs.

// Fields every macro event carries
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Extraction fields
pub const FIELD_TABLE: &str = "table";
pub const FIELD_KEPT: &str = "kept";

// Error fields
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
