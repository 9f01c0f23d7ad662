//! Shared response envelopes.

use serde::Serialize;

/// Standard `{ "data": T }` envelope for reads.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
