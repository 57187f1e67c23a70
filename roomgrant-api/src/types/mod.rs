/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Wire types for the token service.
//!
//! Request bodies, the `{ "success", "result" }` response envelope and the
//! structured error body. Framework-agnostic so clients can reuse them.

pub mod error;
pub mod requests;
pub mod responses;

pub use error::APIError;
pub use responses::APIResponse;
