//! Program resource models.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{ExtraFields, ProgramId, Version};
use crate::MaybeUnset;

/// Program compilation status.
///
/// `Pending`, `CompilingSql` and `CompilingRust` are transient;
/// `Success` is the only non-fatal terminal status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum ProgramStatus {
    /// Compilation request received; program is queued.
    Pending,
    /// Compilation of SQL -> Rust in progress.
    CompilingSql,
    /// Compiling Rust -> executable in progress.
    CompilingRust,
    /// Compilation succeeded.
    Success,
    /// SQL compiler returned an error.
    SqlError(Vec<SqlCompilerMessage>),
    /// Rust compiler returned an error.
    RustError(String),
    /// System/OS returned an error when trying to invoke commands.
    SystemError(String),
}

impl ProgramStatus {
    /// True if the program has been successfully compiled.
    pub fn is_fully_compiled(&self) -> bool {
        *self == ProgramStatus::Success
    }

    /// True if the program has failed to compile (for any reason).
    pub fn has_failed_to_compile(&self) -> bool {
        matches!(
            self,
            ProgramStatus::SqlError(_)
                | ProgramStatus::RustError(_)
                | ProgramStatus::SystemError(_)
        )
    }

    /// True if compilation has not reached a terminal status yet.
    pub fn is_compiling(&self) -> bool {
        matches!(
            self,
            ProgramStatus::Pending | ProgramStatus::CompilingSql | ProgramStatus::CompilingRust
        )
    }
}

/// A SQL compiler diagnostic, as reported in
/// [`ProgramStatus::SqlError`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct SqlCompilerMessage {
    pub start_line_number: usize,
    pub start_column: usize,
    pub end_line_number: usize,
    pub end_column: usize,
    pub warning: bool,
    pub error_type: String,
    pub message: String,
    #[serde(flatten)]
    #[cfg_attr(test, proptest(value = "ExtraFields::new()"))]
    pub extra: ExtraFields,
}

/// Program descriptor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProgramDescr {
    /// Unique program id.
    pub program_id: ProgramId,
    /// Unique program name.
    pub name: String,
    /// Program description.
    pub description: String,
    /// Program version, incremented every time program code is modified.
    pub version: Version,
    /// Program compilation status.
    pub status: ProgramStatus,
    /// JSON description of the SQL table and view declarations. Set by the
    /// server once compilation gets far enough; opaque to this client.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub schema: MaybeUnset<JsonValue>,
    /// SQL code of the program. Only included when requested.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub code: MaybeUnset<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Request body of `create_or_replace_program`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateOrReplaceProgramRequest {
    /// Program description.
    pub description: String,
    /// SQL code of the program.
    pub code: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Response body of `create_or_replace_program`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateOrReplaceProgramResponse {
    /// Unique id assigned to the program.
    pub program_id: ProgramId,
    /// Program version: 1 on creation, previous version +1 when the
    /// replacement changed the code.
    pub version: Version,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Request body of `compile_program`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompileProgramRequest {
    /// Latest program version known to the client; the server rejects the
    /// request with `409 Conflict` if the program has moved on.
    pub version: Version,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Response body of `upload_program_udf`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UdfResponse {
    pub message: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
