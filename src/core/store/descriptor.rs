//! Environment descriptor (`nv.json`).

use serde::{Deserialize, Serialize};

use crate::core::cipher::EncryptionMemo;

/// Plaintext metadata describing one environment.
///
/// Written once at creation; only `encryption` and `venv` may be filled in
/// afterwards. Absent optional fields are written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub project_name: String,
    #[serde(default)]
    pub environment_name: String,
    #[serde(default)]
    pub aws_profile: Option<String>,
    #[serde(default)]
    pub encryption: Option<EncryptionMemo>,
    /// Toolchain name. Older descriptors call this `pew`.
    #[serde(default, alias = "pew")]
    pub venv: Option<String>,
}

impl Descriptor {
    /// Whether secrets of this environment are encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.encryption.is_some()
    }

    /// Prompt nickname: `project` or `project:environment`.
    pub fn nickname(&self) -> String {
        if self.environment_name.is_empty() {
            self.project_name.clone()
        } else {
            format!("{}:{}", self.project_name, self.environment_name)
        }
    }
}
