use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HintReveal {
    pub step_id: u32,
    pub hint: String,
    /// 1-based position of this hint in the step's list.
    pub hint_number: usize,
    pub hints_remaining: usize,
}

#[derive(Debug, Deserialize)]
pub struct VerifyQrRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QrVerification {
    pub step_id: u32,
    pub verified: bool,
}
