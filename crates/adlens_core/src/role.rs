//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Participant roles in a chat completion.
///
/// # Examples
///
/// ```
/// use adlens_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// assert_eq!(Role::System.as_wire(), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System messages carry the agent's instructions
    System,
    /// User messages carry the task prompt
    User,
    /// Assistant messages are from the model
    Assistant,
}

impl Role {
    /// Lowercase role name used by OpenAI-compatible chat APIs.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
