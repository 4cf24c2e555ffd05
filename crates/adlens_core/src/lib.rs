//! Core data types for adlens.
//!
//! Two families of types live here: the chat types every model driver speaks
//! (`Role`, `Message`, `GenerateRequest`, `GenerateResponse`, `Output`) and the
//! domain types that flow between pipeline agents (tasks, hypotheses,
//! evaluations, creatives).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod creative;
mod evaluation;
mod insight;
mod message;
mod output;
mod request;
mod role;
mod task;

pub use creative::Creative;
pub use evaluation::{Evaluation, Priority, Recommendation, Strength, ValidatedHypothesis};
pub use insight::{Hypothesis, Insights};
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use task::{AgentKind, Task};
