//! Wire types shared by the dashboard front ends and the scoring-service client.

pub mod domain;
pub mod error;
pub mod protocol;
