//! Gemini REST adapter
//!
//! Implements JudgeGateway against the Gemini `generateContent` endpoint.

pub mod credentials;
pub mod gateway;
pub mod protocol;
