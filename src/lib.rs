//! # Steward
//!
//! An HTTP service that routes employee benefits requests to tool-calling
//! LLM agents.
//!
//! This library provides:
//! - An HTTP API for submitting requests to named agents
//! - A tool-resolution loop that alternates model calls with tool execution
//! - An OpenAI Responses API client with typed tool schemas
//!
//! ## Architecture
//!
//! One request flows through four layers:
//! 1. The API stages any uploaded files and resolves agent names
//! 2. The workflow wraps the invocation in timeout and retry policy
//! 3. The agent loop feeds tool results back to the model until it answers
//! 4. The tool catalog executes benefits tools, reporting failures inline
//!
//! ## Example
//!
//! ```rust,ignore
//! use steward::{api, Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod api;
pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod staging;
pub mod tools;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
