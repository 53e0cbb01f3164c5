// src/types/mod.rs

//! # Value Types
//!
//! Every key holds exactly one [`Value`]. The variant decides which commands
//! are legal against the key:
//!
//! - [`string`] : `GET` / `SET`
//! - [`list`]   : `LLEN` / `RPUSH` / `LPOP` / `RPOP` / `LRANGE`
//! - [`set`]    : `SADD` / `SCARD` / `SMEMBERS` / `SREM` / `SINTER`
//!
//! The command functions in the submodules work on a borrowed
//! [`Keyspace`](crate::engine::kv::Keyspace); locking is the caller's job.

pub mod list;
pub mod set;
pub mod string;

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Tagged payload stored under a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    List(VecDeque<String>),
    Set(HashSet<String>),
}
