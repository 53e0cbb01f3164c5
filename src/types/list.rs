// src/types/list.rs

//! # List Type Support
//!
//! Lists are stored as a `VecDeque<String>` so both ends pop in O(1).
//! Popping the last element leaves an empty list behind: the key keeps
//! existing and further pops report the nil sentinel rather than
//! "not found".
//!
//! Supported commands:
//! - `LLEN`
//! - `RPUSH`
//! - `LPOP`
//! - `RPOP`
//! - `LRANGE`

use crate::engine::kv::Keyspace;
use crate::error::StoreError;

/// Execute LLEN: length of the list stored at `key`.
///
/// # Errors
///
/// `NotFound` if the key is absent, `WrongType` if it holds another type.
pub fn llen(ks: &Keyspace, key: &str) -> Result<usize, StoreError> {
    Ok(ks.list(key)?.len())
}

/// Execute RPUSH:
/// Append `values` to the tail (right) of the list stored at `key`,
/// creating the list if it does not exist.
///
/// # Returns
///
/// The new length of the list.
pub fn rpush(ks: &mut Keyspace, key: &str, values: &[String]) -> Result<usize, StoreError> {
    let list = ks.list_or_create(key)?;
    list.extend(values.iter().cloned());
    Ok(list.len())
}

/// Execute LPOP:
/// Pop the head (leftmost) element of the list at `key`.
///
/// # Returns
///
/// `Some(element)`, or `None` if the list exists but is empty.
pub fn lpop(ks: &mut Keyspace, key: &str) -> Result<Option<String>, StoreError> {
    Ok(ks.list_mut(key)?.pop_front())
}

/// Execute RPOP:
/// Pop the tail (rightmost) element of the list at `key`.
pub fn rpop(ks: &mut Keyspace, key: &str) -> Result<Option<String>, StoreError> {
    Ok(ks.list_mut(key)?.pop_back())
}

/// Execute LRANGE:
/// Return the elements whose zero-based index lies in `[start, stop)`.
///
/// `stop` past the end is clamped to the list length. An empty result
/// (empty list, `start >= len`, or `start >= stop`) is returned as an empty
/// `Vec`; the dispatcher renders it as the nil sentinel.
pub fn lrange(ks: &Keyspace, key: &str, start: u64, stop: u64) -> Result<Vec<String>, StoreError> {
    let list = ks.list(key)?;
    let len = list.len() as u64;
    let stop = stop.min(len);
    if start >= stop {
        return Ok(Vec::new());
    }
    Ok(list
        .range(start as usize..stop as usize)
        .cloned()
        .collect())
}
