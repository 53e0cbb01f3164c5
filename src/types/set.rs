// src/types/set.rs

//! # Set Type Support
//!
//! Sets are stored as a `HashSet<String>`; member order is unspecified.
//!
//! Supported commands:
//! - `SADD`
//! - `SCARD`
//! - `SMEMBERS`
//! - `SREM`
//! - `SINTER`

use crate::engine::kv::Keyspace;
use crate::error::StoreError;
use crate::types::Value;

/// Execute the SADD command:
/// Add `members` to the set stored at `key`, creating it if needed.
///
/// # Returns
///
/// The number of members that were not already present. Duplicates inside
/// `members` count once.
pub fn sadd(ks: &mut Keyspace, key: &str, members: &[String]) -> Result<usize, StoreError> {
    let set = ks.set_or_create(key)?;
    Ok(members
        .iter()
        .filter(|m| set.insert((*m).clone()))
        .count())
}

/// Execute the SCARD command: number of members in the set at `key`.
pub fn scard(ks: &Keyspace, key: &str) -> Result<usize, StoreError> {
    Ok(ks.set(key)?.len())
}

/// Execute the SMEMBERS command: all members of the set at `key`.
pub fn smembers(ks: &Keyspace, key: &str) -> Result<Vec<String>, StoreError> {
    Ok(ks.set(key)?.iter().cloned().collect())
}

/// Execute the SREM command:
/// Remove `members` from the set at `key`.
///
/// # Returns
///
/// The number of members actually removed.
pub fn srem(ks: &mut Keyspace, key: &str, members: &[String]) -> Result<usize, StoreError> {
    let set = ks.set_mut(key)?;
    Ok(members.iter().filter(|m| set.remove(m.as_str())).count())
}

/// Execute the SINTER command: members common to every set in `keys`.
///
/// Keys are validated left to right; the first missing or non-set key
/// aborts the call with an error naming that key.
pub fn sinter(ks: &Keyspace, keys: &[String]) -> Result<Vec<String>, StoreError> {
    let mut sets = Vec::with_capacity(keys.len());
    for key in keys {
        match ks.data.get(key.as_str()) {
            Some(Value::Set(s)) => sets.push(s),
            Some(_) => return Err(StoreError::KeyWrongType(key.clone())),
            None => return Err(StoreError::KeyNotFound(key.clone())),
        }
    }

    // 从最小的集合开始求交集
    sets.sort_by_key(|s| s.len());
    let Some((smallest, rest)) = sets.split_first() else {
        return Ok(Vec::new());
    };
    Ok(smallest
        .iter()
        .filter(|m| rest.iter().all(|s| s.contains(*m)))
        .cloned()
        .collect())
}
