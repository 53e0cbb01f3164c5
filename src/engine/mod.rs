// src/engine/mod.rs

//! # 引擎模块
//!
//! `engine` 模块是服务器的核心。它：
//! - 从传输层接收已经分好词的命令（`Vec<String>`）。
//! - 校验参数个数和数字参数，把调用路由到 [`Store`]。
//! - 把结果格式化为响应 `String`。
//!
//! 分发层错误（参数个数、数字解析、未知命令）以 `ERROR: ` 开头；
//! 数据层的 "key not found" / WRONGTYPE 以及快照的 I/O 错误作为普通响应文本返回。
pub mod kv;
pub mod store;

pub use kv::Keyspace;
pub use store::Store;

use crate::error::{Arity, CommandError, StoreError};

/// 列表为空 / LRANGE 没有选中元素
pub const NIL: &str = "(nil)";
/// SMEMBERS 空集合
pub const EMPTY_SET: &str = "(empty set)";
/// SINTER 无交集 / KEYS 无 key
pub const EMPTY: &str = "empty";

/// 支持的命令表
pub const COMMANDS: &[&str] = &[
    "GET", "SET", "LLEN", "RPUSH", "LPOP", "RPOP", "LRANGE", "SADD", "SCARD", "SMEMBERS", "SREM",
    "SINTER", "KEYS", "DEL", "FLUSHDB", "EXPIRE", "TTL", "SAVE", "RESTORE",
];

/// 执行单个客户端命令
///
/// # 参数
///
/// * `parts` - 命令名称及其参数
/// * `store` - 目标存储
pub fn execute(parts: Vec<String>, store: &Store) -> String {
    let Some((name, args)) = parts.split_first() else {
        return render_error(CommandError::Empty);
    };
    match dispatch(name, args, store) {
        Ok(resp) => resp,
        Err(e) => render_error(e),
    }
}

/// 分发层错误的统一格式
pub fn render_error(e: CommandError) -> String {
    format!("ERROR: {}", e)
}

fn dispatch(name: &str, args: &[String], store: &Store) -> Result<String, CommandError> {
    let cmd = name.to_uppercase();
    let resp = match cmd.as_str() {
        // --- String ---
        "GET" => {
            check("GET", args, Arity::Exact(1))?;
            text(store.get(&args[0]))
        }
        "SET" => {
            check("SET", args, Arity::Exact(2))?;
            store.set(&args[0], &args[1]);
            "OK".to_string()
        }

        // --- List ---
        "LLEN" => {
            check("LLEN", args, Arity::Exact(1))?;
            count(store.llen(&args[0]))
        }
        "RPUSH" => {
            check("RPUSH", args, Arity::AtLeast(2))?;
            count(store.rpush(&args[0], &args[1..]))
        }
        "LPOP" => {
            check("LPOP", args, Arity::Exact(1))?;
            popped(store.lpop(&args[0]))
        }
        "RPOP" => {
            check("RPOP", args, Arity::Exact(1))?;
            popped(store.rpop(&args[0]))
        }
        "LRANGE" => {
            check("LRANGE", args, Arity::Exact(3))?;
            let start = parse_index(&args[1]).ok_or(CommandError::InvalidStart)?;
            let stop = parse_index(&args[2]).ok_or(CommandError::InvalidEnd)?;
            match store.lrange(&args[0], start, stop) {
                Ok(items) if items.is_empty() => NIL.to_string(),
                Ok(items) => lines(items),
                Err(e) => e.to_string(),
            }
        }

        // --- Set ---
        "SADD" => {
            check("SADD", args, Arity::AtLeast(2))?;
            count(store.sadd(&args[0], &args[1..]))
        }
        "SCARD" => {
            check("SCARD", args, Arity::Exact(1))?;
            count(store.scard(&args[0]))
        }
        "SMEMBERS" => {
            check("SMEMBERS", args, Arity::Exact(1))?;
            match store.smembers(&args[0]) {
                Ok(members) if members.is_empty() => EMPTY_SET.to_string(),
                Ok(members) => lines(members),
                Err(e) => e.to_string(),
            }
        }
        "SREM" => {
            check("SREM", args, Arity::AtLeast(2))?;
            count(store.srem(&args[0], &args[1..]))
        }
        "SINTER" => {
            check("SINTER", args, Arity::AtLeast(2))?;
            match store.sinter(args) {
                Ok(common) if common.is_empty() => EMPTY.to_string(),
                Ok(common) => lines(common),
                Err(e) => e.to_string(),
            }
        }

        // --- Keyspace ---
        "KEYS" => {
            check("KEYS", args, Arity::Exact(0))?;
            let keys = store.keys();
            if keys.is_empty() {
                EMPTY.to_string()
            } else {
                lines(keys)
            }
        }
        "DEL" => {
            check("DEL", args, Arity::Exact(1))?;
            match store.del(&args[0]) {
                Ok(()) => "1".to_string(),
                Err(e) => e.to_string(),
            }
        }
        "FLUSHDB" => {
            check("FLUSHDB", args, Arity::Exact(0))?;
            store.flushdb();
            "OK".to_string()
        }

        // --- 过期 ---
        "EXPIRE" => {
            check("EXPIRE", args, Arity::Exact(2))?;
            let secs = args[1].parse::<i64>().map_err(|_| CommandError::InvalidSeconds)?;
            if secs <= 0 {
                return Err(CommandError::NonPositiveSeconds);
            }
            match store.expire(&args[0], secs) {
                Ok(secs) => secs.to_string(),
                Err(e) => e.to_string(),
            }
        }
        "TTL" => {
            check("TTL", args, Arity::Exact(1))?;
            match store.ttl(&args[0]) {
                Ok(Some(left)) => left.to_string(),
                Ok(None) => "-1".to_string(),
                Err(e) => e.to_string(),
            }
        }

        // --- 快照 ---
        "SAVE" => {
            check("SAVE", args, Arity::Exact(0))?;
            match store.save() {
                Ok(()) => "OK".to_string(),
                Err(e) => e.to_string(),
            }
        }
        "RESTORE" => {
            check("RESTORE", args, Arity::Exact(0))?;
            match store.restore() {
                Ok(_) => "OK".to_string(),
                Err(e) => e.to_string(),
            }
        }

        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(resp)
}

/// 参数个数检查
fn check(cmd: &'static str, args: &[String], arity: Arity) -> Result<(), CommandError> {
    let ok = match arity {
        Arity::Exact(n) => args.len() == n,
        Arity::AtLeast(n) => args.len() >= n,
    };
    if ok {
        Ok(())
    } else {
        Err(CommandError::WrongArity { cmd, arity })
    }
}

/// LRANGE 的下标：只接受纯十进制数字，不带符号
fn parse_index(s: &str) -> Option<u64> {
    if s.starts_with('+') {
        return None;
    }
    s.parse().ok()
}

fn text(r: Result<String, StoreError>) -> String {
    r.unwrap_or_else(|e| e.to_string())
}

fn count(r: Result<usize, StoreError>) -> String {
    match r {
        Ok(n) => n.to_string(),
        Err(e) => e.to_string(),
    }
}

fn popped(r: Result<Option<String>, StoreError>) -> String {
    match r {
        Ok(Some(item)) => item,
        Ok(None) => NIL.to_string(),
        Err(e) => e.to_string(),
    }
}

/// 多元素结果：每个元素一行，以 `\r\n` 结尾
fn lines(items: Vec<String>) -> String {
    items.into_iter().fold(String::new(), |mut out, item| {
        out.push_str(&item);
        out.push_str("\r\n");
        out
    })
}
