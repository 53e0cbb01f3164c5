// src/error.rs

//! 错误类型：
//! - `StoreError`    数据层错误（key 不存在 / 类型不匹配），作为普通响应文本返回
//! - `CommandError`  分发层错误（参数个数 / 数字解析 / 未知命令），带 `ERROR: ` 前缀
//! - `SnapshotError` SAVE / RESTORE 的 I/O 与编解码错误，原样透出底层信息

use thiserror::Error;

/// 对持有错误类型值的 key 操作时返回的固定文本
pub const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("key not found")]
    NotFound,

    #[error("{}", WRONG_TYPE)]
    WrongType,

    /// SINTER 中第一个不存在的 key
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// SINTER 中第一个类型错误的 key
    #[error("WRONGTYPE Operation against a key: {0} holding the wrong kind of value")]
    KeyWrongType(String),
}

/// 命令参数个数约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exact(0) => write!(f, "no arguments"),
            Arity::Exact(1) => write!(f, "1 argument"),
            Arity::Exact(n) => write!(f, "{} arguments", n),
            Arity::AtLeast(n) => write!(f, "at least {} arguments", n),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("{cmd} expects {arity}")]
    WrongArity { cmd: &'static str, arity: Arity },

    #[error("Error when parsing start")]
    InvalidStart,

    #[error("Error when parsing end")]
    InvalidEnd,

    #[error("Error when parsing seconds")]
    InvalidSeconds,

    #[error("Second should be a positive number")]
    NonPositiveSeconds,

    #[error("unknown command: {0}")]
    Unknown(String),

    /// 分词失败（未闭合的引号等），由传输层产生
    #[error("{0}")]
    Tokenize(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] bincode::Error),
}
