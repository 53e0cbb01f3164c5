// tests/integration_types.rs

use std::collections::HashSet;

use ledis::engine::{Store, execute};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

/// 辅助：把一行命令按空白切开后执行
fn run(store: &Store, line: &str) -> String {
    execute(line.split_whitespace().map(str::to_string).collect(), store)
}

/// 辅助：把多行响应拆成集合，忽略顺序
fn members(resp: &str) -> HashSet<String> {
    resp.split("\r\n")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_command_table() {
    let store = Store::new();

    let cases = [
        ("SET testkey 123", "OK"),
        ("GET testkey", "123"),
        ("GET testkey1", "key not found"),
        ("RPUSH testlist 1 2 3 4", "4"),
        ("RPUSH testlist 5 6", "6"),
        ("RPUSH testkey 1 2 3 4", WRONG_TYPE),
        ("GET testlist", WRONG_TYPE),
        ("LLEN testlist", "6"),
        ("LLEN testkey", WRONG_TYPE),
        ("LLEN no-exist", "key not found"),
        ("LPOP testlist", "1"),
        ("LPOP no-exist", "key not found"),
        ("LPOP testkey", WRONG_TYPE),
        ("RPOP testlist", "6"),
        ("RPOP no-exist", "key not found"),
        ("RPOP testkey", WRONG_TYPE),
        ("LLEN testlist", "4"),
        ("LRANGE testlist 0 1000", "2\r\n3\r\n4\r\n5\r\n"),
        ("LRANGE testlist 4 10", "(nil)"),
        ("LRANGE no-exist 0 1000", "key not found"),
        ("LRANGE testkey 1 2", WRONG_TYPE),
        ("RPOP testlist", "5"),
        ("RPOP testlist", "4"),
        ("LPOP testlist", "2"),
        ("LPOP testlist", "3"),
        ("LPOP testlist", "(nil)"),
        ("RPOP testlist", "(nil)"),
        ("LRANGE testlist 1 2", "(nil)"),
        ("SADD testset 1 2 3", "3"),
        ("SADD testkey 1 2 3", WRONG_TYPE),
        ("SCARD testset", "3"),
        ("SREM testset 1", "1"),
        ("SREM no-exist 1", "key not found"),
        ("SMEMBERS no-exist", "key not found"),
        ("SMEMBERS testkey", WRONG_TYPE),
        ("SREM testkey 1", WRONG_TYPE),
        ("SCARD testset", "2"),
        ("SREM testset 2 3", "2"),
        ("SMEMBERS testset", "(empty set)"),
        ("SREM testset a b c", "0"),
        ("SADD testset x y z", "3"),
        ("SCARD testset", "3"),
        ("SCARD no-exist", "key not found"),
        ("SCARD testkey", WRONG_TYPE),
        ("SADD testset1 a 1 2 3", "4"),
        ("SADD testset2 a 4 5 6", "4"),
        ("SADD testset3 a 7 8 9", "4"),
        ("SINTER testset1 testset2 testset3", "a\r\n"),
        (
            "SINTER testset1 testset2 testset3 testkey",
            "WRONGTYPE Operation against a key: testkey holding the wrong kind of value",
        ),
        ("SINTER testset1 testset2 testset3 no-exist", "key not found: no-exist"),
        ("SINTER testset1 testset2 testset3 testset", "empty"),
        ("DEL testkey", "1"),
        ("DEL no-exist", "key not found"),
        ("EXPIRE no-exist 100", "key not found"),
        ("TTL no-exist", "key not found"),
        ("TTL testset1", "-1"),
    ];
    for (line, want) in cases {
        assert_eq!(run(&store, line), want, "命令 {:?} 的响应不对", line);
    }

    assert_eq!(
        members(&run(&store, "SMEMBERS testset")),
        members("x\r\ny\r\nz\r\n"),
        "SMEMBERS 应返回所有 member"
    );
    assert_eq!(
        members(&run(&store, "KEYS")),
        members("testlist\r\ntestset\r\ntestset1\r\ntestset2\r\ntestset3\r\n"),
        "KEYS 应返回所有 key"
    );
}

#[test]
fn test_rpush_rpop_round_trip() {
    let store = Store::new();
    assert_eq!(run(&store, "RPUSH l a b c"), "3");
    assert_eq!(run(&store, "RPOP l"), "c");
    assert_eq!(run(&store, "RPOP l"), "b");
    assert_eq!(run(&store, "RPOP l"), "a");
    assert_eq!(run(&store, "RPOP l"), "(nil)", "弹空之后应返回 nil");
}

#[test]
fn test_set_overwrites_any_type() {
    let store = Store::new();
    run(&store, "SADD k a b");
    run(&store, "EXPIRE k 100");

    assert_eq!(run(&store, "SET k v"), "OK", "SET 永远成功");
    assert_eq!(run(&store, "GET k"), "v");
    assert_eq!(run(&store, "TTL k"), "-1", "SET 应清除过期时间");
}

#[test]
fn test_sinter_error_independent_of_order() {
    let store = Store::new();
    run(&store, "SADD s1 common 1");
    run(&store, "SADD s2 common 2");
    run(&store, "SADD s3 common 3");
    run(&store, "RPUSH bad x");

    let want = "WRONGTYPE Operation against a key: bad holding the wrong kind of value";
    for line in [
        "SINTER s1 s2 s3 bad",
        "SINTER s3 s1 s2 bad",
        "SINTER s2 s3 s1 bad",
        "SINTER s2 bad s1 s3",
    ] {
        assert_eq!(run(&store, line), want, "{:?}", line);
    }
    assert_eq!(run(&store, "SINTER s3 s2 s1"), "common\r\n");
}

#[test]
fn test_independent_stores() {
    let a = Store::new();
    let b = Store::new();
    run(&a, "SET k a");
    assert_eq!(run(&b, "GET k"), "key not found", "两个 Store 实例不能共享数据");
}
