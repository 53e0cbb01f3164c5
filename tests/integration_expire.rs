// tests/integration_expire.rs

//! 集成测试：过期清理 & 并发写入
//! - EXPIRE 之后 TTL 立即可读
//! - 截止时间过后，后台 cleaner 至少跑一轮，key 就读不到了
//! - 多线程并发 SADD 同一个新 key 不丢数据

use std::{
    thread,
    time::{Duration, Instant},
};

use ledis::{
    engine::{Store, execute},
    expire,
};

fn cmd(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_expired_key_is_swept() {
    let store = Store::new();
    let cleaner = expire::spawn_cleaner(store.clone(), Duration::from_millis(100));

    assert_eq!(execute(cmd(&["SET", "testkey", "123"]), &store), "OK");
    assert_eq!(execute(cmd(&["EXPIRE", "testkey", "100"]), &store), "100");
    let ttl: i64 = execute(cmd(&["TTL", "testkey"]), &store).parse().unwrap();
    assert!(ttl <= 100 && ttl >= 99, "TTL 应接近 100: {}", ttl);

    // 换成 1 秒过期，在一个最大 3 s 的窗口内轮询
    assert_eq!(execute(cmd(&["EXPIRE", "testkey", "1"]), &store), "1");
    let timeout = Duration::from_secs(3);
    let start = Instant::now();
    let mut expired = false;
    while start.elapsed() < timeout {
        if execute(cmd(&["GET", "testkey"]), &store) == "key not found" {
            expired = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(expired, "testkey 应该在 3 s 内被清理掉");
    assert_eq!(execute(cmd(&["TTL", "testkey"]), &store), "key not found");

    assert!(cleaner.is_running());
    cleaner.stop();
}

#[tokio::test]
async fn test_keys_without_ttl_survive_sweeps() {
    let store = Store::new();
    let _cleaner = expire::spawn_cleaner(store.clone(), Duration::from_millis(20));

    execute(cmd(&["SET", "keep", "v"]), &store);
    execute(cmd(&["SADD", "later", "m"]), &store);
    execute(cmd(&["EXPIRE", "later", "60"]), &store);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(execute(cmd(&["GET", "keep"]), &store), "v");
    assert_eq!(execute(cmd(&["SCARD", "later"]), &store), "1");
}

#[test]
fn test_concurrent_sadd_on_new_key() {
    let store = Store::new();
    let threads = 8;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    let member = format!("t{}-m{}", t, i);
                    // 每个成员提交两次，第二次不计数
                    execute(vec!["SADD".into(), "shared".into(), member.clone(), member], &store);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(
        execute(cmd(&["SCARD", "shared"]), &store),
        (threads * per_thread).to_string()
    );
}

#[test]
fn test_concurrent_push_and_pop_keep_list_consistent() {
    let store = Store::new();
    execute(cmd(&["RPUSH", "q", "seed"]), &store);

    let pushers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    execute(vec!["RPUSH".into(), "q".into(), i.to_string()], &store);
                }
            })
        })
        .collect();
    let popper = {
        let store = store.clone();
        thread::spawn(move || {
            (0..100)
                .filter(|_| execute(cmd(&["LPOP", "q"]), &store) != "(nil)")
                .count()
        })
    };

    for h in pushers {
        h.join().unwrap();
    }
    let popped = popper.join().unwrap();
    let left: usize = execute(cmd(&["LLEN", "q"]), &store).parse().unwrap();
    assert_eq!(left + popped, 401);
}
