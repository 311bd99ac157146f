//! Concurrent relay calls share one identifier space.

use std::collections::HashSet;
use std::time::Duration;

use relay_sdk::RelayRequest;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_get_distinct_ids() {
    let (origin, _heads) = common::start_origin_with(
        "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
        Duration::from_millis(20),
    )
    .await;
    let relay = common::start_relay().await;

    let total = 50;
    let mut tasks = Vec::new();
    for i in 0..total {
        let client = relay.client();
        let url = format!("http://{}/item/{}", origin, i);
        tasks.push(tokio::spawn(async move {
            client.relay(&RelayRequest::new("GET", &url)).await
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        let reply = task.await.unwrap().expect("relay call failed");
        assert_eq!(reply.status, 200);
        ids.push(reply.id);
    }

    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), total);
    assert_eq!(unique, (1..=total as u64).collect::<HashSet<_>>());

    let stats = relay.journal.stats();
    assert_eq!(stats.requests, total);
    assert_eq!(stats.responses, total);

    // Each journaled request matches the response stored under the same id.
    for entry in relay.journal.entries() {
        assert_eq!(entry.response.map(|r| r.id), Some(entry.id));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failures_leave_gaps_but_no_duplicates() {
    let origin = common::start_origin(
        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    let relay = common::start_relay().await;

    let total = 40;
    let mut tasks = Vec::new();
    for i in 0..total {
        let client = relay.client();
        let url = if i % 4 == 0 {
            "not a url".to_string()
        } else {
            format!("http://{}/", origin)
        };
        tasks.push(tokio::spawn(async move {
            client.relay(&RelayRequest::new("GET", &url)).await
        }));
    }

    let mut ok_ids = HashSet::new();
    let mut failures = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(reply) => assert!(ok_ids.insert(reply.id), "duplicate id {}", reply.id),
            Err(_) => failures += 1,
        }
    }

    assert_eq!(failures, total / 4);
    assert_eq!(ok_ids.len(), total - total / 4);

    let stats = relay.journal.stats();
    assert_eq!(stats.last_id, total as u64);
    assert_eq!(stats.requests, total);
    assert_eq!(stats.responses, ok_ids.len());

    let failed: Vec<_> = relay
        .journal
        .entries()
        .into_iter()
        .filter(|e| e.response.is_none())
        .collect();
    assert_eq!(failed.len(), total / 4);
    assert!(failed.iter().all(|e| e.request.url == "not a url"));
}
