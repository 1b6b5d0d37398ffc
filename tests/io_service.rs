//! io-service over real sockets.

use std::time::{Duration, Instant};

use io_relay::Shutdown;

mod common;

#[tokio::test]
async fn answers_ok_after_one_second() {
    let shutdown = Shutdown::new();
    let addr = common::spawn_io_service(common::io_config(1000), &shutdown).await;

    let start = Instant::now();
    let res = common::client()
        .get(format!("http://{}/io", addr))
        .send()
        .await
        .expect("io-service unreachable");

    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "ok");

    shutdown.trigger();
}

#[tokio::test]
async fn any_method_is_accepted() {
    let shutdown = Shutdown::new();
    let addr = common::spawn_io_service(common::io_config(10), &shutdown).await;
    let client = common::client();

    for method in [reqwest::Method::POST, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let res = client
            .request(method, format!("http://{}/io", addr))
            .body("ignored")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), "ok");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn concurrent_requests_overlap() {
    let shutdown = Shutdown::new();
    let addr = common::spawn_io_service(common::io_config(500), &shutdown).await;
    let client = common::client();
    let url = format!("http://{}/io", addr);

    let start = Instant::now();
    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let client = client.clone();
            let url = url.clone();
            tokio::spawn(async move { client.get(&url).send().await?.text().await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), "ok");
    }
    // Serialized handling would take 10s.
    assert!(start.elapsed() < Duration::from_secs(3), "took {:?}", start.elapsed());

    shutdown.trigger();
}
