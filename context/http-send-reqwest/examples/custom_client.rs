use bytes::Bytes;
use reqwest::Client;
use secretsign_core::Context;
use secretsign_http_send_reqwest::ReqwestHttpSend;
use std::time::Duration;

#[tokio::main]
async fn main() -> secretsign_core::Result<()> {
    // Transport concerns (timeouts, pooling) stay in the reqwest client.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("secretsign-example/1.0")
        .build()
        .map_err(|e| secretsign_core::Error::config_invalid("invalid client").with_source(e))?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let test_url = "https://httpbin.org/get";
    println!("Testing HTTP client with GET {test_url}");

    let req = http::Request::get(test_url).body(Bytes::new())?;
    let resp = ctx.http_send_as_string(req).await?;

    println!("Response status: {}", resp.status());
    println!("Response body: {}", resp.body());

    Ok(())
}
