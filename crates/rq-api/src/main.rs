#[tokio::main]
async fn main() {
    if let Err(err) = rq_api::run().await {
        tracing::error!(error = %err, "rq-api failed");
        std::process::exit(1);
    }
}
