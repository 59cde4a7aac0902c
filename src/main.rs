#[tokio::main]
async fn main() {
    if let Err(e) = evem_backend::run().await {
        eprintln!("evem-backend stopped: {}", e);
        std::process::exit(1);
    }
}
