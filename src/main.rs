#[tokio::main]
async fn main() {
    if let Err(e) = sanjeevni_lib::run().await {
        tracing::error!("{e}");
        eprintln!("sanjeevni: {e}");
        std::process::exit(1);
    }
}
