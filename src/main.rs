#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    // The frame loop is the only execution context.
    arena_sync::run_with_config().await
}
