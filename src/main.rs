#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up logging for development
    env_logger::init();

    // File dialogs run as tokio tasks
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    epp_trainer::run_app()?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build starts through `epp_trainer::start_web`.
}
