#[cfg(target_arch = "wasm32")]
mod client;
#[cfg(feature = "server")]
mod server;

#[cfg(feature = "server")]
#[tokio::main]
async fn main() {
    install_panic_hook();
    if let Err(err) = server::run().await {
        eprintln!("startup: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "server"))]
fn main() {
    #[cfg(target_arch = "wasm32")]
    client::start();
}

#[cfg(feature = "server")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {info}");
    }));
}
