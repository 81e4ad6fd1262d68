use orbitgl_renderer::{Error, OrbitApp};

fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    run().unwrap()
}

fn run() -> Result<(), Error> {
    let running = OrbitApp::builder("#canvas").build()?.start()?;

    // the key listener must outlive `main`
    std::mem::forget(running);

    Ok(())
}
