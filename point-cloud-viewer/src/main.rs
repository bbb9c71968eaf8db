use point_cloud_viewer::{Launch, create_app};

fn main() {
    let launch = match load_launch() {
        Ok(launch) => launch,
        Err(message) => {
            report_startup_error(&message);
            return;
        }
    };

    let mut app = create_app(launch);

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}

#[cfg(target_arch = "wasm32")]
fn load_launch() -> Result<Launch, String> {
    point_cloud_viewer::dom::containers::discover_launch().map_err(|err| err.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_launch() -> Result<Launch, String> {
    use clap::Parser;
    use point_cloud_viewer::engine::core::cli::{Cli, launch_from_cli};

    launch_from_cli(Cli::parse()).map_err(|err| err.to_string())
}

// The log plugin is not installed yet when the launch configuration fails.
#[cfg(target_arch = "wasm32")]
fn report_startup_error(message: &str) {
    web_sys::console::error_1(&format!("point-cloud-viewer: {message}").into());
}

#[cfg(not(target_arch = "wasm32"))]
fn report_startup_error(message: &str) {
    eprintln!("point-cloud-viewer: {message}");
}
