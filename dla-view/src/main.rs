//! Application entry point for the DLA kaleidoscope.
//!
//! This binary sets up logging and eframe/egui, and delegates all
//! simulation and drawing to [`Viewer`] from the `viewer` module.

mod surface;
mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// The window opens at 800 × 800, the size of the square canvas the
/// default domain is laid out for. Set `RUST_LOG` to see engine logs.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DLA Kaleidoscope")
            .with_inner_size([800.0, 800.0]),
        ..Default::default()
    };

    log::info!("starting DLA kaleidoscope");

    eframe::run_native(
        "DLA Kaleidoscope",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
