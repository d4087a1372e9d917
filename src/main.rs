//! IR Portal - GPUI desktop client for investor relations
//!
//! Shows the latest financial KPIs, the real estate portfolio, KAP
//! disclosures and an assistant that answers investor questions.

mod api;
mod app;
mod assistant;
mod config;
mod dashboard;
mod demo;
mod disclosures;
mod format;
mod logging;
mod portfolio;
mod theme;
mod view_state;

#[cfg(test)]
mod tests;

use app::{IrPortalApp, PORTAL_TITLE};
use config::PortalConfig;
use gpui::*;
use logging::{init_logging, LoggingConfig};

fn main() {
    if let Err(e) = init_logging(&LoggingConfig::from_env()) {
        eprintln!("failed to initialize logging: {e:#}");
    }

    let config = PortalConfig::load();
    tracing::info!(
        base_url = %config.api.base_url,
        demo_mode = config.demo_mode,
        theme = %config.theme,
        "starting IR portal"
    );

    Application::new().run(move |cx: &mut App| {
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds {
                origin: Point::default(),
                size: Size {
                    width: px(1280.0),
                    height: px(860.0),
                },
            })),
            titlebar: Some(TitlebarOptions {
                title: Some(format!("{PORTAL_TITLE} - Yatırımcı İlişkileri").into()),
                appears_transparent: false,
                ..Default::default()
            }),
            ..Default::default()
        };

        if let Err(e) = cx.open_window(window_options, |_window, cx| {
            cx.new(|cx| IrPortalApp::new(&config, cx))
        }) {
            tracing::error!(error = %e, "failed to open window");
            cx.quit();
        }
    });
}
