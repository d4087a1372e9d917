use crate::api::{ApiError, IrClient, SharedApi};
use crate::assistant::AssistantView;
use crate::config::PortalConfig;
use crate::dashboard::DashboardView;
use crate::demo::DemoClient;
use crate::disclosures::DisclosuresView;
use crate::theme::Theme;
use gpui::prelude::*;
use gpui::*;
use std::sync::Arc;
use std::time::Duration;

pub const PORTAL_TITLE: &str = "TSKB GYO";
pub const PORTAL_SUBTITLE: &str = "Yatırımcı İlişkileri Portalı · Demo";
const FOOTER_NOTICE: &str = "© 2025 TSGYO Demo Project. Veriler tanıtım amaçlı olarak kullanılmaktadır.";

/// Available views in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Summary,
    Disclosures,
    Assistant,
}

impl ActiveView {
    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Summary => "Özet",
            ActiveView::Disclosures => "KAP Bildirimleri",
            ActiveView::Assistant => "IR Asistanı",
        }
    }

    pub fn all() -> &'static [ActiveView] {
        &[ActiveView::Summary, ActiveView::Disclosures, ActiveView::Assistant]
    }
}

/// Pick the data source for this run
pub fn build_client(config: &PortalConfig) -> SharedApi {
    if config.demo_mode {
        tracing::info!(latency_ms = config.demo_latency_ms, "demo mode: serving seeded data");
        return demo_client(config);
    }

    let timeout = Duration::from_secs(config.api.timeout_secs);
    let client = IrClient::with_timeout(config.api.base_url.clone(), timeout);
    http_or_demo(client, config)
}

fn demo_client(config: &PortalConfig) -> SharedApi {
    Arc::new(DemoClient::new().with_latency(Duration::from_millis(config.demo_latency_ms)))
}

/// Use the HTTP client if it could be built, the demo backend otherwise
pub fn http_or_demo(client: Result<IrClient, ApiError>, config: &PortalConfig) -> SharedApi {
    match client {
        Ok(client) => {
            tracing::info!(base_url = %client.base_url(), "using IR backend");
            Arc::new(client)
        }
        Err(e) => {
            tracing::error!(error = %e, "could not build HTTP client, serving demo data");
            demo_client(config)
        }
    }
}

pub struct IrPortalApp {
    active_view: ActiveView,
    theme: Theme,
    dashboard: Entity<DashboardView>,
    disclosures: Entity<DisclosuresView>,
    assistant: Entity<AssistantView>,
}

impl IrPortalApp {
    pub fn new(config: &PortalConfig, cx: &mut Context<Self>) -> Self {
        let api = build_client(config);
        let theme = Theme::from_name(&config.theme);

        // Each view fetches once, when constructed here
        let dashboard = {
            let (api, theme) = (api.clone(), theme.clone());
            cx.new(|cx| DashboardView::new(api, theme, cx))
        };
        let disclosures = {
            let (api, theme) = (api.clone(), theme.clone());
            cx.new(|cx| DisclosuresView::new(api, theme, cx))
        };
        let assistant = {
            let theme = theme.clone();
            cx.new(|cx| AssistantView::new(api, theme, cx))
        };

        Self {
            active_view: ActiveView::default(),
            theme,
            dashboard,
            disclosures,
            assistant,
        }
    }

    pub fn set_active_view(&mut self, view: ActiveView, window: &mut Window, cx: &mut Context<Self>) {
        if self.active_view == view {
            return;
        }
        tracing::debug!(view = ?view, "switching view");
        self.active_view = view;
        if view == ActiveView::Assistant {
            window.focus(&self.assistant.focus_handle(cx));
        }
        cx.notify();
    }
}

impl Render for IrPortalApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(theme.background)
            .text_color(theme.text)
            .font_family("Inter")
            .child(self.render_header(cx))
            .child(self.render_content_area())
            .child(self.render_footer())
    }
}

impl IrPortalApp {
    fn render_header(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .h(px(64.0))
            .px(px(28.0))
            .flex()
            .items_center()
            .justify_between()
            .bg(theme.header_bg)
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(2.0))
                    .child(
                        div()
                            .text_size(px(18.0))
                            .font_weight(FontWeight::BOLD)
                            .text_color(theme.header_text)
                            .child(PORTAL_TITLE),
                    )
                    .child(
                        div()
                            .text_size(px(11.0))
                            .text_color(theme.header_text_muted)
                            .child(PORTAL_SUBTITLE),
                    ),
            )
            .child(
                div().flex().gap(px(4.0)).children(
                    ActiveView::all()
                        .iter()
                        .map(|&view| self.nav_tab(view, cx))
                        .collect::<Vec<_>>(),
                ),
            )
    }

    fn nav_tab(&self, view: ActiveView, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let is_active = self.active_view == view;

        div()
            .id(SharedString::from(format!("nav-{:?}", view)))
            .px(px(14.0))
            .py(px(8.0))
            .rounded(px(6.0))
            .when(is_active, |el| el.bg(theme.header_tab_active))
            .text_size(px(13.0))
            .font_weight(if is_active {
                FontWeight::SEMIBOLD
            } else {
                FontWeight::NORMAL
            })
            .text_color(if is_active {
                theme.header_text
            } else {
                theme.header_text_muted
            })
            .cursor_pointer()
            .hover(|s| s.bg(theme.header_tab_hover).text_color(theme.header_text))
            .on_click(cx.listener(move |this, _event, window, cx| {
                this.set_active_view(view, window, cx);
            }))
            .child(view.label())
    }

    fn render_content_area(&self) -> impl IntoElement {
        let content = div().flex_grow().min_h(px(0.0)).w_full();

        match self.active_view {
            ActiveView::Summary => content.child(self.dashboard.clone()),
            ActiveView::Disclosures => content.child(self.disclosures.clone()),
            ActiveView::Assistant => content.p(px(24.0)).child(self.assistant.clone()),
        }
    }

    fn render_footer(&self) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .px(px(28.0))
            .py(px(12.0))
            .border_t_1()
            .border_color(theme.border)
            .bg(theme.card_bg)
            .text_size(px(11.0))
            .text_color(theme.text_dimmed)
            .child(FOOTER_NOTICE)
    }
}
