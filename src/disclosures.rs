//! KAP disclosure list

use crate::api::{Disclosure, SharedApi};
use crate::format::{format_date, PLACEHOLDER};
use crate::theme::Theme;
use crate::view_state::{settle, FetchEvent, ViewPhase, ViewState};
use gpui::prelude::*;
use gpui::*;

const LOAD_ERROR: &str = "KAP bildirimleri yüklenemedi.";

/// Badge text for a disclosure type; unknown types show the placeholder
pub fn kind_label(disclosure: &Disclosure) -> String {
    match disclosure.kind.as_deref().map(str::trim) {
        Some(kind) if !kind.is_empty() => kind.to_uppercase(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn title_or_placeholder(disclosure: &Disclosure) -> String {
    match disclosure.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn published_label(disclosure: &Disclosure) -> String {
    disclosure
        .publish_datetime
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(format_date)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub struct DisclosuresView {
    disclosures: ViewState<Disclosure>,
    api: SharedApi,
    theme: Theme,
}

impl DisclosuresView {
    pub fn new(api: SharedApi, theme: Theme, cx: &mut Context<Self>) -> Self {
        let mut view = Self {
            disclosures: ViewState::new(),
            api,
            theme,
        };
        view.load_data(cx);
        view
    }

    fn load_data(&mut self, cx: &mut Context<Self>) {
        self.disclosures.dispatch(FetchEvent::Started);

        let client = self.api.clone();
        let request = cx.background_spawn(async move { client.get_disclosures() });

        cx.spawn(async move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let event = settle("disclosures", request.await, LOAD_ERROR);

            let _ = cx.update(|cx| {
                if let Some(entity) = this.upgrade() {
                    entity.update(cx, |view: &mut Self, cx: &mut Context<Self>| {
                        view.disclosures.dispatch(event);
                        cx.notify();
                    });
                }
            });
        })
        .detach();
    }

    fn kind_color(&self, disclosure: &Disclosure) -> Hsla {
        match disclosure.kind.as_deref().map(str::trim) {
            Some("FR") => self.theme.accent,
            Some("ÖDA") => self.theme.positive,
            _ => self.theme.text_muted,
        }
    }

    fn render_row(&self, disclosure: &Disclosure) -> Div {
        let theme = &self.theme;
        let kind_color = self.kind_color(disclosure);

        div()
            .py(px(12.0))
            .px(px(16.0))
            .border_b_1()
            .border_color(theme.border_subtle)
            .hover(|s| s.bg(theme.hover_bg))
            .flex()
            .items_center()
            .gap(px(12.0))
            .child(
                div()
                    .w(px(56.0))
                    .flex()
                    .justify_center()
                    .px(px(6.0))
                    .py(px(2.0))
                    .rounded(px(4.0))
                    .bg(kind_color.opacity(0.15))
                    .text_size(px(10.0))
                    .font_weight(FontWeight::BOLD)
                    .text_color(kind_color)
                    .child(kind_label(disclosure)),
            )
            .child(
                div()
                    .flex_1()
                    .text_size(px(13.0))
                    .text_color(theme.text)
                    .child(title_or_placeholder(disclosure)),
            )
            .child(
                div()
                    .text_size(px(11.0))
                    .text_color(theme.text_dimmed)
                    .child(published_label(disclosure)),
            )
            .when_some(disclosure.url.clone(), |el, url| {
                el.child(
                    div()
                        .id(SharedString::from(format!("kap-link-{}", disclosure.id)))
                        .px(px(8.0))
                        .text_size(px(12.0))
                        .text_color(theme.link)
                        .cursor_pointer()
                        .hover(|s| s.text_color(theme.accent))
                        .on_click(move |_event, _window, cx| cx.open_url(&url))
                        .child("Aç"),
                )
            })
    }

    fn render_message(&self, text: &str, color: Hsla) -> Div {
        div()
            .py(px(40.0))
            .flex()
            .items_center()
            .justify_center()
            .text_size(px(13.0))
            .text_color(color)
            .child(text.to_string())
    }
}

impl Render for DisclosuresView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;

        let body = match self.disclosures.phase() {
            ViewPhase::Loading => self.render_message("Bildirimler yükleniyor...", theme.text_dimmed),
            ViewPhase::Failed(msg) => self.render_message(msg, theme.negative),
            ViewPhase::Empty => self.render_message("Henüz bildirim yok.", theme.text_dimmed),
            ViewPhase::Ready => div().flex().flex_col().children(
                self.disclosures
                    .items()
                    .iter()
                    .map(|d| self.render_row(d))
                    .collect::<Vec<_>>(),
            ),
        };

        div()
            .id("disclosures-scroll")
            .size_full()
            .overflow_y_scroll()
            .bg(theme.background)
            .p(px(24.0))
            .child(
                div()
                    .rounded(px(12.0))
                    .bg(theme.card_bg)
                    .border_1()
                    .border_color(theme.border)
                    .overflow_hidden()
                    .flex()
                    .flex_col()
                    .child(
                        div()
                            .px(px(16.0))
                            .py(px(14.0))
                            .border_b_1()
                            .border_color(theme.border)
                            .text_size(px(17.0))
                            .font_weight(FontWeight::BOLD)
                            .text_color(theme.text)
                            .child("KAP Bildirimleri"),
                    )
                    .child(body),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    fn disclosure() -> Disclosure {
        Disclosure {
            id: 7,
            company_code: "TSGYO".to_string(),
            kap_id: "1234567".to_string(),
            kind: Some("fr".to_string()),
            title: Some("Finansal Rapor".to_string()),
            publish_datetime: Some("2025-08-11T19:05:00".to_string()),
            url: None,
        }
    }

    #[test]
    fn test_row_labels() {
        let d = disclosure();
        assert_eq!(kind_label(&d), "FR");
        assert_eq!(title_or_placeholder(&d), "Finansal Rapor");
        assert_eq!(published_label(&d), "11.08.2025");
    }

    #[test]
    fn test_missing_fields_use_placeholder() {
        let mut d = disclosure();
        d.kind = None;
        d.title = Some(" ".to_string());
        d.publish_datetime = None;
        assert_eq!(kind_label(&d), "-");
        assert_eq!(title_or_placeholder(&d), "-");
        assert_eq!(published_label(&d), "-");
    }
}
