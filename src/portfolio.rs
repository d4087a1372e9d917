//! Real estate portfolio table
//!
//! Lists each property with its area or room count and the latest appraisal
//! value, plus the portfolio total. Fetched independently of the KPI
//! dashboard it is rendered under.

use crate::api::{PortfolioProperty, SharedApi};
use crate::format::{format_area, format_currency, format_date, parse_date, PLACEHOLDER};
use crate::theme::Theme;
use crate::view_state::{settle, FetchEvent, ViewPhase, ViewState};
use gpui::prelude::*;
use gpui::*;

const LOAD_ERROR: &str = "Portföy verisi yüklenemedi.";

// ============================================================================
// DERIVED VALUES
// ============================================================================

/// Sum of all present appraisal values; missing values count as zero
pub fn total_valuation(items: &[PortfolioProperty]) -> f64 {
    items.iter().filter_map(|p| p.valuation_value_tl).sum()
}

/// Area/room cell: hotels report rooms, everything else gross area
pub fn area_or_rooms(property: &PortfolioProperty) -> String {
    match property.rooms {
        Some(rooms) if rooms > 0 => format!("{} oda", rooms),
        _ => format_area(property.gross_area_sqm),
    }
}

pub fn text_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Most recent appraisal date among the items, as `DD.MM.YYYY`.
/// Dates that do not parse are skipped.
pub fn valuation_basis_date(items: &[PortfolioProperty]) -> Option<String> {
    items
        .iter()
        .filter_map(|p| p.valuation_date.as_deref())
        .filter_map(parse_date)
        .max()
        .map(|date| date.format("%d.%m.%Y").to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioColumn {
    Name,
    Type,
    City,
    AreaOrRooms,
    Leasable,
    Valuation,
    ValuationDate,
}

impl PortfolioColumn {
    pub const ALL: [PortfolioColumn; 7] = [
        PortfolioColumn::Name,
        PortfolioColumn::Type,
        PortfolioColumn::City,
        PortfolioColumn::AreaOrRooms,
        PortfolioColumn::Leasable,
        PortfolioColumn::Valuation,
        PortfolioColumn::ValuationDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PortfolioColumn::Name => "Varlık",
            PortfolioColumn::Type => "Tür",
            PortfolioColumn::City => "Şehir",
            PortfolioColumn::AreaOrRooms => "Alan / Oda",
            PortfolioColumn::Leasable => "Kiralanabilir Alan",
            PortfolioColumn::Valuation => "Ekspertiz Değeri",
            PortfolioColumn::ValuationDate => "Ekspertiz Tarihi",
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            PortfolioColumn::Name => 220.0,
            PortfolioColumn::Type => 100.0,
            PortfolioColumn::City => 100.0,
            PortfolioColumn::AreaOrRooms => 120.0,
            PortfolioColumn::Leasable => 140.0,
            PortfolioColumn::Valuation => 170.0,
            PortfolioColumn::ValuationDate => 120.0,
        }
    }

    fn align_right(&self) -> bool {
        matches!(
            self,
            PortfolioColumn::AreaOrRooms | PortfolioColumn::Leasable | PortfolioColumn::Valuation
        )
    }

    /// Display text for one cell, with the per-column fallback applied
    pub fn cell(&self, property: &PortfolioProperty) -> String {
        match self {
            PortfolioColumn::Name => property.name.clone(),
            PortfolioColumn::Type => text_or_placeholder(property.property_type.as_deref()),
            PortfolioColumn::City => text_or_placeholder(property.city.as_deref()),
            PortfolioColumn::AreaOrRooms => area_or_rooms(property),
            PortfolioColumn::Leasable => format_area(property.gla_sqm),
            PortfolioColumn::Valuation => format_currency(property.valuation_value_tl),
            PortfolioColumn::ValuationDate => property
                .valuation_date
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(format_date)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

// ============================================================================
// PORTFOLIO VIEW
// ============================================================================

pub struct PortfolioView {
    properties: ViewState<PortfolioProperty>,
    api: SharedApi,
    theme: Theme,
}

impl PortfolioView {
    /// Create the view and start its one fetch
    pub fn new(api: SharedApi, theme: Theme, cx: &mut Context<Self>) -> Self {
        let mut view = Self {
            properties: ViewState::new(),
            api,
            theme,
        };
        view.load_data(cx);
        view
    }

    fn load_data(&mut self, cx: &mut Context<Self>) {
        self.properties.dispatch(FetchEvent::Started);

        let client = self.api.clone();
        let request = cx.background_spawn(async move { client.get_portfolio() });

        cx.spawn(async move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let event = settle("portfolio", request.await, LOAD_ERROR);

            let _ = cx.update(|cx| {
                if let Some(entity) = this.upgrade() {
                    entity.update(cx, |view: &mut Self, cx: &mut Context<Self>| {
                        view.properties.dispatch(event);
                        cx.notify();
                    });
                }
            });
        })
        .detach();
    }

    fn render_table(&self, items: &[PortfolioProperty]) -> Div {
        let theme = &self.theme;

        div()
            .flex()
            .flex_col()
            .w_full()
            .rounded(px(8.0))
            .border_1()
            .border_color(theme.border)
            .overflow_hidden()
            .child(self.render_table_header())
            .children(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, property)| self.render_row(property, idx))
                    .collect::<Vec<_>>(),
            )
            .child(self.render_table_footer(items))
    }

    fn render_table_header(&self) -> Div {
        let theme = &self.theme;

        div()
            .h(px(40.0))
            .flex()
            .items_center()
            .bg(theme.card_bg_elevated)
            .border_b_1()
            .border_color(theme.border)
            .children(PortfolioColumn::ALL.iter().map(|col| {
                div()
                    .w(px(col.width()))
                    .px(px(12.0))
                    .flex()
                    .when(col.align_right(), |el| el.justify_end())
                    .text_size(px(11.0))
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(theme.text_muted)
                    .child(col.label())
            }))
    }

    fn render_row(&self, property: &PortfolioProperty, index: usize) -> Div {
        let theme = &self.theme;

        div()
            .h(px(44.0))
            .flex()
            .items_center()
            .when(index % 2 == 1, |el| el.bg(theme.card_bg_elevated))
            .hover(|s| s.bg(theme.hover_bg))
            .border_b_1()
            .border_color(theme.border_subtle)
            .children(PortfolioColumn::ALL.iter().map(|col| {
                let is_name = *col == PortfolioColumn::Name;
                let is_value = *col == PortfolioColumn::Valuation;

                div()
                    .w(px(col.width()))
                    .px(px(12.0))
                    .flex()
                    .when(col.align_right(), |el| el.justify_end())
                    .text_size(px(13.0))
                    .text_color(if is_name || is_value { theme.text } else { theme.text_secondary })
                    .when(is_name || is_value, |el| el.font_weight(FontWeight::MEDIUM))
                    .child(col.cell(property))
            }))
    }

    fn render_table_footer(&self, items: &[PortfolioProperty]) -> Div {
        let theme = &self.theme;
        let label_width: f32 = PortfolioColumn::ALL
            .iter()
            .take_while(|c| **c != PortfolioColumn::Valuation)
            .map(|c| c.width())
            .sum();

        div()
            .h(px(44.0))
            .flex()
            .items_center()
            .bg(theme.card_bg_elevated)
            .child(
                div()
                    .w(px(label_width))
                    .px(px(12.0))
                    .text_size(px(13.0))
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(theme.text)
                    .child("Toplam"),
            )
            .child(
                div()
                    .w(px(PortfolioColumn::Valuation.width()))
                    .px(px(12.0))
                    .flex()
                    .justify_end()
                    .text_size(px(13.0))
                    .font_weight(FontWeight::BOLD)
                    .text_color(theme.text)
                    .child(format_currency(Some(total_valuation(items)))),
            )
    }

    fn render_loading_indicator(&self) -> Div {
        div()
            .py(px(40.0))
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .text_size(px(13.0))
                    .text_color(self.theme.text_dimmed)
                    .child("Portföy yükleniyor..."),
            )
    }

    fn render_error_message(&self, msg: &str) -> Div {
        let theme = &self.theme;

        div()
            .py(px(20.0))
            .px(px(16.0))
            .rounded(px(6.0))
            .bg(theme.negative_subtle)
            .text_size(px(13.0))
            .text_color(theme.negative)
            .child(msg.to_string())
    }

    fn render_empty(&self) -> Div {
        div()
            .py(px(40.0))
            .flex()
            .justify_center()
            .text_size(px(13.0))
            .text_color(self.theme.text_dimmed)
            .child("Portföy verisi bulunamadı.")
    }
}

impl Render for PortfolioView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let items = self.properties.items();
        let basis_date = valuation_basis_date(items);

        let body = match self.properties.phase() {
            ViewPhase::Loading => self.render_loading_indicator(),
            ViewPhase::Failed(msg) => self.render_error_message(msg),
            ViewPhase::Empty => self.render_empty(),
            ViewPhase::Ready => self.render_table(items),
        };

        div()
            .w_full()
            .p(px(20.0))
            .flex()
            .flex_col()
            .gap(px(16.0))
            .bg(theme.card_bg)
            .rounded(px(12.0))
            .border_1()
            .border_color(theme.border)
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_size(px(17.0))
                            .font_weight(FontWeight::BOLD)
                            .text_color(theme.text)
                            .child("Gayrimenkul Portföyü"),
                    )
                    .when_some(basis_date, |el, date| {
                        el.child(
                            div()
                                .text_size(px(12.0))
                                .text_color(theme.text_muted)
                                .child(format!("Ekspertiz değerleri {} itibarıyla", date)),
                        )
                    }),
            )
            .child(body)
    }
}
