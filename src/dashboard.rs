//! Financial summary dashboard
//!
//! Provides:
//! - KPI cards for the latest reporting period
//! - Period badge
//! - Total assets / equity trend chart with hover readout
//! - The portfolio table, fetched on its own

use crate::api::{KpiPoint, SharedApi};
use crate::format::{format_axis_tick, format_currency, format_kpi, KpiValue, CURRENCY_SUFFIX};
use crate::portfolio::PortfolioView;
use crate::theme::Theme;
use crate::view_state::{settle, FetchEvent, ViewPhase, ViewState};
use gpui::prelude::*;
use gpui::*;

const LOAD_ERROR: &str = "Finansal veriler yüklenemedi.";
const CHART_HEIGHT: f32 = 220.0;
const AXIS_TICKS: usize = 4;

// =============================================================================
// Derived Values
// =============================================================================

/// Most recent reporting period; points arrive oldest first
pub fn latest(points: &[KpiPoint]) -> Option<&KpiPoint> {
    points.last()
}

/// Chart ceiling: 20% headroom over the largest assets/equity value.
///
/// `None` when there is nothing positive to plot.
pub fn axis_upper_bound(points: &[KpiPoint]) -> Option<f64> {
    let max = points
        .iter()
        .flat_map(|p| [&p.total_assets, &p.equity])
        .filter_map(|v| v.as_ref().and_then(KpiValue::as_number))
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    (max > 0.0).then(|| max * 1.2)
}

/// Tick values from the bound down to zero
pub fn axis_ticks(bound: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return vec![bound];
    }
    (0..=count)
        .rev()
        .map(|i| bound * i as f64 / count as f64)
        .collect()
}

/// Bar height as a fraction of the chart, clamped to `0.0..=1.0`
pub fn bar_fraction(value: Option<f64>, bound: f64) -> f32 {
    match value {
        Some(v) if v.is_finite() && bound > 0.0 => (v / bound).clamp(0.0, 1.0) as f32,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiCard {
    TotalAssets,
    Equity,
    InvestmentProperties,
    NetProfit,
}

impl KpiCard {
    pub const ALL: [KpiCard; 4] = [
        KpiCard::TotalAssets,
        KpiCard::Equity,
        KpiCard::InvestmentProperties,
        KpiCard::NetProfit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KpiCard::TotalAssets => "Toplam Varlıklar",
            KpiCard::Equity => "Özkaynaklar",
            KpiCard::InvestmentProperties => "Yatırım Amaçlı Gayrimenkuller",
            KpiCard::NetProfit => "Net Kâr",
        }
    }

    pub fn value<'a>(&self, point: &'a KpiPoint) -> Option<&'a KpiValue> {
        match self {
            KpiCard::TotalAssets => point.total_assets.as_ref(),
            KpiCard::Equity => point.equity.as_ref(),
            KpiCard::InvestmentProperties => point.investment_properties.as_ref(),
            KpiCard::NetProfit => point.net_profit.as_ref(),
        }
    }

    pub fn display(&self, point: &KpiPoint) -> String {
        format_kpi(self.value(point), "", CURRENCY_SUFFIX)
    }
}

/// Plotted series of the trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    TotalAssets,
    Equity,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::TotalAssets, Series::Equity];

    pub fn label(&self) -> &'static str {
        match self {
            Series::TotalAssets => "Toplam Varlıklar",
            Series::Equity => "Özkaynaklar",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Series::TotalAssets => "assets",
            Series::Equity => "equity",
        }
    }

    /// Plottable value; pre-formatted text has no bar height.
    pub fn value(&self, point: &KpiPoint) -> Option<f64> {
        let value = match self {
            Series::TotalAssets => &point.total_assets,
            Series::Equity => &point.equity,
        };
        value.as_ref().and_then(KpiValue::as_number)
    }
}

/// Hover readout text for one bar
pub fn bar_readout(point: &KpiPoint, series: Series) -> String {
    format!(
        "{} · {}: {}",
        point.period,
        series.label(),
        format_currency(series.value(point))
    )
}

/// Line under the KPI cards, when the period reports net rental income
pub fn net_rental_income_line(point: &KpiPoint) -> Option<String> {
    let income = match point.net_rental_income.as_ref()? {
        KpiValue::Number(n) => format_currency(Some(*n)),
        KpiValue::Text(text) => text.clone(),
    };
    Some(format!("Net kira geliri: {income}"))
}

// =============================================================================
// Dashboard View
// =============================================================================

pub struct DashboardView {
    kpis: ViewState<KpiPoint>,
    portfolio: Entity<PortfolioView>,
    hovered_bar: Option<(usize, Series)>,
    api: SharedApi,
    theme: Theme,
}

impl DashboardView {
    pub fn new(api: SharedApi, theme: Theme, cx: &mut Context<Self>) -> Self {
        let portfolio = {
            let api = api.clone();
            let theme = theme.clone();
            cx.new(|cx| PortfolioView::new(api, theme, cx))
        };

        let mut view = Self {
            kpis: ViewState::new(),
            portfolio,
            hovered_bar: None,
            api,
            theme,
        };
        view.load_kpis(cx);
        view
    }

    fn load_kpis(&mut self, cx: &mut Context<Self>) {
        self.kpis.dispatch(FetchEvent::Started);

        let client = self.api.clone();
        let request = cx.background_spawn(async move { client.get_kpis() });

        cx.spawn(async move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let event = settle("kpis", request.await, LOAD_ERROR);

            let _ = cx.update(|cx| {
                if let Some(entity) = this.upgrade() {
                    entity.update(cx, |view: &mut Self, cx: &mut Context<Self>| {
                        view.kpis.dispatch(event);
                        cx.notify();
                    });
                }
            });
        })
        .detach();
    }

    fn set_hovered(&mut self, bar: (usize, Series), hovered: bool, cx: &mut Context<Self>) {
        if hovered {
            self.hovered_bar = Some(bar);
        } else if self.hovered_bar == Some(bar) {
            self.hovered_bar = None;
        }
        cx.notify();
    }

    // =========================================================================
    // KPI Section
    // =========================================================================

    fn render_kpi_section(&self, points: &[KpiPoint], cx: &mut Context<Self>) -> Div {
        let theme = &self.theme;
        let Some(current) = latest(points) else {
            return self.render_empty();
        };

        div()
            .flex()
            .flex_col()
            .gap(px(16.0))
            // Title + period badge
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(12.0))
                    .child(
                        div()
                            .text_size(px(20.0))
                            .font_weight(FontWeight::BOLD)
                            .text_color(theme.text)
                            .child("Finansal Özet"),
                    )
                    .child(
                        div()
                            .px(px(10.0))
                            .py(px(3.0))
                            .rounded(px(12.0))
                            .bg(theme.accent_subtle)
                            .text_size(px(12.0))
                            .font_weight(FontWeight::MEDIUM)
                            .text_color(theme.accent)
                            .child(format!("Dönem: {}", current.period)),
                    ),
            )
            // KPI cards
            .child(
                div()
                    .flex()
                    .gap(px(16.0))
                    .children(KpiCard::ALL.iter().map(|card| self.render_kpi_card(*card, current))),
            )
            .when_some(net_rental_income_line(current), |el, line| {
                el.child(div().text_size(px(12.0)).text_color(theme.text_muted).child(line))
            })
            .child(self.render_trend_card(points, cx))
    }

    fn render_kpi_card(&self, card: KpiCard, point: &KpiPoint) -> Div {
        let theme = &self.theme;

        div()
            .flex_1()
            .p(px(16.0))
            .rounded(px(10.0))
            .bg(theme.card_bg)
            .border_1()
            .border_color(theme.border)
            .flex()
            .flex_col()
            .gap(px(8.0))
            .child(
                div()
                    .text_size(px(12.0))
                    .text_color(theme.text_muted)
                    .child(card.label()),
            )
            .child(
                div()
                    .text_size(px(20.0))
                    .font_weight(FontWeight::BOLD)
                    .text_color(theme.text)
                    .child(card.display(point)),
            )
    }

    // =========================================================================
    // Trend Chart
    // =========================================================================

    fn render_trend_card(&self, points: &[KpiPoint], cx: &mut Context<Self>) -> Div {
        let theme = &self.theme;

        let readout = self
            .hovered_bar
            .and_then(|(idx, series)| points.get(idx).map(|p| bar_readout(p, series)));

        let content = match axis_upper_bound(points) {
            Some(bound) => self.render_chart(points, bound, cx),
            None => div()
                .h(px(CHART_HEIGHT))
                .flex()
                .items_center()
                .justify_center()
                .text_size(px(13.0))
                .text_color(theme.text_dimmed)
                .child("Grafik için veri yok."),
        };

        div()
            .p(px(20.0))
            .rounded(px(12.0))
            .bg(theme.card_bg)
            .border_1()
            .border_color(theme.border)
            .flex()
            .flex_col()
            .gap(px(12.0))
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_size(px(15.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(theme.text)
                            .child("Varlık ve Özkaynak Gelişimi"),
                    )
                    .child(self.render_legend()),
            )
            .child(
                div()
                    .h(px(24.0))
                    .text_size(px(12.0))
                    .text_color(theme.text_secondary)
                    .when_some(readout, |el, text| el.child(text)),
            )
            .child(content)
    }

    fn render_legend(&self) -> Div {
        let theme = &self.theme;

        div()
            .flex()
            .gap(px(16.0))
            .children(Series::ALL.iter().map(|series| {
                div()
                    .flex()
                    .items_center()
                    .gap(px(6.0))
                    .child(div().size(px(10.0)).rounded(px(2.0)).bg(self.series_color(*series)))
                    .child(
                        div()
                            .text_size(px(12.0))
                            .text_color(theme.text_muted)
                            .child(series.label()),
                    )
            }))
    }

    fn series_color(&self, series: Series) -> Hsla {
        match series {
            Series::TotalAssets => self.theme.series_assets,
            Series::Equity => self.theme.series_equity,
        }
    }

    fn render_chart(&self, points: &[KpiPoint], bound: f64, cx: &mut Context<Self>) -> Div {
        let theme = &self.theme;

        let axis = div()
            .w(px(56.0))
            .h(px(CHART_HEIGHT))
            .flex()
            .flex_col()
            .justify_between()
            .children(axis_ticks(bound, AXIS_TICKS).into_iter().map(|tick| {
                div()
                    .text_size(px(10.0))
                    .text_color(theme.text_dimmed)
                    .child(format_axis_tick(tick))
            }));

        let groups = points.iter().enumerate().map(|(idx, point)| {
            div()
                .flex_1()
                .flex()
                .flex_col()
                .items_center()
                .gap(px(6.0))
                .child(
                    div()
                        .h(px(CHART_HEIGHT))
                        .flex()
                        .items_end()
                        .gap(px(4.0))
                        .children(
                            Series::ALL
                                .iter()
                                .map(|series| self.render_bar(idx, point, *series, bound, cx))
                                .collect::<Vec<_>>(),
                        ),
                )
                .child(
                    div()
                        .text_size(px(11.0))
                        .text_color(theme.text_muted)
                        .child(point.period.clone()),
                )
        });

        div()
            .flex()
            .gap(px(8.0))
            .child(axis)
            .child(
                div()
                    .flex_1()
                    .flex()
                    .border_l_1()
                    .border_color(theme.border)
                    .children(groups.collect::<Vec<_>>()),
            )
    }

    fn render_bar(
        &self,
        idx: usize,
        point: &KpiPoint,
        series: Series,
        bound: f64,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let height = bar_fraction(series.value(point), bound) * CHART_HEIGHT;
        let is_hovered = self.hovered_bar == Some((idx, series));

        div()
            .id(SharedString::from(format!("bar-{}-{}", idx, series.key())))
            .w(px(22.0))
            .h(px(height))
            .rounded_t(px(3.0))
            .bg(self.series_color(series))
            .when(is_hovered, |el| el.opacity(0.8))
            .on_hover(cx.listener(move |this, hovered: &bool, _window, cx| {
                this.set_hovered((idx, series), *hovered, cx);
            }))
    }

    // =========================================================================
    // Helper Components
    // =========================================================================

    fn render_loading_indicator(&self) -> Div {
        div()
            .py(px(60.0))
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .text_size(px(13.0))
                    .text_color(self.theme.text_dimmed)
                    .child("Finansal veriler yükleniyor..."),
            )
    }

    fn render_error_message(&self, msg: &str) -> Div {
        let theme = &self.theme;

        div()
            .p(px(16.0))
            .rounded(px(6.0))
            .bg(theme.negative_subtle)
            .text_size(px(13.0))
            .text_color(theme.negative)
            .child(msg.to_string())
    }

    fn render_empty(&self) -> Div {
        div()
            .py(px(60.0))
            .flex()
            .justify_center()
            .text_size(px(13.0))
            .text_color(self.theme.text_dimmed)
            .child("Gösterilecek finansal veri yok.")
    }
}

impl Render for DashboardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;

        let summary = match self.kpis.phase() {
            ViewPhase::Loading => self.render_loading_indicator(),
            ViewPhase::Failed(msg) => self.render_error_message(msg),
            ViewPhase::Empty => self.render_empty(),
            ViewPhase::Ready => self.render_kpi_section(self.kpis.items(), cx),
        };

        div()
            .id("summary-scroll")
            .size_full()
            .overflow_y_scroll()
            .bg(theme.background)
            .child(
                div()
                    .p(px(24.0))
                    .flex()
                    .flex_col()
                    .gap(px(24.0))
                    .child(summary)
                    .child(self.portfolio.clone()),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    fn point(period: &str, assets: Option<f64>, equity: Option<f64>) -> KpiPoint {
        KpiPoint {
            period: period.to_string(),
            total_assets: assets.map(KpiValue::Number),
            equity: equity.map(KpiValue::Number),
            investment_properties: None,
            net_rental_income: None,
            net_profit: None,
        }
    }

    #[test]
    fn test_latest_is_last_point() {
        let points = vec![point("2024/12", None, None), point("2025/06", None, None)];
        assert_eq!(latest(&points).map(|p| p.period.as_str()), Some("2025/06"));
        assert!(latest(&[]).is_none());
    }

    #[test]
    fn test_axis_bound_has_headroom() {
        let points = vec![
            point("2024/12", Some(100.0), Some(80.0)),
            point("2025/06", Some(150.0), None),
        ];
        let bound = axis_upper_bound(&points).unwrap();
        assert!((bound - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_bound_uses_equity_when_larger() {
        let points = vec![point("2025/06", None, Some(50.0))];
        let bound = axis_upper_bound(&points).unwrap();
        assert!((bound - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_bound_none_when_nothing_to_plot() {
        assert_eq!(axis_upper_bound(&[]), None);
        assert_eq!(axis_upper_bound(&[point("2025/06", None, None)]), None);
        assert_eq!(axis_upper_bound(&[point("2025/06", Some(0.0), Some(0.0))]), None);
    }

    #[test]
    fn test_axis_ticks_descend_to_zero() {
        assert_eq!(axis_ticks(120.0, 4), vec![120.0, 90.0, 60.0, 30.0, 0.0]);
    }

    #[test]
    fn test_bar_fraction_clamps() {
        assert_eq!(bar_fraction(Some(60.0), 120.0), 0.5);
        assert_eq!(bar_fraction(None, 120.0), 0.0);
        assert_eq!(bar_fraction(Some(-5.0), 120.0), 0.0);
        assert_eq!(bar_fraction(Some(500.0), 120.0), 1.0);
    }

    #[test]
    fn test_kpi_card_display() {
        let mut p = point("2025/06", Some(6_119_000_000.0), None);
        p.net_profit = Some(KpiValue::Number(1234.5));
        p.investment_properties = Some(KpiValue::Text("6,3 milyar TL".to_string()));
        assert_eq!(KpiCard::TotalAssets.display(&p), "6.119.000.000 TL");
        assert_eq!(KpiCard::Equity.display(&p), "—");
        assert_eq!(KpiCard::NetProfit.display(&p), "1.234,5 TL");
        assert_eq!(KpiCard::InvestmentProperties.display(&p), "6,3 milyar TL");
    }

    #[test]
    fn test_text_kpis_are_not_plotted() {
        let mut p = point("2025/06", None, Some(50.0));
        p.total_assets = Some(KpiValue::Text("6,1 milyar".to_string()));
        assert_eq!(Series::TotalAssets.value(&p), None);
        let bound = axis_upper_bound(&[p]).unwrap();
        assert!((bound - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_net_rental_income_line() {
        let mut p = point("2025/06", None, None);
        assert_eq!(net_rental_income_line(&p), None);
        p.net_rental_income = Some(KpiValue::Number(245_000_000.0));
        assert_eq!(
            net_rental_income_line(&p).as_deref(),
            Some("Net kira geliri: 245.000.000 TL")
        );
        p.net_rental_income = Some(KpiValue::Text("açıklanmadı".to_string()));
        assert_eq!(net_rental_income_line(&p).as_deref(), Some("Net kira geliri: açıklanmadı"));
    }

    #[test]
    fn test_bar_readout() {
        let p = point("2025/06", Some(6_119_000_000.0), None);
        assert_eq!(
            bar_readout(&p, Series::TotalAssets),
            "2025/06 · Toplam Varlıklar: 6.119.000.000 TL"
        );
        assert_eq!(bar_readout(&p, Series::Equity), "2025/06 · Özkaynaklar: -");
    }
}
