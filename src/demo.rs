//! Offline backend used when the portal runs in demo mode
//!
//! Serves the 30.06.2025 seed figures the IR backend ships with and answers
//! assistant questions with a keyword lookup over the same data.

use crate::api::{
    ApiError, AssistantResponse, Disclosure, IrApi, KpiPoint, PortfolioProperty, Source,
};
use crate::format::{format_currency, format_kpi, KpiValue, CURRENCY_SUFFIX};
use crate::portfolio::total_valuation;
use std::time::Duration;

const COMPANY_CODE: &str = "TSGYO";

// Demo rows have no real disclosure id, so links point at the KAP search page.
const KAP_SEARCH_URL: &str = "https://www.kap.org.tr/tr/bildirim-sorgu";

pub struct DemoClient {
    kpis: Vec<KpiPoint>,
    portfolio: Vec<PortfolioProperty>,
    disclosures: Vec<Disclosure>,
    latency: Duration,
}

impl DemoClient {
    pub fn new() -> Self {
        Self {
            kpis: seed_kpis(),
            portfolio: seed_portfolio(),
            disclosures: seed_disclosures(),
            latency: Duration::ZERO,
        }
    }

    /// Delay every call, to make loading states visible
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn wait(&self) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }

    fn answer(&self, question: &str) -> AssistantResponse {
        let q = question.to_lowercase();
        let latest = self.kpis.last();

        if q.contains("portföy") || q.contains("portfoy") || q.contains("ekspertiz") {
            return AssistantResponse {
                answer: format!(
                    "Portföyün 30.06.2025 tarihli toplam ekspertiz değeri {}.",
                    format_currency(Some(total_valuation(&self.portfolio)))
                ),
                sources: None,
            };
        }

        if q.contains("özkaynak") || q.contains("ozkaynak") {
            if let Some(point) = latest {
                return AssistantResponse {
                    answer: format!(
                        "{} dönemi itibarıyla özkaynaklar {}.",
                        point.period,
                        format_kpi(point.equity.as_ref(), "", CURRENCY_SUFFIX)
                    ),
                    sources: None,
                };
            }
        }

        if q.contains("oda") {
            let hotels: Vec<String> = self
                .portfolio
                .iter()
                .filter_map(|p| p.rooms.map(|rooms| format!("{} {} odalıdır.", p.name, rooms)))
                .collect();
            if !hotels.is_empty() {
                return AssistantResponse {
                    answer: hotels.join(" "),
                    sources: None,
                };
            }
        }

        if q.contains("varlık") || q.contains("aktif") {
            if let Some(point) = latest {
                return AssistantResponse {
                    answer: format!(
                        "{} dönemi toplam varlıklar {}.",
                        point.period,
                        format_kpi(point.total_assets.as_ref(), "", CURRENCY_SUFFIX)
                    ),
                    sources: None,
                };
            }
        }

        let mentioned: Vec<&Disclosure> = self
            .disclosures
            .iter()
            .filter(|d| {
                d.title
                    .as_deref()
                    .map(|t| {
                        t.to_lowercase()
                            .split_whitespace()
                            .any(|word| word.len() > 3 && q.contains(word))
                    })
                    .unwrap_or(false)
            })
            .collect();
        if !mentioned.is_empty() || q.contains("haber") || q.contains("bildirim") {
            let cited = if mentioned.is_empty() {
                self.disclosures.iter().collect()
            } else {
                mentioned
            };
            return AssistantResponse {
                answer: "İlgili KAP bildirimleri aşağıda listelenmiştir.".to_string(),
                sources: Some(cited.into_iter().map(to_source).collect()),
            };
        }

        AssistantResponse {
            answer: "Bu soruya demo verileriyle yanıt veremiyorum. Portföy, özkaynaklar, \
                varlıklar veya KAP bildirimleri hakkında sorabilirsiniz."
                .to_string(),
            sources: None,
        }
    }
}

impl Default for DemoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IrApi for DemoClient {
    fn get_kpis(&self) -> Result<Vec<KpiPoint>, ApiError> {
        self.wait();
        Ok(self.kpis.clone())
    }

    fn get_portfolio(&self) -> Result<Vec<PortfolioProperty>, ApiError> {
        self.wait();
        Ok(self.portfolio.clone())
    }

    fn get_disclosures(&self) -> Result<Vec<Disclosure>, ApiError> {
        self.wait();
        Ok(self.disclosures.clone())
    }

    fn ask_assistant(&self, question: &str) -> Result<AssistantResponse, ApiError> {
        self.wait();
        Ok(self.answer(question))
    }
}

fn to_source(disclosure: &Disclosure) -> Source {
    Source {
        id: disclosure.id,
        title: disclosure.title.clone(),
        url: disclosure.url.clone(),
        publish_datetime: disclosure.publish_datetime.clone(),
    }
}

fn seed_kpis() -> Vec<KpiPoint> {
    vec![KpiPoint {
        period: "2025/06".to_string(),
        total_assets: Some(KpiValue::from(6_119_000_000.0)),
        equity: Some(KpiValue::from(5_902_367_910.0)),
        investment_properties: Some(KpiValue::from(6_317_737_406.0)),
        net_rental_income: None,
        net_profit: None,
    }]
}

#[allow(clippy::too_many_arguments)]
fn property(
    id: i64,
    name: &str,
    property_type: &str,
    city: &str,
    gross_area_sqm: Option<f64>,
    gla_sqm: Option<f64>,
    rooms: Option<u32>,
    valuation: f64,
) -> PortfolioProperty {
    PortfolioProperty {
        id,
        name: name.to_string(),
        property_type: Some(property_type.to_string()),
        city: Some(city.to_string()),
        rooms,
        gross_area_sqm,
        gla_sqm,
        valuation_value_tl: Some(valuation),
        valuation_date: Some("2025-06-30".to_string()),
    }
}

fn seed_portfolio() -> Vec<PortfolioProperty> {
    vec![
        property(1, "Fındıklı Ofis Binaları", "Ofis", "İstanbul", Some(17_827.0), None, None, 3_307_537_942.0),
        property(2, "Pendorya AVM", "AVM", "İstanbul", Some(80_648.0), Some(30_573.0), None, 1_531_336_185.0),
        property(3, "Divan Adana Oteli", "Otel", "Adana", None, None, Some(180), 1_008_753_034.0),
        property(4, "Tahir Han", "Ofis/Han", "İstanbul", Some(3_198.0), None, None, 470_110_245.0),
    ]
}

fn seed_disclosures() -> Vec<Disclosure> {
    let disclosure = |id: i64, kap_id: &str, kind: &str, title: &str, published: &str| Disclosure {
        id,
        company_code: COMPANY_CODE.to_string(),
        kap_id: kap_id.to_string(),
        kind: Some(kind.to_string()),
        title: Some(title.to_string()),
        publish_datetime: Some(published.to_string()),
        url: Some(KAP_SEARCH_URL.to_string()),
    };

    vec![
        disclosure(1, "demo-3", "FR", "2025/06 Dönemi Finansal Rapor", "2025-08-11T19:05:00"),
        disclosure(2, "demo-2", "ÖDA", "Pendorya AVM Kiracı Sözleşmeleri", "2025-07-15T18:30:00"),
        disclosure(3, "demo-1", "ÖDA", "Gayrimenkul Değerleme Raporları", "2025-07-03T17:45:00"),
    ]
}
