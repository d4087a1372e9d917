//! Integration tests for the IR portal
//!
//! These tests drive the view controllers the way the views do, minus the
//! window:
//! - Backend result -> fetch event -> view state -> rendered phase
//! - Assistant submission cycles against scripted and demo backends

use crate::api::*;
use crate::assistant::*;
use crate::dashboard::{axis_upper_bound, latest, KpiCard};
use crate::demo::DemoClient;
use crate::format::KpiValue;
use crate::portfolio::{area_or_rooms, total_valuation};
use crate::view_state::*;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::VecDeque;

// ============================================================================
// SCRIPTED BACKEND
// ============================================================================

/// Backend that replays queued results and records every question asked
#[derive(Default)]
struct ScriptedApi {
    answers: Mutex<VecDeque<Result<AssistantResponse, ApiError>>>,
    questions: Mutex<Vec<String>>,
    portfolio: Mutex<Option<Result<Vec<PortfolioProperty>, ApiError>>>,
}

impl ScriptedApi {
    fn with_answers(answers: Vec<Result<AssistantResponse, ApiError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            ..Self::default()
        }
    }

    fn asked(&self) -> Vec<String> {
        self.questions.lock().clone()
    }
}

impl IrApi for ScriptedApi {
    fn get_kpis(&self) -> Result<Vec<KpiPoint>, ApiError> {
        Ok(Vec::new())
    }

    fn get_portfolio(&self) -> Result<Vec<PortfolioProperty>, ApiError> {
        self.portfolio.lock().take().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn get_disclosures(&self) -> Result<Vec<Disclosure>, ApiError> {
        Ok(Vec::new())
    }

    fn ask_assistant(&self, question: &str) -> Result<AssistantResponse, ApiError> {
        self.questions.lock().push(question.to_string());
        self.answers
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted answer".to_string())))
    }
}

/// One full submit -> call -> complete cycle, as the assistant view runs it
fn run_cycle(session: &mut AssistantSession, api: &dyn IrApi, input: &str) -> bool {
    session.set_input(input);
    match session.begin_submit() {
        Some(question) => {
            session.complete(api.ask_assistant(&question));
            true
        }
        None => false,
    }
}

// ============================================================================
// FETCH LIFECYCLE INTEGRATION TESTS
// ============================================================================

#[test]
fn test_portfolio_fetch_failure_shows_view_message() {
    let api = ScriptedApi::default();
    *api.portfolio.lock() = Some(Err(ApiError::Server {
        status: 500,
        message: "internal".to_string(),
    }));

    let mut state: ViewState<PortfolioProperty> = ViewState::new();
    state.dispatch(FetchEvent::Started);
    assert_eq!(state.phase(), ViewPhase::Loading);

    state.dispatch(settle("portfolio", api.get_portfolio(), "Portföy verisi yüklenemedi."));
    assert_eq!(state.phase(), ViewPhase::Failed("Portföy verisi yüklenemedi."));
    assert!(state.items().is_empty());
    assert!(!state.loading);
}

#[test]
fn test_empty_backend_renders_empty_phase() {
    let api = ScriptedApi::default();
    let mut state = ViewState::new();
    state.dispatch(FetchEvent::Started);
    state.dispatch(settle("disclosures", api.get_disclosures(), "unused"));
    assert_eq!(state.phase(), ViewPhase::Empty);
}

#[test]
fn test_demo_summary_pipeline() {
    let api = DemoClient::new();

    let mut kpis = ViewState::new();
    kpis.dispatch(FetchEvent::Started);
    kpis.dispatch(settle("kpis", api.get_kpis(), "unused"));
    assert_eq!(kpis.phase(), ViewPhase::Ready);

    let current = latest(kpis.items()).unwrap();
    assert_eq!(KpiCard::TotalAssets.display(current), "6.119.000.000 TL");
    assert_eq!(KpiCard::NetProfit.display(current), "—");
    assert!(axis_upper_bound(kpis.items()).is_some());

    let mut portfolio = ViewState::new();
    portfolio.dispatch(FetchEvent::Started);
    portfolio.dispatch(settle("portfolio", api.get_portfolio(), "unused"));

    let hotel = portfolio
        .items()
        .iter()
        .find(|p| p.name == "Divan Adana Oteli")
        .unwrap();
    assert_eq!(area_or_rooms(hotel), "180 oda");
    assert_eq!(
        Some(total_valuation(portfolio.items())),
        current.investment_properties.as_ref().and_then(KpiValue::as_number)
    );
}

// ============================================================================
// ASSISTANT INTEGRATION TESTS
// ============================================================================

#[test]
fn test_assistant_cycles_against_scripted_backend() {
    let api = ScriptedApi::with_answers(vec![
        Ok(AssistantResponse {
            answer: "Özkaynaklar 5.902.367.910 TL.".to_string(),
            sources: None,
        }),
        Err(ApiError::Network("timed out".to_string())),
    ]);
    let mut session = AssistantSession::new();

    assert!(run_cycle(&mut session, &api, "Şirketin son özkaynak durumu nedir?"));
    assert!(run_cycle(&mut session, &api, "Portföy toplam değeri nedir?"));
    assert!(!run_cycle(&mut session, &api, "   "));

    assert_eq!(
        api.asked(),
        vec![
            "Şirketin son özkaynak durumu nedir?".to_string(),
            "Portföy toplam değeri nedir?".to_string(),
        ]
    );

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 4);
    assert_eq!(
        transcript[3],
        AssistantTurn::Bot {
            answer: FALLBACK_ANSWER.to_string(),
            sources: Vec::new(),
        }
    );
    assert_eq!(session.status(), SessionStatus::Idle);
}

/// Decode a backend body the way the HTTP client does
fn wire_answer(body: serde_json::Value) -> Result<AssistantResponse, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[test]
fn test_answer_with_sparse_citation_is_shown() {
    let api = ScriptedApi::with_answers(vec![wire_answer(json!({
        "answer": "Değerleme raporları 03.07.2025 tarihinde yayımlandı.",
        "sources": [{ "id": 3, "title": null, "url": null, "publish_datetime": null }]
    }))]);
    let mut session = AssistantSession::new();

    assert!(run_cycle(&mut session, &api, "Değerleme raporları ne zaman yayımlandı?"));

    match &session.transcript()[1] {
        AssistantTurn::Bot { answer, sources } => {
            assert_eq!(answer, "Değerleme raporları 03.07.2025 tarihinde yayımlandı.");
            assert_eq!(sources.len(), 1);
            assert_eq!(citation_title(&sources[0]), "-");
            assert_eq!(citation_date(&sources[0]), "-");
            assert_eq!(citation_link(&sources[0]), None);
        }
        other => panic!("expected bot turn, got {:?}", other),
    }
}

#[test]
fn test_pending_question_blocks_backend_calls() {
    let api = ScriptedApi::with_answers(vec![]);
    let mut session = AssistantSession::new();

    session.set_input("first");
    let first = session.begin_submit().unwrap();

    // A second send while the first is in flight never reaches the backend
    assert!(!run_cycle(&mut session, &api, "second"));
    assert!(api.asked().is_empty());

    session.complete(api.ask_assistant(&first));
    assert_eq!(api.asked(), vec!["first".to_string()]);
    assert_eq!(session.transcript().len(), 2);
}

#[test]
fn test_demo_assistant_cites_disclosures() {
    let api = DemoClient::new();
    let mut session = AssistantSession::new();

    assert!(run_cycle(&mut session, &api, EXAMPLE_QUESTIONS[0]));

    match &session.transcript()[1] {
        AssistantTurn::Bot { sources, .. } => {
            assert_eq!(sources.len(), 1);
            assert!(citation_title(&sources[0]).contains("Pendorya"));
        }
        other => panic!("expected bot turn, got {:?}", other),
    }
}

#[test]
fn test_every_example_question_gets_an_answer() {
    let api = DemoClient::new();
    let mut session = AssistantSession::new();

    for question in EXAMPLE_QUESTIONS {
        assert!(run_cycle(&mut session, &api, question));
    }

    assert_eq!(session.transcript().len(), EXAMPLE_QUESTIONS.len() * 2);
    assert!(session
        .transcript()
        .iter()
        .all(|turn| !matches!(turn, AssistantTurn::Bot { answer, .. } if answer == FALLBACK_ANSWER)));
}
