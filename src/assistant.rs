//! IR Assistant panel
//!
//! Question/answer chat backed by the assistant endpoint:
//! - Append-only transcript of user and bot turns
//! - One question in flight at a time
//! - Citation block for answers that reference disclosures
//! - Typing indicator while a question is pending

use crate::api::{ApiError, AssistantResponse, SharedApi, Source};
use crate::format::{format_date, PLACEHOLDER};
use crate::theme::Theme;
use gpui::prelude::*;
use gpui::*;

/// Bot answer shown when the assistant call fails for any reason
pub const FALLBACK_ANSWER: &str = "Üzgünüm, bir hata oluştu. Lütfen tekrar deneyin.";

pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "Pendorya ile ilgili son haberler neler?",
    "Şirketin son özkaynak durumu nedir?",
    "Portföy toplam değeri nedir?",
    "Divan Adana Oteli kaç odalı?",
];

// =============================================================================
// Transcript
// =============================================================================

/// One entry in the chat transcript
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantTurn {
    User { text: String },
    Bot { answer: String, sources: Vec<Source> },
}

impl AssistantTurn {
    pub fn is_user(&self) -> bool {
        matches!(self, AssistantTurn::User { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Submitting,
}

/// Chat state: input buffer, transcript and the in-flight guard.
///
/// Turns are only ever appended. Each completed cycle adds exactly one user
/// turn followed by one bot turn.
#[derive(Debug, Clone, Default)]
pub struct AssistantSession {
    transcript: Vec<AssistantTurn>,
    input: String,
    status: SessionStatus,
}

impl AssistantSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[AssistantTurn] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SessionStatus::Submitting
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_input(&mut self, text: &str) {
        self.input.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Whether the send control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.input.trim().is_empty()
    }

    /// Start a submission cycle.
    ///
    /// Returns the question to send, or `None` when the input is blank or a
    /// question is already pending; a rejected call changes nothing.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }

        let question = std::mem::take(&mut self.input);
        self.transcript.push(AssistantTurn::User {
            text: question.clone(),
        });
        self.status = SessionStatus::Submitting;
        Some(question)
    }

    /// Finish the pending cycle with the assistant's result.
    pub fn complete(&mut self, result: Result<AssistantResponse, ApiError>) {
        if !self.is_submitting() {
            tracing::debug!("ignoring assistant completion with no pending question");
            return;
        }

        let (answer, sources) = match result {
            Ok(response) => response.into_parts(),
            Err(e) => {
                tracing::warn!(error = %e, "assistant request failed");
                (FALLBACK_ANSWER.to_string(), Vec::new())
            }
        };

        self.transcript.push(AssistantTurn::Bot { answer, sources });
        self.status = SessionStatus::Idle;
    }
}

// =============================================================================
// Assistant View
// =============================================================================

pub struct AssistantView {
    session: AssistantSession,
    api: SharedApi,
    theme: Theme,
    focus_handle: FocusHandle,
}

impl AssistantView {
    pub fn new(api: SharedApi, theme: Theme, cx: &mut Context<Self>) -> Self {
        Self {
            session: AssistantSession::new(),
            api,
            theme,
            focus_handle: cx.focus_handle(),
        }
    }

    /// Send the current input, if the session accepts it
    pub fn submit(&mut self, cx: &mut Context<Self>) {
        let Some(question) = self.session.begin_submit() else {
            return;
        };
        cx.notify();

        let client = self.api.clone();
        let request = cx.background_spawn(async move { client.ask_assistant(&question) });

        cx.spawn(async move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let result = request.await;

            let _ = cx.update(|cx| {
                if let Some(entity) = this.upgrade() {
                    entity.update(cx, |view: &mut Self, cx: &mut Context<Self>| {
                        view.session.complete(result);
                        cx.notify();
                    });
                }
            });
        })
        .detach();
    }

    fn ask_example(&mut self, question: &str, cx: &mut Context<Self>) {
        if self.session.is_submitting() {
            return;
        }
        self.session.set_input(question);
        self.submit(cx);
    }

    fn handle_key_down(&mut self, event: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        if keystroke.modifiers.control || keystroke.modifiers.platform {
            return;
        }

        match keystroke.key.as_str() {
            "enter" => self.submit(cx),
            "backspace" => {
                self.session.backspace();
                cx.notify();
            }
            _ => {
                if let Some(text) = keystroke.key_char.as_deref() {
                    self.session.push_input(text);
                    cx.notify();
                }
            }
        }
    }

    // ========================================================================
    // RENDERING
    // ========================================================================

    fn render_header(&self) -> Div {
        let theme = &self.theme;

        div()
            .px(px(16.0))
            .py(px(14.0))
            .flex()
            .items_center()
            .gap(px(12.0))
            .bg(theme.text)
            .child(
                div()
                    .size(px(32.0))
                    .rounded(px(8.0))
                    .bg(theme.accent)
                    .flex()
                    .items_center()
                    .justify_center()
                    .text_size(px(14.0))
                    .font_weight(FontWeight::BOLD)
                    .text_color(theme.user_bubble_text)
                    .child("IR"),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(2.0))
                    .child(
                        div()
                            .text_size(px(15.0))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(theme.card_bg)
                            .child("Yatırımcı İlişkileri Asistanı"),
                    )
                    .child(
                        div()
                            .text_size(px(11.0))
                            .text_color(theme.text_dimmed)
                            .child("TSGYO hakkında sorularınızı sorun"),
                    ),
            )
    }

    fn render_examples(&self, cx: &mut Context<Self>) -> Div {
        let theme = &self.theme;

        div()
            .mt(px(40.0))
            .flex()
            .flex_col()
            .items_center()
            .gap(px(6.0))
            .child(
                div()
                    .text_size(px(13.0))
                    .text_color(theme.text_dimmed)
                    .mb(px(4.0))
                    .child("Örnek sorular:"),
            )
            .children(EXAMPLE_QUESTIONS.iter().enumerate().map(|(idx, &question)| {
                div()
                    .id(SharedString::from(format!("example-{}", idx)))
                    .px(px(10.0))
                    .py(px(4.0))
                    .rounded(px(6.0))
                    .text_size(px(12.0))
                    .text_color(theme.text_muted)
                    .cursor_pointer()
                    .hover(|s| s.bg(theme.hover_bg).text_color(theme.text))
                    .on_click(cx.listener(move |this, _event, _window, cx| {
                        this.ask_example(question, cx);
                    }))
                    .child(format!("\"{}\"", question))
            }))
    }

    fn render_turn(&self, index: usize, turn: &AssistantTurn) -> Div {
        let theme = &self.theme;

        let bubble = match turn {
            AssistantTurn::User { text } => div()
                .max_w(px(560.0))
                .p(px(14.0))
                .rounded(px(14.0))
                .bg(theme.user_bubble)
                .text_color(theme.user_bubble_text)
                .text_size(px(14.0))
                .child(text.clone()),
            AssistantTurn::Bot { answer, sources } => div()
                .max_w(px(640.0))
                .p(px(14.0))
                .rounded(px(14.0))
                .bg(theme.bot_bubble)
                .border_1()
                .border_color(theme.border)
                .text_color(theme.text)
                .text_size(px(14.0))
                .flex()
                .flex_col()
                .gap(px(10.0))
                .child(answer.clone())
                .when(!sources.is_empty(), |el| {
                    el.child(render_citations(theme, index, sources))
                }),
        };

        div()
            .w_full()
            .flex()
            .when(turn.is_user(), |el| el.justify_end())
            .when(!turn.is_user(), |el| el.justify_start())
            .child(bubble)
    }

    fn render_typing_indicator(&self) -> Div {
        let theme = &self.theme;
        let dot = || div().size(px(8.0)).rounded_full().bg(theme.text_dimmed);

        div().w_full().flex().justify_start().child(
            div()
                .p(px(14.0))
                .rounded(px(14.0))
                .bg(theme.bot_bubble)
                .border_1()
                .border_color(theme.border)
                .flex()
                .gap(px(4.0))
                .child(dot())
                .child(dot())
                .child(dot()),
        )
    }

    fn render_messages(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let transcript = self.session.transcript();

        div()
            .id("assistant-messages")
            .flex_grow()
            .overflow_y_scroll()
            .p(px(16.0))
            .bg(theme.background)
            .flex()
            .flex_col()
            .gap(px(20.0))
            .when(transcript.is_empty(), |el| el.child(self.render_examples(cx)))
            .children(
                transcript
                    .iter()
                    .enumerate()
                    .map(|(idx, turn)| self.render_turn(idx, turn))
                    .collect::<Vec<_>>(),
            )
            .when(self.session.is_submitting(), |el| {
                el.child(self.render_typing_indicator())
            })
    }

    fn render_input(&self, window: &mut Window, cx: &mut Context<Self>) -> Div {
        let theme = &self.theme;
        let input = self.session.input();
        let focused = self.focus_handle.is_focused(window);
        let can_submit = self.session.can_submit();

        let field = div()
            .id("assistant-input")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::handle_key_down))
            .on_click(cx.listener(|this, _event, window, _cx| {
                window.focus(&this.focus_handle);
            }))
            .flex_grow()
            .h(px(40.0))
            .px(px(14.0))
            .flex()
            .items_center()
            .rounded(px(8.0))
            .border_1()
            .border_color(if focused { theme.accent } else { theme.border })
            .text_size(px(14.0))
            .cursor_text()
            .map(|el| {
                if input.is_empty() {
                    el.text_color(theme.text_dimmed)
                        .child("Sorunuzu buraya yazın...")
                } else {
                    el.text_color(theme.text).child(input.to_string())
                }
            });

        let send = div()
            .id("assistant-send")
            .h(px(40.0))
            .px(px(16.0))
            .flex()
            .items_center()
            .rounded(px(8.0))
            .bg(theme.accent)
            .text_color(theme.user_bubble_text)
            .text_size(px(13.0))
            .font_weight(FontWeight::SEMIBOLD)
            .child("Gönder")
            .map(|el| {
                if can_submit {
                    el.cursor_pointer()
                        .hover(|s| s.bg(theme.link))
                        .on_click(cx.listener(|this, _event, _window, cx| this.submit(cx)))
                } else {
                    el.opacity(0.5)
                }
            });

        div()
            .p(px(16.0))
            .bg(theme.card_bg)
            .border_t_1()
            .border_color(theme.border_subtle)
            .flex()
            .gap(px(8.0))
            .child(field)
            .child(send)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Citation label; a source without a title still gets a row.
pub fn citation_title(source: &Source) -> String {
    non_blank(source.title.as_deref()).unwrap_or(PLACEHOLDER).to_string()
}

pub fn citation_date(source: &Source) -> String {
    non_blank(source.publish_datetime.as_deref())
        .map(format_date)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Link target, if the source carries a usable one
pub fn citation_link(source: &Source) -> Option<String> {
    non_blank(source.url.as_deref()).map(str::to_string)
}

fn render_citations(theme: &Theme, turn_index: usize, sources: &[Source]) -> Div {
    div()
        .p(px(8.0))
        .rounded(px(6.0))
        .bg(theme.card_bg_elevated)
        .border_1()
        .border_color(theme.border_subtle)
        .flex()
        .flex_col()
        .gap(px(6.0))
        .child(
            div()
                .text_size(px(10.0))
                .font_weight(FontWeight::SEMIBOLD)
                .text_color(theme.text_muted)
                .child("İLGİLİ BİLDİRİMLER:"),
        )
        .children(sources.iter().map(|source| {
            let link = citation_link(source);
            let has_link = link.is_some();
            div()
                .id(SharedString::from(format!("source-{}-{}", turn_index, source.id)))
                .flex()
                .items_center()
                .gap(px(6.0))
                .when_some(link, |el, url| {
                    el.cursor_pointer()
                        .on_click(move |_event, _window, cx| cx.open_url(&url))
                })
                .child(
                    div()
                        .text_size(px(13.0))
                        .map(|el| {
                            if has_link {
                                el.text_color(theme.link).hover(|s| s.text_color(theme.accent))
                            } else {
                                el.text_color(theme.text)
                            }
                        })
                        .child(citation_title(source)),
                )
                .child(
                    div()
                        .text_size(px(11.0))
                        .text_color(theme.text_dimmed)
                        .child(format!("({})", citation_date(source))),
                )
        }))
}

impl Focusable for AssistantView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for AssistantView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .size_full()
            .flex()
            .flex_col()
            .rounded(px(12.0))
            .border_1()
            .border_color(theme.border)
            .overflow_hidden()
            .bg(theme.card_bg)
            .child(self.render_header())
            .child(self.render_messages(cx))
            .child(self.render_input(window, cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    fn answer(text: &str) -> AssistantResponse {
        AssistantResponse {
            answer: text.to_string(),
            sources: None,
        }
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let mut session = AssistantSession::new();
        assert_eq!(session.begin_submit(), None);

        session.set_input("   \t ");
        assert_eq!(session.begin_submit(), None);
        assert!(session.transcript().is_empty());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.input(), "   \t ");
    }

    #[test]
    fn test_submit_appends_user_turn_and_clears_input() {
        let mut session = AssistantSession::new();
        session.set_input("What is total portfolio value?");

        let question = session.begin_submit();
        assert_eq!(question.as_deref(), Some("What is total portfolio value?"));
        assert_eq!(session.input(), "");
        assert!(session.is_submitting());
        assert_eq!(
            session.transcript(),
            &[AssistantTurn::User {
                text: "What is total portfolio value?".to_string()
            }]
        );
    }

    #[test]
    fn test_second_submit_rejected_while_pending() {
        let mut session = AssistantSession::new();
        session.set_input("first");
        session.begin_submit();

        session.set_input("second");
        assert_eq!(session.begin_submit(), None);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.input(), "second");
        assert!(!session.can_submit());
    }

    #[test]
    fn test_success_appends_bot_turn() {
        let mut session = AssistantSession::new();
        session.set_input("q");
        session.begin_submit();
        session.complete(Ok(answer("a")));

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(
            session.transcript()[1],
            AssistantTurn::Bot {
                answer: "a".to_string(),
                sources: Vec::new()
            }
        );
    }

    #[test]
    fn test_failure_appends_fallback_turn() {
        let mut session = AssistantSession::new();
        session.set_input("q");
        session.begin_submit();
        session.complete(Err(ApiError::Network("timed out".to_string())));

        match &session.transcript()[1] {
            AssistantTurn::Bot { answer, sources } => {
                assert_eq!(answer, FALLBACK_ANSWER);
                assert!(sources.is_empty());
            }
            other => panic!("expected bot turn, got {:?}", other),
        }
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_completion_without_pending_question_is_ignored() {
        let mut session = AssistantSession::new();
        session.complete(Ok(answer("stray")));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_transcript_grows_by_two_per_cycle() {
        let mut session = AssistantSession::new();
        for round in 0..3 {
            session.set_input(format!("question {}", round));
            session.begin_submit();
            session.complete(Ok(answer("ok")));
            assert_eq!(session.transcript().len(), (round + 1) * 2);
        }

        let roles: Vec<bool> = session.transcript().iter().map(|t| t.is_user()).collect();
        assert_eq!(roles, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_input_editing() {
        let mut session = AssistantSession::new();
        session.push_input("Ne");
        session.push_input("t");
        session.backspace();
        assert_eq!(session.input(), "Ne");
    }

    #[test]
    fn test_citation_with_missing_fields() {
        let bare = Source {
            id: 7,
            title: None,
            url: Some("  ".to_string()),
            publish_datetime: None,
        };
        assert_eq!(citation_title(&bare), "-");
        assert_eq!(citation_date(&bare), "-");
        assert_eq!(citation_link(&bare), None);

        let full = Source {
            id: 8,
            title: Some("Gayrimenkul Değerleme Raporları".to_string()),
            url: Some("https://www.kap.org.tr/tr/Bildirim/1".to_string()),
            publish_datetime: Some("2025-07-03T17:45:00".to_string()),
        };
        assert_eq!(citation_title(&full), "Gayrimenkul Değerleme Raporları");
        assert_eq!(citation_date(&full), "03.07.2025");
        assert_eq!(citation_link(&full).as_deref(), Some("https://www.kap.org.tr/tr/Bildirim/1"));
    }
}
