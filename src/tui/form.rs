use crate::app::submission::{
    check_question, submit, Notice, NoticeLevel, Submission, SubmissionOutcome, ANSWER_HEADING,
};
use crate::persona::Persona;
use crate::provider::{CompletionBackend, CompletionInvoker};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub const FORM_TITLE: &str = "LLM機能を搭載した質問アプリ";
const FORM_DESCRIPTION: &str =
    "入力したテキストに対して、選択した専門家の視点からLLM（大規模言語モデル）が回答を生成します。";
const PERSONA_PROMPT: &str = "LLMに振る舞わせる専門家を選択してください:";
const QUESTION_PROMPT: &str = "ここに質問を入力してください";
const SUBMIT_LABEL: &str = "回答を生成";
const BUSY_TEXT: &str = "LLMが回答を生成中です...";
const IN_FLIGHT_WARNING: &str = "前の質問を処理中です。";

const PROCESSING_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);
const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);
const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Persona,
    Question,
    Submit,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Persona => Self::Question,
            Self::Question => Self::Submit,
            Self::Submit => Self::Persona,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Persona => Self::Submit,
            Self::Question => Self::Persona,
            Self::Submit => Self::Question,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormAction {
    None,
    Submit { persona: Persona, question: String },
    Quit,
}

struct ProcessingWorker {
    result_rx: Receiver<Submission>,
}

struct FormState {
    persona: Persona,
    question: String,
    focus: Focus,
    startup_notices: Vec<Notice>,
    notices: Vec<Notice>,
    answer: Option<String>,
    processing: Option<ProcessingWorker>,
    spinner_index: usize,
    last_spinner_tick: Instant,
    cursor_visible: bool,
    last_cursor_tick: Instant,
}

impl FormState {
    fn new(startup_notices: Vec<Notice>) -> Self {
        Self {
            persona: Persona::default(),
            question: String::new(),
            focus: Focus::Question,
            startup_notices,
            notices: Vec::new(),
            answer: None,
            processing: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
            cursor_visible: true,
            last_cursor_tick: Instant::now(),
        }
    }

    fn spinner_frame(&self) -> &'static str {
        PROCESSING_FRAMES[self.spinner_index % PROCESSING_FRAMES.len()]
    }

    fn advance_spinner_if_needed(&mut self) {
        if self.processing.is_some() && self.last_spinner_tick.elapsed() >= SPINNER_TICK_INTERVAL {
            self.spinner_index = (self.spinner_index + 1) % PROCESSING_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    fn advance_cursor_blink_if_needed(&mut self) {
        if self.last_cursor_tick.elapsed() >= CURSOR_BLINK_INTERVAL {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_tick = Instant::now();
        }
    }

    fn cursor_suffix(&self) -> &'static str {
        if self.cursor_visible && self.focus == Focus::Question {
            "█"
        } else {
            " "
        }
    }

    fn status_line(&self) -> String {
        if self.processing.is_some() {
            return format!("{BUSY_TEXT} {}", self.spinner_frame());
        }
        match self.focus {
            Focus::Persona => "↑/↓ or 1-4: select persona  Tab: next  Ctrl+S: submit  Esc: quit"
                .to_string(),
            Focus::Question => {
                "type your question (Enter: newline)  Tab: next  Ctrl+S: submit  Esc: quit"
                    .to_string()
            }
            Focus::Submit => "Enter: submit  Tab: next  Esc: quit".to_string(),
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> FormAction {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c') => FormAction::Quit,
                KeyCode::Char('s') => self.begin_submit(),
                _ => FormAction::None,
            };
        }

        match code {
            KeyCode::Esc => return FormAction::Quit,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            _ => {}
        }

        match self.focus {
            Focus::Persona => match code {
                KeyCode::Up | KeyCode::Left => self.persona = self.persona.previous(),
                KeyCode::Down | KeyCode::Right => self.persona = self.persona.next(),
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    self.persona = Persona::ALL[index];
                }
                KeyCode::Enter => self.focus = Focus::Question,
                _ => {}
            },
            Focus::Question => match code {
                KeyCode::Enter => self.question.push('\n'),
                KeyCode::Backspace => {
                    self.question.pop();
                }
                KeyCode::Char(c) => self.question.push(c),
                _ => {}
            },
            Focus::Submit => {
                if code == KeyCode::Enter {
                    return self.begin_submit();
                }
            }
        }
        FormAction::None
    }

    /// Clears the previous result; empty questions stop here with a warning.
    fn begin_submit(&mut self) -> FormAction {
        if self.processing.is_some() {
            self.notices = vec![Notice::warning(IN_FLIGHT_WARNING)];
            return FormAction::None;
        }
        self.answer = None;
        self.notices.clear();
        if let Err(notice) = check_question(&self.question) {
            self.notices.push(notice);
            return FormAction::None;
        }
        FormAction::Submit {
            persona: self.persona,
            question: self.question.clone(),
        }
    }

    fn apply_submission(&mut self, submission: Submission) {
        self.notices = submission.notices;
        self.answer = match submission.outcome {
            SubmissionOutcome::Answered(text) => Some(text),
            SubmissionOutcome::Rejected | SubmissionOutcome::Failed { .. } => None,
        };
    }
}

pub fn run_form_tui<B>(
    invoker: Arc<CompletionInvoker<B>>,
    startup_notices: Vec<Notice>,
) -> Result<(), String>
where
    B: CompletionBackend + 'static,
{
    let mut terminal = setup_terminal()?;
    let mut state = FormState::new(startup_notices);

    let result = run_event_loop(&mut terminal, &invoker, &mut state);
    teardown_terminal(&mut terminal)?;

    result
}

fn run_event_loop<B>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    invoker: &Arc<CompletionInvoker<B>>,
    state: &mut FormState,
) -> Result<(), String>
where
    B: CompletionBackend + 'static,
{
    loop {
        state.advance_spinner_if_needed();
        state.advance_cursor_blink_if_needed();
        check_processing_result(state)?;
        draw_form_ui(terminal, state)?;

        if !event::poll(UI_POLL_INTERVAL).map_err(|e| format!("failed to poll events: {e}"))? {
            continue;
        }

        let Event::Key(key) = event::read().map_err(|e| format!("failed to read event: {e}"))?
        else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.handle_key(key.code, key.modifiers) {
            FormAction::None => {}
            FormAction::Quit => break,
            FormAction::Submit { persona, question } => {
                let worker_invoker = Arc::clone(invoker);
                let (tx, rx) = mpsc::channel();
                thread::spawn(move || {
                    let submission = submit(worker_invoker.as_ref(), persona, &question);
                    let _ = tx.send(submission);
                });
                state.processing = Some(ProcessingWorker { result_rx: rx });
                state.spinner_index = 0;
                state.last_spinner_tick = Instant::now();
            }
        }
    }

    Ok(())
}

fn check_processing_result(state: &mut FormState) -> Result<(), String> {
    let Some(worker) = state.processing.take() else {
        return Ok(());
    };

    match worker.result_rx.try_recv() {
        Ok(submission) => state.apply_submission(submission),
        Err(mpsc::TryRecvError::Empty) => {
            state.processing = Some(worker);
        }
        Err(mpsc::TryRecvError::Disconnected) => {
            return Err("completion worker disconnected unexpectedly".to_string());
        }
    }

    Ok(())
}

fn notice_line(notice: &Notice) -> Line<'static> {
    let color = match notice.level {
        NoticeLevel::Error => Color::Red,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Info => Color::Gray,
    };
    Line::styled(notice.text.clone(), Style::default().fg(color))
}

fn header_lines(state: &FormState) -> Vec<Line<'static>> {
    let mut header = vec![
        Line::styled(FORM_TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(FORM_DESCRIPTION),
    ];
    header.extend(state.startup_notices.iter().map(notice_line));
    header
}

fn focus_border(state: &FormState, focus: Focus) -> Style {
    if state.focus == focus {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn draw_form_ui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &FormState,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let header_height = 4 + state.startup_notices.len() as u16;
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(header_height),
                    Constraint::Length(6),
                    Constraint::Min(5),
                    Constraint::Length(3),
                    Constraint::Min(6),
                ])
                .split(frame.area());

            let header_widget = Paragraph::new(header_lines(state))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .wrap(Wrap { trim: false });
            frame.render_widget(header_widget, sections[0]);

            let options = Persona::ALL
                .iter()
                .enumerate()
                .map(|(index, persona)| {
                    let selected = *persona == state.persona;
                    let marker = if selected { "(●)" } else { "( )" };
                    let text = format!("{} {} {}", index + 1, marker, persona.label());
                    if selected {
                        Line::styled(text, Style::default().fg(Color::Green))
                    } else {
                        Line::raw(text)
                    }
                })
                .collect::<Vec<_>>();
            let persona_widget = Paragraph::new(options).block(
                Block::default()
                    .title(PERSONA_PROMPT)
                    .borders(Borders::ALL)
                    .border_style(focus_border(state, Focus::Persona)),
            );
            frame.render_widget(persona_widget, sections[1]);

            let question_widget =
                Paragraph::new(format!("{}{}", state.question, state.cursor_suffix()))
                    .block(
                        Block::default()
                            .title(QUESTION_PROMPT)
                            .borders(Borders::ALL)
                            .border_style(focus_border(state, Focus::Question)),
                    )
                    .wrap(Wrap { trim: false });
            frame.render_widget(question_widget, sections[2]);

            let submit_widget = Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("[ {SUBMIT_LABEL} ]"),
                    focus_border(state, Focus::Submit),
                ),
                Span::raw(format!("  {}", state.status_line())),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if state.processing.is_some() {
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        focus_border(state, Focus::Submit)
                    }),
            );
            frame.render_widget(submit_widget, sections[3]);

            let mut output = state.notices.iter().map(notice_line).collect::<Vec<_>>();
            if let Some(answer) = &state.answer {
                output.push(Line::styled(
                    ANSWER_HEADING,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                output.extend(answer.lines().map(|line| Line::raw(line.to_string())));
            }
            let output_widget = Paragraph::new(output)
                .block(Block::default().title("Output").borders(Borders::ALL))
                .wrap(Wrap { trim: false });
            frame.render_widget(output_widget, sections[4]);
        })
        .map_err(|e| format!("failed to render form UI: {e}"))?;

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)
        .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| format!("failed to initialize terminal: {e}"))
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)
        .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))?;
    Ok(())
}
