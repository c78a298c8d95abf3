//! REPL line parsing
//!
//! Plain text is a search. Lines starting with `:` are commands; list
//! positions are 1-based as printed by the renderer.

use insight_session::SessionCommand;

pub const HELP: &str = "\
명령어:
  <검색어>       검색 (빈 줄은 초기화)
  :add N         N번 추천 인사이트의 조건 추가
  :remove N      N번 필터 태그 제거
  :panel N       N번 샘플 패널 상세 보기
  :strategy N    N번 전략 카드 상세 보기
  :close         열린 상세 창 닫기
  :all           전체 패널 보기
  :pick N        전체 패널 보기에서 N번 패널 선택
  :back          전체 패널 보기 닫기
  :download      열린 전략을 워드 문서로 저장
  :clear         검색 초기화
  :state         현재 상태 출력
  :help          도움말
  :quit          종료";

/// Parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search(String),
    Add(usize),
    Remove(usize),
    Panel(usize),
    Strategy(usize),
    Close,
    All,
    Pick(usize),
    Back,
    Download,
    Clear,
    State,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplError {
    #[error("unknown command :{0} (see :help)")]
    UnknownCommand(String),

    #[error(":{0} needs a position")]
    MissingPosition(&'static str),

    #[error("invalid position {0:?}; positions start at 1")]
    BadPosition(String),
}

/// Parse one input line
///
/// # Errors
/// Returns [`ReplError`] for unknown commands and missing or invalid
/// positions.
pub fn parse_line(line: &str) -> Result<ReplCommand, ReplError> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(ReplCommand::Search(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    let command = match name {
        "add" => ReplCommand::Add(position("add", arg)?),
        "remove" => ReplCommand::Remove(position("remove", arg)?),
        "panel" => ReplCommand::Panel(position("panel", arg)?),
        "strategy" => ReplCommand::Strategy(position("strategy", arg)?),
        "pick" => ReplCommand::Pick(position("pick", arg)?),
        "close" => ReplCommand::Close,
        "all" => ReplCommand::All,
        "back" => ReplCommand::Back,
        "download" => ReplCommand::Download,
        "clear" => ReplCommand::Clear,
        "state" => ReplCommand::State,
        "help" | "h" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        other => return Err(ReplError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

/// 1-based position to 0-based index
fn position(command: &'static str, arg: Option<&str>) -> Result<usize, ReplError> {
    let arg = arg.ok_or(ReplError::MissingPosition(command))?;
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ReplError::BadPosition(arg.to_string())),
    }
}

impl ReplCommand {
    /// Session commands this line maps to; empty for local commands
    #[must_use]
    pub fn into_session_commands(self) -> Vec<SessionCommand> {
        match self {
            ReplCommand::Search(query) => vec![SessionCommand::Search(query)],
            ReplCommand::Add(i) => vec![SessionCommand::AddRecommendation(i)],
            ReplCommand::Remove(i) => vec![SessionCommand::RemoveFilterTag(i)],
            ReplCommand::Panel(i) => vec![SessionCommand::OpenSamplePanel(i)],
            ReplCommand::Strategy(i) => vec![SessionCommand::OpenStrategy(i)],
            // Closing a modal that is not open is a no-op
            ReplCommand::Close => vec![SessionCommand::CloseStrategy, SessionCommand::ClosePanel],
            ReplCommand::All => vec![SessionCommand::ShowAllPanels],
            ReplCommand::Pick(i) => vec![SessionCommand::PickInAllPanels(i)],
            ReplCommand::Back => vec![SessionCommand::HideAllPanels],
            ReplCommand::Download => vec![SessionCommand::Download],
            ReplCommand::Clear => vec![SessionCommand::Clear],
            ReplCommand::State | ReplCommand::Help | ReplCommand::Quit => Vec::new(),
        }
    }
}
