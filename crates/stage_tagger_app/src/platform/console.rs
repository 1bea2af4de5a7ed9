//! Line-oriented front end: parses typed commands into messages and renders
//! the view model as plain text. Rows and stage numbers are 1-based.

use stage_tagger_core::{AppViewModel, Msg, StageControl, StageSource};
use thiserror::Error;

pub const HELP: &str = "\
Commands (rows and stage numbers start at 1):
  objective <text>      set the research objective
  q <row> <text>        edit a question
  enter <row>           press Enter in a question (suggests when idle)
  suggest <row>         ask for a stage suggestion
  focus <row>           focus the stage input (opens the stage list)
  stage <row> <text>    type a stage
  pick <row> <n>        pick stage <n> from the list
  confirm <row>         leave the stage input (confirms the stage)
  edit <row>            reopen a confirmed stage
  new-stage <text>      type into the add-stage box
  add-stage             add the typed stage to the list
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs a row number")]
    MissingRow(&'static str),
    #[error("row must be a number from 1 up, got {0:?}")]
    BadRow(String),
    #[error("no stage number {0:?} in the list")]
    UnknownStage(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str, view: &AppViewModel) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = split_word(line);

    let command = match word {
        "objective" => Command::Dispatch(Msg::ObjectiveChanged(rest.to_string())),
        "q" => {
            let (index, text) = row_and_text("q", rest)?;
            Command::Dispatch(Msg::QuestionEdited {
                index,
                text: text.to_string(),
            })
        }
        "enter" => Command::Dispatch(Msg::QuestionSubmitted {
            index: row_only("enter", rest)?,
        }),
        "suggest" => Command::Dispatch(Msg::SuggestionRequested {
            index: row_only("suggest", rest)?,
        }),
        "focus" => Command::Dispatch(Msg::StageInputFocused {
            index: row_only("focus", rest)?,
        }),
        "stage" => {
            let (index, text) = row_and_text("stage", rest)?;
            Command::Dispatch(Msg::StageEdited {
                index,
                text: text.to_string(),
            })
        }
        "pick" => {
            let (index, number) = row_and_text("pick", rest)?;
            let label = number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| view.stages.get(n))
                .ok_or_else(|| ParseError::UnknownStage(number.to_string()))?;
            Command::Dispatch(Msg::StageEdited {
                index,
                text: label.clone(),
            })
        }
        "confirm" => Command::Dispatch(Msg::StageConfirmed {
            index: row_only("confirm", rest)?,
        }),
        "edit" => Command::Dispatch(Msg::EditStageClicked {
            index: row_only("edit", rest)?,
        }),
        "new-stage" => Command::Dispatch(Msg::NewStageChanged(rest.to_string())),
        "add-stage" => Command::Dispatch(Msg::NewStageSubmitted),
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn row_only(command: &'static str, rest: &str) -> Result<usize, ParseError> {
    row_and_text(command, rest).map(|(index, _)| index)
}

fn row_and_text<'a>(command: &'static str, rest: &'a str) -> Result<(usize, &'a str), ParseError> {
    let (row, text) = split_word(rest);
    if row.is_empty() {
        return Err(ParseError::MissingRow(command));
    }
    let index = row
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| ParseError::BadRow(row.to_string()))?;
    Ok((index, text))
}

/// Renders the view; `focus` marks the row whose stage input has focus.
pub fn render(view: &AppViewModel, focus: Option<usize>) -> String {
    let mut lines = Vec::with_capacity(view.rows.len() + 3);
    lines.push(format!("Objective: {}", or_none(&view.objective)));

    for row in &view.rows {
        let marker = if focus == Some(row.index) { '>' } else { ' ' };
        let question = if row.question.is_empty() {
            "(new question)"
        } else {
            row.question.as_str()
        };
        let mut line = format!("{marker} {:>2}. {question}", row.index + 1);
        let control = describe_control(&row.control);
        if !control.is_empty() {
            line.push_str("  ");
            line.push_str(&control);
        }
        if let Some(error) = &row.error {
            line.push_str("  ! ");
            line.push_str(error);
        }
        lines.push(line);

        if let StageControl::Input {
            dropdown: Some(labels),
            ..
        } = &row.control
        {
            lines.push(format!("       pick: {}", numbered(labels)));
        }
    }

    let stages = if view.stages.is_empty() {
        "(none)".to_string()
    } else {
        view.stages.join(", ")
    };
    lines.push(format!("Stages: {stages}"));
    if !view.new_stage_draft.is_empty() {
        lines.push(format!("New stage: {}", view.new_stage_draft));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn describe_control(control: &StageControl) -> String {
    match control {
        StageControl::Confirmed { stage, source } => match source {
            Some(StageSource::Suggested) => format!("[{stage}] (suggested)"),
            _ => format!("[{stage}]"),
        },
        StageControl::Input {
            stage, disabled, ..
        } => {
            let lock = if *disabled { " (locked)" } else { "" };
            format!("stage: \"{stage}\"{lock}")
        }
        StageControl::Suggest => "[+ suggest]".to_string(),
        StageControl::Loading => "[loading...]".to_string(),
        StageControl::Hidden => String::new(),
    }
}

fn numbered(labels: &[String]) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{}) {label}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

fn or_none(text: &str) -> &str {
    if text.is_empty() {
        "(none)"
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stage_tagger_core::{update, AppState};

    use super::*;

    fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        parse_command(line, &AppViewModel::default())
    }

    #[test]
    fn question_command_keeps_inner_spacing() {
        assert_eq!(
            parse("q 2   Why do  users churn?").unwrap(),
            Some(Command::Dispatch(Msg::QuestionEdited {
                index: 1,
                text: "Why do  users churn?".to_string(),
            }))
        );
    }

    #[test]
    fn row_commands_are_one_based() {
        assert_eq!(
            parse("confirm 1").unwrap(),
            Some(Command::Dispatch(Msg::StageConfirmed { index: 0 }))
        );
        assert_eq!(parse("confirm 0"), Err(ParseError::BadRow("0".to_string())));
        assert_eq!(parse("edit"), Err(ParseError::MissingRow("edit")));
        assert_eq!(parse("suggest x"), Err(ParseError::BadRow("x".to_string())));
    }

    #[test]
    fn text_may_be_empty() {
        assert_eq!(
            parse("stage 1").unwrap(),
            Some(Command::Dispatch(Msg::StageEdited {
                index: 0,
                text: String::new(),
            }))
        );
        assert_eq!(
            parse("objective").unwrap(),
            Some(Command::Dispatch(Msg::ObjectiveChanged(String::new())))
        );
    }

    #[test]
    fn pick_resolves_label_from_view() {
        let view = AppViewModel {
            stages: vec!["Awareness".to_string(), "Retention".to_string()],
            ..AppViewModel::default()
        };
        assert_eq!(
            parse_command("pick 3 2", &view).unwrap(),
            Some(Command::Dispatch(Msg::StageEdited {
                index: 2,
                text: "Retention".to_string(),
            }))
        );
        assert_eq!(
            parse_command("pick 3 5", &view),
            Err(ParseError::UnknownStage("5".to_string()))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("dance"), Err(ParseError::Unknown("dance".to_string())));
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse("add-stage").unwrap(), Some(Command::Dispatch(Msg::NewStageSubmitted)));
    }

    #[test]
    fn renders_fresh_state() {
        let view = AppState::new().view();
        assert_eq!(
            render(&view, None),
            "Objective: (none)\n   1. (new question)\nStages: (none)\n"
        );
    }

    #[test]
    fn renders_rows_errors_and_dropdown() {
        let mut state = AppState::new();
        for msg in [
            Msg::ObjectiveChanged("Improve onboarding".to_string()),
            Msg::QuestionEdited {
                index: 0,
                text: "Q1".to_string(),
            },
            Msg::StageEdited {
                index: 0,
                text: "Awareness".to_string(),
            },
            Msg::StageConfirmed { index: 0 },
            Msg::QuestionEdited {
                index: 1,
                text: "Q2".to_string(),
            },
            Msg::StageConfirmed { index: 1 },
            Msg::StageInputFocused { index: 1 },
        ] {
            state = update(state, msg).0;
        }

        let text = render(&state.view(), Some(1));
        assert_eq!(
            text,
            "Objective: Improve onboarding\n\
             \x20  1. Q1  [Awareness]\n\
             >  2. Q2  stage: \"\" (locked)  ! Enter stage manually.\n\
             \x20      pick: 1) Awareness\n\
             \x20  3. (new question)\n\
             Stages: Awareness\n"
        );
    }
}
