//! Interactive shell: one command per line, mapped 1:1 onto the engine
//! facade. Presentation only — parsing in, formatting out, no engine
//! semantics.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveTime};
use studytrack_core::StudyEngine;

const HELP: &str = "\
commands:
  add <priority> <deadline YYYY-MM-DD> <subject> <title...>
  top                         peek the highest-priority task
  list                        all pending tasks, highest priority first
  done <hours> [notes...]     complete the top task
  log <subject> <hours> [description...]
  summary                     total hours per subject
  dep <prerequisite> <dependent>
  path                        topological study order
  subjects                    all known subjects
  block <HH:MM> <HH:MM>       reserve an unavailable time block
  plan [slots_per_day]        weekly plan (default 3 slots/day)
  undo | redo
  help | quit";

pub fn run(engine: &StudyEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    writeln!(out, "studytrack shell — type 'help' for commands")?;
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match dispatch(engine, line) {
            Ok(output) => writeln!(out, "{output}")?,
            Err(e) => eprintln!("error: {e:#}"),
        }
    }
    Ok(())
}

fn dispatch(engine: &StudyEngine, line: &str) -> Result<String> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match cmd {
        "help" => Ok(HELP.to_string()),

        "add" => {
            let [priority, deadline, subject, title @ ..] = rest.as_slice() else {
                return Err(anyhow!(
                    "usage: add <priority> <deadline YYYY-MM-DD> <subject> <title...>"
                ));
            };
            if title.is_empty() {
                return Err(anyhow!("a task needs a title"));
            }
            let priority: i32 = priority.parse().context("priority must be an integer")?;
            let deadline: NaiveDate = deadline.parse().context("deadline must be YYYY-MM-DD")?;
            let task = engine.submit_task(&title.join(" "), subject, priority, deadline)?;
            Ok(serde_json::to_string_pretty(&task)?)
        }

        "top" => match engine.peek_top() {
            Some(task) => Ok(serde_json::to_string_pretty(&task)?),
            None => Ok("no pending tasks".to_string()),
        },

        "list" => Ok(serde_json::to_string_pretty(&engine.tasks())?),

        "done" => {
            let [hours, notes @ ..] = rest.as_slice() else {
                return Err(anyhow!("usage: done <hours> [notes...]"));
            };
            let hours: f64 = hours.parse().context("hours must be a number")?;
            let notes = notes.join(" ");
            let notes = (!notes.is_empty()).then_some(notes.as_str());
            let task = engine.complete_top(hours, notes)?;
            Ok(format!(
                "completed '{}' — review scheduled\n{}",
                task.title,
                serde_json::to_string_pretty(&task)?
            ))
        }

        "log" => {
            let [subject, hours, description @ ..] = rest.as_slice() else {
                return Err(anyhow!("usage: log <subject> <hours> [description...]"));
            };
            let hours: f64 = hours.parse().context("hours must be a number")?;
            let description = description.join(" ");
            let description = (!description.is_empty()).then_some(description.as_str());
            let log = engine.insert_log(subject, hours, description)?;
            Ok(serde_json::to_string_pretty(&log)?)
        }

        "summary" => Ok(serde_json::to_string_pretty(&engine.summary_by_subject())?),

        "dep" => {
            let [prerequisite, dependent] = rest.as_slice() else {
                return Err(anyhow!("usage: dep <prerequisite> <dependent>"));
            };
            engine.add_dependency(prerequisite, dependent)?;
            Ok(format!("dependency added: {prerequisite} -> {dependent}"))
        }

        "path" => {
            let path = engine.study_path()?;
            if path.is_empty() {
                Ok("no subjects yet".to_string())
            } else {
                Ok(path.join(" -> "))
            }
        }

        "subjects" => Ok(serde_json::to_string_pretty(&engine.subjects())?),

        "block" => {
            let [start, end] = rest.as_slice() else {
                return Err(anyhow!("usage: block <HH:MM> <HH:MM>"));
            };
            let start = parse_time(start)?;
            let end = parse_time(end)?;
            if engine.add_blocked_interval(start, end)? {
                Ok(format!("blocked {start} - {end}"))
            } else {
                Ok("rejected: overlaps an existing block".to_string())
            }
        }

        "plan" => {
            let slots = match rest.as_slice() {
                [] => None,
                [n] => Some(n.parse::<i64>().context("slots_per_day must be an integer")?),
                _ => return Err(anyhow!("usage: plan [slots_per_day]")),
            };
            Ok(serde_json::to_string_pretty(&engine.weekly_plan(slots))?)
        }

        "undo" => Ok(engine.undo()),
        "redo" => Ok(engine.redo()),

        other => Err(anyhow!("unknown command '{other}' (try 'help')")),
    }
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").with_context(|| format!("invalid time '{s}' (HH:MM)"))
}
