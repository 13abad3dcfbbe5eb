//! Terminal front end for the todo service.
//!
//! A line-oriented command loop over the runtime: it renders the controller
//! state as text after every command and maps list positions to item ids so
//! the user never types an identifier. All of the actual behavior lives in
//! the library; this file only reads lines and prints state.

use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_client::{Event, Runtime, TodoApi, UreqTransport};

fn main() -> io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("TODO_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let mut runtime = Runtime::new(TodoApi::new(&base_url), UreqTransport::new());

    println!("todo client ({base_url})");
    println!("commands: list | add <text> | edit <n> <text> | rm <n> | quit");

    runtime.dispatch(Event::LoadRequested);
    render(&runtime);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;

        runtime.dispatch(Event::Ticked);
        match parse(&line) {
            Command::Quit => break,
            Command::Nothing => continue,
            Command::List => runtime.dispatch(Event::LoadRequested),
            Command::Add(text) => {
                runtime.dispatch(Event::DraftChanged(text));
                runtime.dispatch(Event::CreateSubmitted);
            }
            Command::Edit(position, text) => match id_at(&runtime, position) {
                Some(id) => {
                    runtime.dispatch(Event::EditStarted(id));
                    runtime.dispatch(Event::EditDraftChanged(text));
                    runtime.dispatch(Event::EditSubmitted);
                }
                None => println!("no item #{position}"),
            },
            Command::Remove(position) => match id_at(&runtime, position) {
                Some(id) => {
                    runtime.dispatch(Event::DeleteRequested(id));
                    if confirm(&runtime)? {
                        runtime.dispatch(Event::DeleteConfirmed);
                    } else {
                        runtime.dispatch(Event::DeleteCancelled);
                    }
                }
                None => println!("no item #{position}"),
            },
            Command::Unknown(word) => println!("unknown command: {word}"),
        }
        render(&runtime);
    }

    Ok(())
}

enum Command {
    List,
    Add(String),
    Edit(usize, String),
    Remove(usize),
    Quit,
    Nothing,
    Unknown(String),
}

fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }
    let (word, rest) = match line.split_once(' ') {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "list" | "ls" => Command::List,
        "add" => Command::Add(rest.to_string()),
        "edit" => match rest.split_once(' ') {
            Some((n, text)) => match n.parse() {
                Ok(position) => Command::Edit(position, text.trim().to_string()),
                Err(_) => Command::Unknown(word.to_string()),
            },
            None => Command::Unknown(word.to_string()),
        },
        "rm" => match rest.parse() {
            Ok(position) => Command::Remove(position),
            Err(_) => Command::Unknown(word.to_string()),
        },
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

fn id_at<T: todo_client::Transport>(runtime: &Runtime<T>, position: usize) -> Option<String> {
    position
        .checked_sub(1)
        .and_then(|index| runtime.state().todos.get(index))
        .map(|todo| todo.id.clone())
}

fn confirm<T: todo_client::Transport>(runtime: &Runtime<T>) -> io::Result<bool> {
    let Some(pending) = &runtime.state().pending_delete else {
        return Ok(false);
    };
    print!("delete \"{}\"? [y/N] ", pending.description);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn render<T: todo_client::Transport>(runtime: &Runtime<T>) {
    let state = runtime.state();

    for toast in state.toasts.iter() {
        println!("[{}] {}", severity_label(toast.severity), toast.message);
    }
    if let Some(error) = &state.load_error {
        println!("could not load todos: {error} (type `list` to retry)");
        return;
    }
    if let Some(error) = &state.draft_error {
        println!("{error}");
    }

    if state.todos.is_empty() {
        println!("(no todos)");
        return;
    }
    for (index, todo) in state.todos.iter().enumerate() {
        let date = todo
            .created_at
            .map(|at| at.format(" (%Y-%m-%d %H:%M)").to_string())
            .unwrap_or_default();
        println!("{:>3}. {}{date}", index + 1, todo.description);
    }
}

fn severity_label(severity: todo_client::Severity) -> &'static str {
    match severity {
        todo_client::Severity::Success => "ok",
        todo_client::Severity::Error => "error",
        todo_client::Severity::Info => "info",
    }
}
