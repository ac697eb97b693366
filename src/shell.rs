//! Interactive Shell
//!
//! A line-oriented session that keeps one client alive, the way the browser
//! page does: the token is restored once at startup and every command works
//! on the same form fields and notes cache.

use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::backend::NotesBackend;
use crate::controller::NotesClient;
use crate::model::AssistMode;
use crate::store::TokenStore;
use crate::terminal::{format_view, TerminalPresenter};

pub const HELP: &str = "\
Commands:
  signup <email> <password>   create an account
  login <email> <password>    log in and load notes
  title <text>                set the draft title
  content <text>              set the draft content
  save                        save the draft as a note
  grammar                     grammar-check the draft content
  prompt <text>               set the assistant prompt
  mode <mode>                 default, email, idea or casual
  generate                    run the writing assistant
  delete <id>                 delete a note
  show                        print the current view
  help                        show this help
  quit                        leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Signup { email: String, password: String },
    Login { email: String, password: String },
    Title(String),
    Content(String),
    Save,
    Grammar,
    Prompt(String),
    Mode(AssistMode),
    Generate,
    Delete(i64),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "signup" | "login" => {
            let mut parts = rest.split_whitespace();
            let (Some(email), Some(password), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(format!("usage: {} <email> <password>", word));
            };
            let (email, password) = (email.to_string(), password.to_string());
            if word.eq_ignore_ascii_case("signup") {
                ShellCommand::Signup { email, password }
            } else {
                ShellCommand::Login { email, password }
            }
        }
        "title" => ShellCommand::Title(rest.to_string()),
        "content" => ShellCommand::Content(rest.to_string()),
        "save" => ShellCommand::Save,
        "grammar" => ShellCommand::Grammar,
        "prompt" => ShellCommand::Prompt(rest.to_string()),
        "mode" => ShellCommand::Mode(rest.parse::<AssistMode>().map_err(|e| e.to_string())?),
        "generate" => ShellCommand::Generate,
        "delete" => {
            let id = rest
                .parse()
                .map_err(|_| format!("usage: delete <id> (got {:?})", rest))?;
            ShellCommand::Delete(id)
        }
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("Unknown command: {} (try `help`)", other)),
    };

    Ok(Some(command))
}

/// Run the shell until `quit` or end of input
pub async fn run<B, S>(client: &NotesClient<B, S, TerminalPresenter>) -> std::io::Result<()>
where
    B: NotesBackend,
    S: TokenStore,
{
    println!("AI Notes Assistant. Type `help` for commands.");
    print!("{}", format_view(&client.presenter().latest()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            command => execute(client, command).await,
        }

        print!("{}", format_view(&client.presenter().latest()));
    }

    Ok(())
}

/// Apply one command. Failures were already reported as notices.
async fn execute<B, S>(client: &NotesClient<B, S, TerminalPresenter>, command: ShellCommand)
where
    B: NotesBackend,
    S: TokenStore,
{
    match command {
        ShellCommand::Signup { email, password } => {
            client.set_email(email);
            client.set_password(password);
            let _ = client.signup(client.credentials()).await;
        }
        ShellCommand::Login { email, password } => {
            client.set_email(email);
            client.set_password(password);
            let _ = client.login(client.credentials()).await;
        }
        ShellCommand::Title(title) => client.set_title(title),
        ShellCommand::Content(content) => client.set_content(content),
        ShellCommand::Save => {
            let _ = client.submit_note(client.composer()).await;
        }
        ShellCommand::Grammar => {
            let _ = client.correct_grammar(&client.composer().content).await;
        }
        ShellCommand::Prompt(prompt) => client.set_prompt(prompt),
        ShellCommand::Mode(mode) => client.set_mode(mode),
        ShellCommand::Generate => {
            let panel = client.assistant();
            let _ = client.get_ai_completion(&panel.prompt, panel.mode).await;
        }
        ShellCommand::Delete(id) => {
            let _ = client.delete_note(id).await;
        }
        ShellCommand::Show | ShellCommand::Help | ShellCommand::Quit => {}
    }
}
