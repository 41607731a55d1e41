//! Terminal client: upload a PDF and ask questions about it from the shell.
//!
//! Run with: cargo run --bin pdf-chat-cli --features cli -- paper.pdf
//!
//! Plain lines are questions. `/upload <path>`, `/reset` and `/quit` are
//! commands; EOF quits. Ctrl-C skips the graceful cleanup and only fires the
//! best-effort one.

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;
    use std::time::Duration;

    use anyhow::Context;
    use clap::Parser;
    use tokio::io::{AsyncBufReadExt, BufReader};

    use pdf_chat::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
    use pdf_chat::domain::models::{PdfFile, Role};
    use pdf_chat::domain::services::{ChatController, ChatState, SendOutcome, StateHandle, UploadOutcome};
    use pdf_chat::shared::logging::init_tracing;
    use pdf_chat::shared::services::ApiService;

    type CliController = ChatController<ApiService, Rc<RefCell<ChatState>>>;

    /// Time left for the detached cleanup request after Ctrl-C
    const FLUSH_WINDOW: Duration = Duration::from_millis(200);

    #[derive(Parser, Debug)]
    #[command(name = "pdf-chat-cli")]
    #[command(version, about = "Ask questions about a PDF document", long_about = None)]
    struct Args {
        /// Base URL of the document Q&A backend
        #[arg(long, env = "PDF_CHAT_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Per-request timeout in seconds
        #[arg(long, env = "PDF_CHAT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,

        /// PDF to upload before the first prompt
        pdf: Option<PathBuf>,
    }

    #[derive(Debug, PartialEq)]
    enum Command {
        Ask(String),
        Upload(PathBuf),
        Reset,
        Quit,
        Help,
    }

    fn parse_command(line: &str) -> Command {
        let trimmed = line.trim();
        match trimmed.split_once(char::is_whitespace) {
            Some(("/upload", path)) => Command::Upload(PathBuf::from(path.trim())),
            _ => match trimmed {
                "/reset" => Command::Reset,
                "/quit" | "/exit" => Command::Quit,
                "/help" | "/upload" => Command::Help,
                _ => Command::Ask(line.to_string()),
            },
        }
    }

    /// Prints every turn appended since the last call
    struct Transcript {
        printed: usize,
    }

    impl Transcript {
        fn flush(&mut self, chat: &CliController) {
            chat.state().with_state(|state| {
                let messages = state.messages().as_slice();
                // A reset empties the list
                if messages.len() < self.printed {
                    self.printed = 0;
                }
                for message in &messages[self.printed..] {
                    let prefix = match message.role {
                        Role::User => "you>",
                        Role::Assistant => "pdf>",
                    };
                    println!("{} {}", prefix, message.text);
                }
                self.printed = messages.len();
            });
        }
    }

    async fn upload(chat: &CliController, path: &Path) {
        match PdfFile::from_path(path).await {
            Ok(file) => {
                if chat.upload(file).await == UploadOutcome::Ignored {
                    eprintln!("A document is already loaded; /reset first");
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    async fn run_session(chat: &CliController, initial_pdf: Option<PathBuf>) -> anyhow::Result<()> {
        let mut transcript = Transcript { printed: 0 };

        if let Some(path) = initial_pdf {
            upload(chat, &path).await;
            transcript.flush(chat);
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            match parse_command(&line) {
                Command::Ask(text) => {
                    let outcome = chat.ask(&text).await;
                    let has_document = chat.state().with_state(ChatState::has_document).unwrap_or(false);
                    if outcome == SendOutcome::Ignored && !has_document && !text.trim().is_empty() {
                        eprintln!("Upload a PDF first: /upload <path>");
                    }
                }
                Command::Upload(path) => upload(chat, &path).await,
                Command::Reset => {
                    if !chat.reset().await {
                        eprintln!("Nothing to reset");
                    }
                }
                Command::Quit => break,
                Command::Help => {
                    eprintln!("Commands: /upload <path>, /reset, /quit. Anything else is a question.");
                }
            }
            transcript.flush(chat);
        }

        chat.end_session_graceful().await;
        Ok(())
    }

    #[tokio::main(flavor = "current_thread")]
    pub async fn main() -> anyhow::Result<()> {
        init_tracing();

        let args = Args::parse();
        let config = ClientConfig::new(&args.api_url, Duration::from_secs(args.timeout_secs))
            .context("Invalid client configuration")?;

        let state = Rc::new(RefCell::new(ChatState::new()));
        let chat: CliController = ChatController::new(ApiService::new(config), state);

        tokio::select! {
            result = run_session(&chat, args.pdf) => result,
            _ = tokio::signal::ctrl_c() => {
                chat.end_session_best_effort();
                tokio::time::sleep(FLUSH_WINDOW).await;
                Ok(())
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    terminal::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
