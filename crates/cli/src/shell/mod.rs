mod command;
mod completer;
mod context;
mod highlighter;
mod prompt;
pub(crate) mod view;

use reedline::{
    ColumnarMenu, DefaultHinter, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::path::PathBuf;
use tracing::{info, warn};

use self::command::{ShellCommand, parse_shell_command};
use self::completer::DeclscopeCompleter;
use self::context::ShellContext;
use self::highlighter::DeclscopeHighlighter;
use self::prompt::DeclscopePrompt;
use crate::CliResult;
use declscope_core::config::ViewerConfig;

pub struct ReplServer {
    context: ShellContext,
    config: ViewerConfig,
}

impl ReplServer {
    pub fn new(context: ShellContext, config: ViewerConfig) -> Self {
        Self { context, config }
    }

    pub fn run(mut self) -> CliResult<()> {
        println!("File: {}", self.context.view.path().display());
        self.context.flush_status();

        if let Some(loaded) = self.context.view.loaded() {
            println!("{} declarations indexed.", loaded.model.declaration_count());
        }
        println!("Type 'help' for commands.");

        let line_editor = self.setup_line_editor()?;
        self.run_loop(line_editor)
    }

    fn setup_line_editor(&self) -> CliResult<Reedline> {
        let commands = ShellCommand::command_names();
        let view = self.context.view.clone();

        let completer = Box::new(DeclscopeCompleter::new(commands.clone(), view.clone()));
        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let history_file = self.config.history_path();
        if let Some(parent) = history_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let history = match FileBackedHistory::with_file(self.config.history_size, history_file) {
            Ok(history) => history,
            Err(e) => {
                warn!("Shell history unavailable, keeping it in memory: {}", e);
                FileBackedHistory::new(self.config.history_size)?
            }
        };

        let highlighter = Box::new(DeclscopeHighlighter::new(commands, view));

        Ok(Reedline::create()
            .with_history(Box::new(history))
            .with_completer(completer)
            .with_highlighter(highlighter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_hinter(Box::new(
                DefaultHinter::default().with_style(
                    nu_ansi_term::Style::new()
                        .italic()
                        .fg(nu_ansi_term::Color::LightGray),
                ),
            ))
            .with_edit_mode(Box::new(Emacs::new(keybindings))))
    }

    fn run_loop(&mut self, mut line_editor: Reedline) -> CliResult<()> {
        loop {
            let prompt = DeclscopePrompt::new(
                self.context.view.file_name(),
                self.context.selected_label(),
            );

            match line_editor.read_line(&prompt) {
                Ok(Signal::Success(buffer)) => {
                    let trimmed = buffer.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed == "exit" || trimmed == "quit" {
                        break;
                    }

                    match parse_shell_command(trimmed) {
                        Ok(Some(cmd)) => match self.context.execute(&cmd) {
                            Ok(output) => {
                                if !output.is_empty() {
                                    println!("{}", output);
                                }
                                if matches!(cmd, ShellCommand::Clear) {
                                    let _ = line_editor.clear_screen();
                                }
                            }
                            Err(e) => eprintln!("Error: {}", e),
                        },
                        Ok(None) => {}
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                    println!("Bye!");
                    break;
                }
                Ok(other) => info!("Ignoring shell signal {:?}", other),
                Err(e) => return Err(Box::new(e)),
            }
        }
        self.context.view.close();
        Ok(())
    }
}

pub async fn run(file: PathBuf, config: ViewerConfig) -> CliResult<()> {
    let (view, status) = crate::open_view(&file, &config).await?;
    let context = ShellContext::new(view, config.context_lines, status);
    ReplServer::new(context, config).run()
}
