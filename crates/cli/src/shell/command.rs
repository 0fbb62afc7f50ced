use clap::Parser;
use clap::error::ErrorKind;

/// Helper struct for Clap parsing within the shell
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(no_binary_name = true)]
pub enum ShellCommand {
    /// Jump to a declaration, or search for text if no declaration has that name
    Goto {
        /// Declaration name or free text
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },
    /// Select the first outline entry labelled exactly LABEL
    Find {
        label: String,
    },
    /// List the outline, or the members below LABEL
    Ls {
        label: Option<String>,
    },
    /// List declaration names starting with PREFIX
    Complete {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// Highlight the file's top-level declaration
    Top,
    /// Clear the screen
    Clear,
}

impl ShellCommand {
    /// Command names for completion and highlighting, derived from the enum.
    pub fn command_names() -> Vec<String> {
        use clap::CommandFactory;
        let cmd = Self::command();
        let mut names = vec!["help".to_string(), "exit".to_string(), "quit".to_string()];
        names.extend(cmd.get_subcommands().map(|s| s.get_name().to_string()));
        names
    }

    /// Commands whose argument is a declaration name.
    pub fn takes_name(command: &str) -> bool {
        matches!(command, "goto" | "find" | "ls" | "complete")
    }
}

pub fn parse_shell_command(
    input: &str,
) -> Result<Option<ShellCommand>, Box<dyn std::error::Error>> {
    // shlex keeps quoted keys such as "void run(" together
    let args = shlex::split(input).ok_or("Invalid quoting")?;

    match ShellCommand::try_parse_from(args) {
        Ok(c) => Ok(Some(c)),
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion {
                println!("{}", e);
                return Ok(None);
            }
            Err(Box::new(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goto_keeps_quoted_words() {
        let cmd = parse_shell_command("goto \"void run(\"").unwrap().unwrap();
        assert_eq!(
            cmd,
            ShellCommand::Goto {
                key: vec!["void run(".to_string()]
            }
        );

        let cmd = parse_shell_command("goto public void").unwrap().unwrap();
        assert_eq!(
            cmd,
            ShellCommand::Goto {
                key: vec!["public".to_string(), "void".to_string()]
            }
        );
    }

    #[test]
    fn test_optional_arguments() {
        assert_eq!(
            parse_shell_command("ls").unwrap(),
            Some(ShellCommand::Ls { label: None })
        );
        assert_eq!(
            parse_shell_command("complete").unwrap(),
            Some(ShellCommand::Complete {
                prefix: String::new()
            })
        );
        assert_eq!(parse_shell_command("top").unwrap(), Some(ShellCommand::Top));
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_shell_command("goto").is_err());
        assert!(parse_shell_command("frobnicate").is_err());
        assert!(parse_shell_command("find \"unterminated").is_err());
    }

    #[test]
    fn test_command_names() {
        let names = ShellCommand::command_names();
        for expected in ["goto", "find", "ls", "complete", "top", "clear", "exit"] {
            assert!(names.iter().any(|n| n == expected), "{}", expected);
        }
    }
}
