use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    wpenv completions bash > ~/.bash_completion.d/wpenv\n\n\
                  Generate zsh completions:\n    wpenv completions zsh > ~/.zfunc/_wpenv\n\n\
                  Generate fish completions:\n    wpenv completions fish > ~/.config/fish/completions/wpenv.fish\n\n\
                  Generate PowerShell completions:\n    wpenv completions powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
