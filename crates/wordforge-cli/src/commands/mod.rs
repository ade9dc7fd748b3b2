use crate::commands::{tokenize::TokenizeArgs, train::TrainArgs};

pub mod tokenize;
pub mod train;

/// Subcommands for wordforge.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train a tokenizer on a corpus.
    Train(TrainArgs),

    /// Tokenize lines with a saved model.
    Tokenize(TokenizeArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Tokenize(cmd) => cmd.run(),
        }
    }
}
