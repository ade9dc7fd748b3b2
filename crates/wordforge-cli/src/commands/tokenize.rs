use std::io::{BufRead, Write};

use wordforge::{Tokenizer, Tokens, vocab::io::load_model_path};

use crate::{
    LogArgs,
    input_output::{InputArgs, OutputArgs},
};

/// Args for the tokenize command.
#[derive(clap::Args, Debug)]
pub struct TokenizeArgs {
    /// Model file written by ``train --output``.
    #[arg(long)]
    model: String,

    /// Print the decoded text instead of the tokens.
    #[arg(long)]
    decode: bool,

    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl TokenizeArgs {
    /// Run the tokenize command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        log::info!("model: {}", self.model);
        let tokenizer = load_model_path(&self.model)?;
        log::info!("{} tokenizer; vocab size {}", tokenizer.kind(), tokenizer.vocab_len());

        let lines = self
            .input
            .open_reader()?
            .lines()
            .collect::<Result<Vec<_>, _>>()?;

        let mut writer = self.output.open_writer()?;
        let batch = tokenizer.tokenize_batch(lines.as_slice());
        write_batch(&mut writer, &tokenizer, &batch, self.decode)?;
        writer.flush()?;

        Ok(())
    }
}

fn write_batch(
    writer: &mut dyn Write,
    tokenizer: &Tokenizer,
    batch: &[Tokens],
    decode: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for tokens in batch {
        if decode {
            writeln!(writer, "{}", tokenizer.decode(tokens)?)?;
        } else {
            writeln!(writer, "{tokens}")?;
        }
    }
    Ok(())
}
