use std::io::Write;

use wordforge::{
    Tokenizer,
    TokenizerKind,
    TrainConfig,
    compat::timers::timeit,
    tokenizer::DEFAULT_MIN_FREQUENCY,
    vocab::io::{save_model_path, save_vocab_index_path, save_vocab_list_path},
};

use crate::{LogArgs, input_output::read_corpus};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Tokenizer family: naive, dynamic, char, unigram or wordpiece.
    kind: TokenizerKind,

    /// Corpus text file; one sample per line, or the whole file for
    /// byte-level families.
    corpus: String,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Target vocab size.
    #[arg(long, default_value_t = 300)]
    vocab_size: usize,

    /// Chunk-splitting regex; byte-level families only.
    #[arg(long)]
    pattern: Option<String>,

    /// Minimum merge frequency; wordpiece only.
    #[arg(long, default_value_t = DEFAULT_MIN_FREQUENCY)]
    min_frequency: u64,

    /// Text to tokenize with the trained model.
    #[arg(long)]
    test_text: Option<String>,

    /// Decode the test text tokens back to text.
    #[arg(long)]
    decode: bool,

    /// Time tokenizing the whole corpus.
    #[arg(long)]
    benchmark: bool,

    /// Write the trained model to this file.
    #[arg(long)]
    output: Option<String>,

    /// Write the bare vocab list to this file.
    #[arg(long)]
    vocab_list: Option<String>,

    /// Write the token to index map to this file; string-level families only.
    #[arg(long)]
    vocab_index: Option<String>,
}

impl TrainArgs {
    /// Run the train command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        log::info!("Reading corpus: {}", self.corpus);
        let samples = read_corpus(&self.corpus, self.kind)?;
        log::info!("samples: {}", samples.len());

        let config = TrainConfig::new(self.kind, self.vocab_size)
            .with_pattern(self.pattern.as_deref())
            .with_min_frequency(self.min_frequency);

        log::info!("Training {} tokenizer...", self.kind);
        let outcome = Tokenizer::train(&config, samples.as_slice())?;
        let tokenizer = outcome.tokenizer;
        log::info!("Vocabulary Size: {}", tokenizer.vocab_len());

        if let Some(path) = &self.output {
            log::info!("model: {path}");
            save_model_path(&tokenizer, path)?;
        }
        if let Some(path) = &self.vocab_list {
            log::info!("vocab list: {path}");
            save_vocab_list_path(&tokenizer, path)?;
        }
        if let Some(path) = &self.vocab_index {
            log::info!("vocab index: {path}");
            save_vocab_index_path(&tokenizer, path)?;
        }

        let mut out = std::io::stdout().lock();
        if let Some(text) = &self.test_text {
            let tokens = tokenizer.tokenize(text);
            writeln!(out, "Tokens: {tokens}")?;
            if self.decode {
                writeln!(out, "Decoded: {}", tokenizer.decode(&tokens)?)?;
            }
        }
        writeln!(out, "Training time: {:.3?}", outcome.elapsed)?;

        if self.benchmark {
            let (elapsed, batch) = timeit(|| tokenizer.tokenize_batch(samples.as_slice()));
            let total: usize = batch.iter().map(|tokens| tokens.len()).sum();
            writeln!(
                out,
                "Tokenized {} samples into {} tokens in {:.3?}",
                samples.len(),
                total,
                elapsed
            )?;
        }

        Ok(())
    }
}
