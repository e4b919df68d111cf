use std::fs::File;
use std::io::{prelude::*, stdin, BufReader};
use std::path::PathBuf;

use clap::Parser;
use postag::{ExternalOptimizer, Tagger, TrainingSet};

#[derive(Parser, Debug)]
#[command(about = "A program to train part-of-speech tagger models.")]
struct Args {
    /// The annotated corpus to train on, one "<token> <tag>" pair per line
    /// separated by a single space (read from stdin if missing)
    #[arg(long, short)]
    corpus: Option<PathBuf>,

    /// The file to write the trained model to
    #[arg(long, short, default_value = "model.bin")]
    model: PathBuf,

    /// The external gradient-descent optimizer executable
    #[arg(long, default_value = "gradient-descent")]
    optimizer: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading corpus...");
    let lines: Vec<String> = match &args.corpus {
        Some(path) => BufReader::new(File::open(path)?)
            .lines()
            .collect::<Result<_, _>>()?,
        None => stdin().lock().lines().collect::<Result<_, _>>()?,
    };
    let training_set = TrainingSet::from_corpus_lines(&lines, 1);
    eprintln!("# of documents: {}", training_set.len());

    eprintln!("Start training...");
    let optimizer = ExternalOptimizer::new(args.optimizer);
    let mut tagger = Tagger::new();
    let model = tagger.train(&training_set, &optimizer)?;
    eprintln!("Finish training.");

    eprintln!("Saving model file...");
    let mut f = zstd::Encoder::new(File::create(&args.model)?, 19)?;
    model.write(&mut f)?;
    f.finish()?;

    Ok(())
}
