use std::fs::File;
use std::io::{prelude::*, stdin, BufReader};
use std::path::PathBuf;

use clap::Parser;
use postag::{Model, Tagger, TrainingSet};

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of a tagger model on a preannotated corpus.")]
struct Args {
    /// The model file to evaluate
    #[arg(long, short, default_value = "model.bin")]
    model: PathBuf,

    /// The annotated corpus to read the token-tag pairs from (read from stdin
    /// if missing)
    #[arg(long, short)]
    corpus: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;
    let tagger = Tagger::from_model(model)?;

    eprintln!("Loading corpus...");
    let lines: Vec<String> = match &args.corpus {
        Some(path) => BufReader::new(File::open(path)?)
            .lines()
            .collect::<Result<_, _>>()?,
        None => stdin().lock().lines().collect::<Result<_, _>>()?,
    };
    let training_set = TrainingSet::from_corpus_lines(&lines, 1);

    let accuracy = tagger.evaluate(&training_set)?;
    println!("Accuracy: {}", accuracy);

    Ok(())
}
