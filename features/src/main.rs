use std::fs::File;
use std::io::{prelude::*, stdin};
use std::path::PathBuf;

use clap::Parser;
use postag::{FiredFeature, Model, Tagger};

/// Shows the features firing for a specific token and their per-class
/// weights. Useful for understanding why a token was assigned an
/// inappropriate tag.
#[derive(Parser, Debug)]
#[command(about = "A program to show the features firing for a given token and their weights.")]
struct Args {
    /// The sentence to inspect (read from stdin if missing)
    input: Option<String>,

    /// The model file to read the weights from
    #[arg(long, short, default_value = "model.bin")]
    model: PathBuf,

    /// The index of the token whose features to show
    #[arg(long, short, default_value = "0")]
    index: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;

    // the whole input is read at once: the index is an offset from the start
    // of the text, not from the start of a line
    let text = match args.input {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let weights = model.weights().clone();
    let tagger = Tagger::from_model(model)?;
    let fired = tagger.features_fired(&weights, &tokens, args.index)?;
    print_features(&fired);

    Ok(())
}

/// Prints the fired features in an indented, column-aligned layout.
fn print_features(fired: &[FiredFeature]) {
    if fired.is_empty() {
        println!("No features fired");
        return;
    }
    let column = fired
        .iter()
        .flat_map(|feature| feature.weights.iter())
        .map(|(class, _)| class.chars().count())
        .max()
        .unwrap_or(0);
    for feature in fired {
        println!("{} :", feature.name);
        for (class, weight) in &feature.weights {
            println!("    {:<column$} : {}", class, weight);
        }
    }
}
