use std::fs::File;
use std::io::{prelude::*, stdin};
use std::path::PathBuf;

use clap::Parser;
use postag::{Model, Tagger};

#[derive(Parser, Debug)]
#[command(about = "A program to tag sequences of tokens.")]
struct Args {
    /// The sentence to tag (read from stdin if missing)
    input: Option<String>,

    /// The model file to use when tagging
    #[arg(long, short, default_value = "model.bin")]
    model: PathBuf,

    /// The format with which to echo the output (<w>=word, <t>=tag, <n>=new
    /// line)
    #[arg(long, short = 'o', default_value = "<w>/<t> ")]
    output_format: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;
    let tagger = Tagger::from_model(model)?;

    if let Some(line) = &args.input {
        tag_line(&tagger, line, &args.output_format)?;
    } else {
        for line in stdin().lock().lines() {
            tag_line(&tagger, &line?, &args.output_format)?;
        }
    }

    Ok(())
}

fn tag_line(tagger: &Tagger, line: &str, format: &str) -> postag::Result<()> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let tags = tagger.tag(&tokens)?;
    let mut rendered = String::new();
    for (token, tag) in tokens.iter().zip(&tags) {
        rendered.push_str(
            &format
                .replace("<w>", token)
                .replace("<t>", tag)
                .replace("<n>", "\n"),
        );
    }
    println!("{}", rendered);
    Ok(())
}
